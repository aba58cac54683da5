use crate::model::{FittedValue, HeapId, NodeRow, TreeFrame};
use crate::{DendroError, TreeFloat};
use log::debug;

const REQUIRED_COLUMNS: [&str; 4] = ["node", "var", "n", "yval"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn detect(header: &str) -> Self {
        match header.contains('\t') {
            true => Delimiter::Tab,
            false => Delimiter::Comma,
        }
    }

    fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Field {
    text: String,
    quoted: bool,
}

/// Column positions of the header fields this reader understands.
#[derive(Debug, Clone, Copy)]
struct Columns {
    node: usize,
    var: usize,
    n: usize,
    yval: usize,
    dev: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(fields: &[Field], line: usize) -> Result<Self, DendroError> {
        let position = |name: &str| fields.iter().position(|f| f.text.eq_ignore_ascii_case(name));

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|name| position(**name).is_none()) {
            return Err(malformed(line, format!("missing required column '{missing}'")));
        }

        Ok(Self {
            node: position("node").unwrap_or_default(),
            var: position("var").unwrap_or_default(),
            n: position("n").unwrap_or_default(),
            yval: position("yval").unwrap_or_default(),
            dev: position("dev"),
            width: fields.len(),
        })
    }
}

/// Reads a tree frame from a delimited text table.
///
/// The first non-blank, non-`#` line is a header naming the columns `node`,
/// `var`, `n` and `yval` (any order, case-insensitive) and optionally `dev`.
/// Commas separate fields unless the header contains a tab. Fields may be
/// double-quoted; `""` inside quotes is a literal quote. An unquoted `yval`
/// that parses as a finite number is numeric, anything else (including
/// `Inf` or `nan`) is a class label; an unquoted `NA` or empty `yval` is
/// rejected since every node needs a fitted value, while a quoted `"NA"` is
/// the class `NA`. An empty or `NA` `dev` means no deviance.
///
/// ```text
/// node,var,n,dev,yval
/// 1,Price,60,983.3,24.58
/// 2,<leaf>,21,118.8,30.73
/// 3,<leaf>,39,300.5,21.28
/// ```
pub fn parse_frame(s: &str) -> Result<TreeFrame, DendroError> {
    let mut lines = s
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'));

    let Some((header_line, header)) = lines.next() else {
        return Err(malformed(1, "no header line".to_string()));
    };

    let delimiter = Delimiter::detect(header);
    let columns = Columns::from_header(&split_fields(header, delimiter, header_line)?, header_line)?;

    let mut frame = TreeFrame::new();
    for (line_number, line) in lines {
        let fields = split_fields(line, delimiter, line_number)?;
        if fields.len() != columns.width {
            return Err(malformed(
                line_number,
                format!("expected {} fields, found {}", columns.width, fields.len()),
            ));
        }
        let row = parse_row(&fields, &columns, line_number)?;
        let _ = frame.add_node(row).map_err(|err| malformed(line_number, err.to_string()))?;
    }

    debug!("Read tree frame: {} nodes, {} leaves.", frame.node_count(), frame.leaf_count());
    Ok(frame)
}

fn parse_row(fields: &[Field], columns: &Columns, line: usize) -> Result<NodeRow, DendroError> {
    let node_text = fields[columns.node].text.trim();
    let heap_id = node_text
        .parse::<u64>()
        .map_err(|_| malformed(line, format!("node id '{node_text}' is not a non-negative integer")))
        .and_then(|id| HeapId::try_from(id).map_err(|err| malformed(line, err.to_string())))?;

    let n_text = fields[columns.n].text.trim();
    let count = n_text
        .parse::<usize>()
        .map_err(|_| malformed(line, format!("observation count '{n_text}' is not a non-negative integer")))?;

    let var = fields[columns.var].text.trim();

    let yval = &fields[columns.yval];
    let yval_text = yval.text.trim();
    let value: FittedValue = match (yval.quoted, yval_text.parse::<TreeFloat>()) {
        (true, _) => FittedValue::from(yval.text.as_str()),
        (false, _) if yval_text.is_empty() || yval_text == "NA" => {
            return Err(malformed(line, "fitted value (yval) is missing".to_string()));
        }
        (false, Ok(v)) if v.is_finite() => FittedValue::Numeric(v),
        (false, _) => FittedValue::from(yval_text),
    };

    let mut row = NodeRow::new(heap_id, var, value, count);

    if let Some(dev_column) = columns.dev {
        let dev_text = fields[dev_column].text.trim();
        let deviance = match dev_text {
            "" | "NA" => None,
            text => Some(
                text.parse::<TreeFloat>()
                    .map_err(|_| malformed(line, format!("deviance '{text}' is not a number")))?,
            ),
        };
        row.set_deviance(deviance);
    }

    Ok(row)
}

fn split_fields(line: &str, delimiter: Delimiter, line_number: usize) -> Result<Vec<Field>, DendroError> {
    let delimiter = delimiter.as_char();
    let mut fields: Vec<Field> = Vec::new();
    let mut text = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    text.push('"');
                    let _ = chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if text.trim().is_empty() && !quoted => {
                text.clear();
                in_quotes = true;
                quoted = true;
            }
            c if c == delimiter && !in_quotes => {
                fields.push(Field { text: std::mem::take(&mut text), quoted });
                quoted = false;
            }
            c => text.push(c),
        }
    }

    if in_quotes {
        return Err(malformed(line_number, "unterminated quoted field".to_string()));
    }

    fields.push(Field { text, quoted });
    Ok(fields)
}

fn malformed(line: usize, reason: String) -> DendroError {
    DendroError::MalformedTable { line, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.text.as_str()).collect()
    }

    #[test]
    fn split_plain_and_quoted_fields() {
        let fields = split_fields(r#"1,"a, b","say ""hi""",x"#, Delimiter::Comma, 1).unwrap();
        assert_eq!(texts(&fields), vec!["1", "a, b", r#"say "hi""#, "x"]);
        assert_eq!(fields.iter().map(|f| f.quoted).collect::<Vec<_>>(), vec![false, true, true, false]);
    }

    #[test]
    fn split_tab_fields() {
        let fields = split_fields("1\tx < 2\t\t3.5", Delimiter::Tab, 1).unwrap();
        assert_eq!(texts(&fields), vec!["1", "x < 2", "", "3.5"]);
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let err = split_fields(r#"1,"abc"#, Delimiter::Comma, 7).unwrap_err();
        assert!(matches!(err, DendroError::MalformedTable { line: 7, .. }));
    }

    #[test]
    fn delimiter_detection() {
        assert_eq!(Delimiter::detect("node\tvar\tn\tyval"), Delimiter::Tab);
        assert_eq!(Delimiter::detect("node,var,n,yval"), Delimiter::Comma);
    }
}
