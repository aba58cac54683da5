use dendrodata::{
    DendroError, ErrorKind, ExtractOptions, FittedValue, HeapId, LayoutKind, TreeLayout, dendro_data, parse_frame,
};

fn id(i: u64) -> HeapId {
    HeapId::new(i).unwrap()
}

const CARS_CSV: &str = "\
# Mileage ~ Price + Type + HP
node,var,n,dev,yval
1,Price,60,1354.0,24.58
2,<leaf>,21,302.4,30.73
3,Type,39,435.2,21.28

6,<leaf>,16,87.7,23.00
7,HP,23,131.9,20.08
14,<leaf>,7,22.9,21.57
15,<leaf>,16,60.0,19.43
";

#[test]
fn test_parse_csv() {
    let frame = parse_frame(CARS_CSV).unwrap();

    assert_eq!(frame.node_count(), 7);
    assert_eq!(frame.leaf_count(), 4);
    assert!(frame.validate().is_ok());

    let row = frame.row(id(7)).unwrap();
    assert_eq!(row.var().as_ref(), "HP");
    assert_eq!(row.count(), 23);
    assert_eq!(row.deviance(), Some(131.9));
    assert_eq!(row.value(), &FittedValue::Numeric(20.08));
}

#[test]
fn test_parse_tsv_with_classes() {
    let data = "NODE\tYVAL\tVAR\tN\n\
                1\tno\tage\t100\n\
                2\tyes\t<leaf>\t40\n\
                3\t\"1\"\t<leaf>\t60\n";
    let frame = parse_frame(data).unwrap();

    assert_eq!(frame.node_count(), 3);
    assert_eq!(frame.row(id(1)).unwrap().value(), &FittedValue::Class("no".into()));
    assert_eq!(frame.row(id(2)).unwrap().value(), &FittedValue::Class("yes".into()));
    assert_eq!(frame.row(id(3)).unwrap().value(), &FittedValue::Class("1".into()));
    assert_eq!(frame.row(id(3)).unwrap().deviance(), None);
}

#[test]
fn test_parse_quoted_split_and_missing_deviance() {
    let data = "node,var,n,dev,yval\r\n\
                1,\"Petal, Length\",150,NA,2.5\r\n\
                2,<leaf>,50,,1.0\r\n\
                3,<leaf>,100,12.5,3.25\r\n";
    let frame = parse_frame(data).unwrap();

    assert_eq!(frame.row(id(1)).unwrap().var().as_ref(), "Petal, Length");
    assert_eq!(frame.row(id(1)).unwrap().deviance(), None);
    assert_eq!(frame.row(id(2)).unwrap().deviance(), None);
    assert_eq!(frame.row(id(3)).unwrap().deviance(), Some(12.5));
}

#[test]
fn test_parse_non_finite_and_na_yval() {
    let data = "node,var,n,yval\n\
                1,x,30,Inf\n\
                2,<leaf>,10,nan\n\
                3,y,20,\"NA\"\n\
                6,<leaf>,10,-Infinity\n\
                7,<leaf>,10,1e3\n";
    let frame = parse_frame(data).unwrap();

    let test_cases = vec![
        (1, FittedValue::Class("Inf".into())),
        (2, FittedValue::Class("nan".into())),
        (3, FittedValue::Class("NA".into())),
        (6, FittedValue::Class("-Infinity".into())),
        (7, FittedValue::Numeric(1000.0)),
    ];

    for (raw, expected) in test_cases {
        println!("Testing yval of node {}", raw);
        assert_eq!(frame.row(id(raw)).unwrap().value(), &expected, "node {raw}");
    }
}

#[test]
fn test_parse_errors() {
    let test_cases = vec![
        ("Empty input", "", 1, "no header"),
        ("Only comments", "# nothing\n\n", 1, "no header"),
        ("Missing column", "node,var,n\n1,<leaf>,3\n", 1, "'yval'"),
        ("Field count", "node,var,n,yval\n1,a,3\n", 2, "expected 4 fields, found 3"),
        ("Bad node id", "node,var,n,yval\nroot,<leaf>,3,1.0\n", 2, "node id 'root'"),
        ("Zero node id", "node,var,n,yval\n0,<leaf>,3,1.0\n", 2, "id 0"),
        ("Bad count", "node,var,n,yval\n1,<leaf>,-3,1.0\n", 2, "observation count '-3'"),
        ("Bad deviance", "node,var,n,dev,yval\n1,<leaf>,3,lots,1.0\n", 2, "deviance 'lots'"),
        ("Duplicate", "node,var,n,yval\n1,a,3,1.0\n2,<leaf>,1,1.0\n\n2,<leaf>,2,1.0\n", 5, "already exists"),
        ("Open quote", "node,var,n,yval\n1,\"a,3,1.0\n", 2, "unterminated"),
        ("Missing yval", "node,var,n,yval\n1,<leaf>,3,NA\n", 2, "yval"),
        ("Empty yval", "node,var,n,yval\n1,a,3,1.0\n2,<leaf>,3,\n", 3, "yval"),
    ];

    for (name, data, expected_line, expected_reason) in test_cases {
        println!("Testing parse error: {}", name);
        let err = parse_frame(data).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        match err {
            DendroError::MalformedTable { line, reason } => {
                assert_eq!(line, expected_line, "{name}: line");
                assert!(reason.contains(expected_reason), "{name}: '{reason}' should mention '{expected_reason}'");
            }
            other => panic!("{name}: unexpected error {other:?}"),
        }
    }
}

#[test]
fn test_parsed_frame_to_tables() {
    let frame = parse_frame(CARS_CSV).unwrap();
    let layout = TreeLayout::new(&frame, LayoutKind::Proportional).unwrap();
    let data = dendro_data(&frame, &layout, &ExtractOptions::default()).unwrap();

    assert_eq!(data.segments.len(), 12);
    assert_eq!(data.labels.len(), 3);
    assert_eq!(data.leaf_labels.len(), 4);

    // Nodes 2 and 3 hang from the root 616.4 below it (the deviance the
    // first split explains): vertical strokes up to the root's height, then
    // across from the root.
    assert!((data.segments[0].y - 737.6).abs() < 1e-9);
    assert_eq!(data.segments[0].y, data.segments[2].y);
    assert_eq!(data.segments[0].yend, 1354.0);
    assert_eq!(data.segments[1].y, 1354.0);
    assert_eq!(data.segments[0].n, 21);

    let leaf_text: Vec<String> = data.leaf_labels.iter().map(|l| l.label.to_string()).collect();
    assert_eq!(leaf_text, vec!["30.73", "23", "21.57", "19.43"]);
}
