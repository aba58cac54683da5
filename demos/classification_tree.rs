use dendrodata::{ExtractOptions, FnOracle, HeapId, Point, TreeFrame, dendro_data};

fn main() -> Result<(), dendrodata::DendroError> {
    let mut frame = TreeFrame::new();
    frame.add_new_node(1, "Petal.Length", "setosa", 150)?;
    frame.add_new_node(2, "<leaf>", "setosa", 50)?;
    frame.add_new_node(3, "Petal.Width", "versicolor", 100)?;
    frame.add_new_node(6, "<leaf>", "versicolor", 54)?;
    frame.add_new_node(7, "<leaf>", "virginica", 46)?;

    // Coordinates as a modeling library might report them.
    let oracle = FnOracle(|heap_id: HeapId| {
        let (x, y) = match heap_id.get() {
            1 => (1.75, 0.92),
            2 => (1.0, 0.0),
            3 => (2.5, 0.48),
            6 => (2.0, 0.0),
            7 => (3.0, 0.0),
            _ => return None,
        };
        Some(Point::new(x, y))
    });

    let data = dendro_data(&frame, &oracle, &ExtractOptions::default())?;
    println!("{}", summary(&data));
    Ok(())
}

fn summary(data: &dendrodata::DendroData) -> String {
    let mut out = String::new();
    for l in &data.labels {
        out.push_str(&format!("split {:<14} at ({:.2}, {:.2})\n", l.label, l.x, l.y));
    }
    for l in &data.leaf_labels {
        out.push_str(&format!("leaf  {:<14} at ({:.2}, {:.2})\n", l.label.to_string(), l.x, l.y));
    }
    out.push_str(&format!("{} segments\n", data.segments.len()));
    out
}
