use dendrodata::{ExtractOptions, LayoutKind, TreeLayout, dendro_data, parse_frame};

const FRAME: &str = "\
node,var,n,dev,yval
1,Price,60,1354.0,24.58
2,<leaf>,21,302.4,30.73
3,Type,39,435.2,21.28
6,<leaf>,16,87.7,23.00
7,HP,23,131.9,20.08
14,<leaf>,7,22.9,21.57
15,<leaf>,16,60.0,19.43
";

fn main() {
    let frame = match parse_frame(FRAME) {
        Ok(frame) => frame,
        Err(err) => {
            eprintln!("{err}");
            return;
        }
    };

    println!("{frame}");

    for kind in [LayoutKind::Uniform, LayoutKind::Proportional] {
        let data = TreeLayout::new(&frame, kind)
            .and_then(|layout| dendro_data(&frame, &layout, &ExtractOptions::default()));

        let data = match data {
            Ok(data) => data,
            Err(err) => {
                eprintln!("{err}");
                continue;
            }
        };

        println!("== {kind:?}");
        println!("{:>8} {:>8} {:>8} {:>8} {:>4}", "x", "y", "xend", "yend", "n");
        for s in &data.segments {
            println!("{:>8.3} {:>8.3} {:>8.3} {:>8.3} {:>4}", s.x, s.y, s.xend, s.yend, s.n);
        }
        for l in &data.labels {
            println!("{:>8.3} {:>8.3} {}", l.x, l.y, l.label);
        }
        for l in &data.leaf_labels {
            println!("{:>8.3} {:>8.3} {}", l.x, l.y, l.label);
        }
        println!();
    }
}
