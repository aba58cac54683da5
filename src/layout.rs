mod oracle;
mod tree_layout;

pub use oracle::{FnOracle, Point, PositionOracle};
pub use tree_layout::{LayoutKind, TreeLayout};
