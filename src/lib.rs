//! Segment and label tables for plotting fitted decision trees.
//!
//! Tree models number their nodes in binary-heap order (root 1, children
//! `2i` and `2i + 1`) and usually draw themselves straight to a device. This
//! crate takes the model's frame table plus a [`PositionOracle`] for node
//! coordinates and returns flat tables any 2-D charting layer can draw:
//!
//! * `segments` with columns `x, y, xend, yend, n`,
//! * `labels` (split variables) with columns `x, y, label`,
//! * `leaf_labels` (fitted values) with columns `x, y, label`.
//!
//! ```
//! use dendrodata::{ExtractOptions, LayoutKind, TreeFrame, TreeLayout, dendro_data};
//!
//! let mut frame = TreeFrame::new();
//! frame.add_new_node(1, "Price", 24.58, 60)?;
//! frame.add_new_node(2, "<leaf>", 30.73, 21)?;
//! frame.add_new_node(3, "<leaf>", 21.28, 39)?;
//!
//! let layout = TreeLayout::new(&frame, LayoutKind::Uniform)?;
//! let data = dendro_data(&frame, &layout, &ExtractOptions::default())?;
//!
//! assert_eq!(data.segments.len(), 4);
//! assert_eq!(data.labels.len(), 1);
//! assert_eq!(data.leaf_labels.len(), 2);
//! # Ok::<(), dendrodata::DendroError>(())
//! ```

mod error;
mod extract;
mod layout;
mod model;
mod parsers;

pub type TreeFloat = f64;

pub use error::DendroError;
pub use error::ErrorKind;
pub use extract::DendroData;
pub use extract::ExtractOptions;
pub use extract::Label;
pub use extract::LabelTables;
pub use extract::LeafLabel;
pub use extract::Segment;
pub use extract::compute_labels;
pub use extract::compute_segments;
pub use extract::dendro_data;
pub use extract::round_to;
pub use layout::FnOracle;
pub use layout::LayoutKind;
pub use layout::Point;
pub use layout::PositionOracle;
pub use layout::TreeLayout;
pub use model::DEFAULT_LEAF_SENTINEL;
pub use model::FittedValue;
pub use model::HeapId;
pub use model::NodeKey;
pub use model::NodeRow;
pub use model::TreeFrame;
pub use parsers::parse_frame;
