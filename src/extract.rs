//! Flattening of a fitted tree into plot-ready tables.
//!
//! Every entry point validates the frame and asks the oracle for all node
//! positions before producing anything, so a caller either gets complete
//! tables or an error.

mod labels;
mod options;
mod segments;

pub use labels::{Label, LabelTables, LeafLabel, round_to};
pub use options::ExtractOptions;
pub use segments::Segment;

use crate::DendroError;
use crate::layout::{Point, PositionOracle};
use crate::model::{HeapId, NodeRow, TreeFrame};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use serde::Serialize;

/// The three tables a charting layer needs to draw a tree.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DendroData {
    pub segments: Vec<Segment>,
    pub labels: Vec<Label>,
    pub leaf_labels: Vec<LeafLabel>,
}

pub(crate) struct Placed<'a> {
    row: &'a NodeRow,
    point: Point,
}

/// Frame rows in ascending id order, each paired with its oracle position.
pub(crate) struct Placement<'a> {
    nodes: Vec<Placed<'a>>,
    points: FxHashMap<HeapId, Point>,
}

impl Placement<'_> {
    fn parent_point(&self, heap_id: HeapId) -> Option<Point> {
        heap_id.parent().and_then(|parent_id| self.points.get(&parent_id).copied())
    }
}

fn place<'a, O>(frame: &'a TreeFrame, oracle: &O) -> Result<Placement<'a>, DendroError>
where
    O: PositionOracle + ?Sized,
{
    frame.validate()?;

    let rows = frame.rows();
    let mut nodes: Vec<Placed<'a>> = Vec::with_capacity(rows.len());
    let mut points: FxHashMap<HeapId, Point> = FxHashMap::default();
    points.reserve(rows.len());

    for row in rows {
        let heap_id = row.heap_id();
        let point = oracle.position(heap_id).ok_or(DendroError::MissingPosition(heap_id))?;
        if !point.is_finite() {
            return Err(DendroError::NonFinitePosition(heap_id));
        }
        trace!("Node {heap_id} at ({}, {}).", point.x, point.y);
        let _ = points.insert(heap_id, point);
        nodes.push(Placed { row, point });
    }

    Ok(Placement { nodes, points })
}

/// Connector segments for every non-root node, two per node.
pub fn compute_segments<O>(
    frame: &TreeFrame,
    oracle: &O,
    options: &ExtractOptions,
) -> Result<Vec<Segment>, DendroError>
where
    O: PositionOracle + ?Sized,
{
    let placement = place(frame, oracle)?;
    Ok(segments::segments(&placement, options.min_parallel_len))
}

/// Split-variable labels for internal nodes and fitted-value labels for
/// leaves.
pub fn compute_labels<O>(
    frame: &TreeFrame,
    oracle: &O,
    options: &ExtractOptions,
) -> Result<LabelTables, DendroError>
where
    O: PositionOracle + ?Sized,
{
    let placement = place(frame, oracle)?;
    Ok(labels::labels(&placement, frame.leaf_sentinel(), options.digits, options.min_parallel_len))
}

/// Segments and both label tables in one pass over a single placement.
pub fn dendro_data<O>(frame: &TreeFrame, oracle: &O, options: &ExtractOptions) -> Result<DendroData, DendroError>
where
    O: PositionOracle + ?Sized,
{
    let placement = place(frame, oracle)?;
    let segments = segments::segments(&placement, options.min_parallel_len);
    let LabelTables { labels, leaf_labels } =
        labels::labels(&placement, frame.leaf_sentinel(), options.digits, options.min_parallel_len);

    debug!(
        "Extracted {} segments, {} labels, {} leaf labels from {} nodes.",
        segments.len(),
        labels.len(),
        leaf_labels.len(),
        placement.nodes.len()
    );

    Ok(DendroData { segments, labels, leaf_labels })
}
