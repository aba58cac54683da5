use super::Placement;
use crate::TreeFloat;
use rayon::prelude::*;
use serde::Serialize;

/// Connector line between two points, weighted by the observation count of
/// the node it leads to.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub x: TreeFloat,
    pub y: TreeFloat,
    pub xend: TreeFloat,
    pub yend: TreeFloat,
    pub n: usize,
}

impl Segment {
    pub fn is_vertical(&self) -> bool {
        self.x == self.xend
    }

    pub fn is_horizontal(&self) -> bool {
        self.y == self.yend
    }
}

/// Two segments per non-root node: the vertical stroke from the node up to
/// its parent's height, then the horizontal stroke from the parent across to
/// the node. Ordered by ascending node id.
pub(super) fn segments(placement: &Placement<'_>, min_len: usize) -> Vec<Segment> {
    placement
        .nodes
        .par_iter()
        .with_min_len(min_len)
        .filter_map(|placed| {
            let heap_id = placed.row.heap_id();
            let parent = placement.parent_point(heap_id)?;
            let (node, n) = (placed.point, placed.row.count());
            Some([
                Segment { x: node.x, y: node.y, xend: node.x, yend: parent.y, n },
                Segment { x: parent.x, y: parent.y, xend: node.x, yend: parent.y, n },
            ])
        })
        .flat_map_iter(|pair| pair)
        .collect()
}
