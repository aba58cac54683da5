use super::{Point, PositionOracle};
use crate::model::{HeapId, TreeFrame};
use crate::{DendroError, TreeFloat};
use log::debug;
use rustc_hash::FxHashMap;

/// How [`TreeLayout`] places nodes vertically.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    /// Every level of the tree one unit apart; the deepest leaves sit at 0.
    #[default]
    Uniform,
    /// The root sits at its deviance and both children of a split sit
    /// `dev(parent) - dev(left) - dev(right)` below it, so every drop is the
    /// deviance explained by that split. An absent sibling counts as 0.
    Proportional,
}

/// Default coordinates for trees that come without a layout.
///
/// Leaves are spaced one unit apart from left to right starting at x = 1;
/// an internal node is centered between its outermost children.
#[derive(Debug, Default, Clone)]
pub struct TreeLayout {
    positions: FxHashMap<HeapId, Point>,
}

impl TreeLayout {
    pub fn new(frame: &TreeFrame, kind: LayoutKind) -> Result<Self, DendroError> {
        frame.validate()?;

        let xs = horizontal_positions(frame);
        let max_depth = frame.max_depth();
        let mut positions: FxHashMap<HeapId, Point> = FxHashMap::default();
        positions.reserve(xs.len());

        // Ascending ids visit every parent before its children.
        for heap_id in frame.heap_ids() {
            let Some(&x) = xs.get(&heap_id) else { continue };
            let y = match kind {
                LayoutKind::Uniform => (max_depth - heap_id.depth()) as TreeFloat,
                LayoutKind::Proportional => proportional_height(frame, &positions, heap_id)?,
            };
            let _ = positions.insert(heap_id, Point { x, y });
        }

        debug!("{kind:?} layout: {} nodes placed.", positions.len());
        Ok(Self { positions })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl PositionOracle for TreeLayout {
    fn position(&self, heap_id: HeapId) -> Option<Point> {
        self.positions.get(&heap_id).copied()
    }
}

fn deviance(frame: &TreeFrame, heap_id: HeapId) -> Result<TreeFloat, DendroError> {
    frame.row(heap_id).and_then(|row| row.deviance()).ok_or(DendroError::MissingDeviance(heap_id))
}

/// `y(parent) - (dev(parent) - (dev(node) + dev(sibling)))`; both siblings
/// get bit-identical heights since the sum is commutative.
fn proportional_height(
    frame: &TreeFrame,
    placed: &FxHashMap<HeapId, Point>,
    heap_id: HeapId,
) -> Result<TreeFloat, DendroError> {
    let dev = deviance(frame, heap_id)?;
    let Some(parent_id) = frame.parent_id(heap_id) else {
        return Ok(dev);
    };
    let parent_y = placed.get(&parent_id).map(|p| p.y).ok_or(DendroError::MissingPosition(parent_id))?;
    let sibling_dev = match frame.sibling_id(heap_id) {
        Some(sibling_id) => deviance(frame, sibling_id)?,
        None => 0e0,
    };
    Ok(parent_y - (deviance(frame, parent_id)? - (dev + sibling_dev)))
}

/// Post-order walk with an explicit stack, left child first.
fn horizontal_positions(frame: &TreeFrame) -> FxHashMap<HeapId, TreeFloat> {
    let mut xs: FxHashMap<HeapId, TreeFloat> = FxHashMap::default();
    let mut next_tip_x: TreeFloat = 1e0;
    let mut stack: Vec<(HeapId, bool)> = vec![(HeapId::ROOT, false)];

    while let Some((heap_id, children_done)) = stack.pop() {
        let child_ids = frame.child_ids(heap_id);
        if child_ids.is_empty() {
            let _ = xs.insert(heap_id, next_tip_x);
            next_tip_x += 1e0;
        } else if children_done {
            let child_xs = child_ids.iter().filter_map(|id| xs.get(id).copied());
            let x_min = child_xs.clone().reduce(TreeFloat::min).unwrap_or(next_tip_x);
            let x_max = child_xs.reduce(TreeFloat::max).unwrap_or(next_tip_x);
            let _ = xs.insert(heap_id, x_min.midpoint(x_max));
        } else {
            stack.push((heap_id, true));
            stack.extend(child_ids.into_iter().rev().map(|id| (id, false)));
        }
    }

    xs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u64) -> HeapId {
        HeapId::new(i).unwrap()
    }

    #[test]
    fn horizontal_positions_follow_leaf_order() {
        // 1 -> (2 leaf, 3 -> (6 leaf, 7 leaf))
        let mut frame = TreeFrame::new();
        let _ = frame.add_new_node(1, "a", 0.0, 10).unwrap();
        let _ = frame.add_new_node(2, "<leaf>", 1.0, 4).unwrap();
        let _ = frame.add_new_node(3, "b", 2.0, 6).unwrap();
        let _ = frame.add_new_node(6, "<leaf>", 3.0, 3).unwrap();
        let _ = frame.add_new_node(7, "<leaf>", 4.0, 3).unwrap();

        let xs = horizontal_positions(&frame);
        assert_eq!(xs[&id(2)], 1.0);
        assert_eq!(xs[&id(6)], 2.0);
        assert_eq!(xs[&id(7)], 3.0);
        assert_eq!(xs[&id(3)], 2.5);
        assert_eq!(xs[&id(1)], 1.75);
    }
}
