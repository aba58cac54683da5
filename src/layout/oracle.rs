use crate::TreeFloat;
use crate::model::HeapId;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Point {
    pub x: TreeFloat,
    pub y: TreeFloat,
}

impl Point {
    pub fn new(x: TreeFloat, y: TreeFloat) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(TreeFloat, TreeFloat)> for Point {
    fn from((x, y): (TreeFloat, TreeFloat)) -> Self {
        Self { x, y }
    }
}

/// Supplies the drawing position of a node.
///
/// Modeling libraries usually compute their own tree layout; wrapping that
/// result in an oracle lets the extractor reuse it instead of guessing.
/// Returning `None` for a node present in the frame is an input error.
pub trait PositionOracle {
    fn position(&self, heap_id: HeapId) -> Option<Point>;
}

impl<O: PositionOracle + ?Sized> PositionOracle for &O {
    fn position(&self, heap_id: HeapId) -> Option<Point> {
        (**self).position(heap_id)
    }
}

impl<S: BuildHasher> PositionOracle for HashMap<HeapId, Point, S> {
    fn position(&self, heap_id: HeapId) -> Option<Point> {
        self.get(&heap_id).copied()
    }
}

impl PositionOracle for BTreeMap<HeapId, Point> {
    fn position(&self, heap_id: HeapId) -> Option<Point> {
        self.get(&heap_id).copied()
    }
}

/// Adapts a closure into a [`PositionOracle`].
#[derive(Debug, Clone, Copy)]
pub struct FnOracle<F>(pub F);

impl<F> PositionOracle for FnOracle<F>
where
    F: Fn(HeapId) -> Option<Point>,
{
    fn position(&self, heap_id: HeapId) -> Option<Point> {
        (self.0)(heap_id)
    }
}
