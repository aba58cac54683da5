use crate::{DendroError, TreeFloat};
use serde::Serialize;
use std::{fmt::Display, sync::Arc};

/// Node identifier in binary-heap numbering: the root is 1 and the children
/// of node `i` are `2i` (left) and `2i + 1` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct HeapId(u64);

impl HeapId {
    pub const ROOT: HeapId = HeapId(1);

    pub fn new(id: u64) -> Option<Self> { (id != 0).then_some(Self(id)) }
    pub fn get(self) -> u64 { self.0 }
    pub fn is_root(self) -> bool { self == Self::ROOT }
    pub fn is_left_child(self) -> bool { !self.is_root() && self.0 % 2 == 0 }
    pub fn is_right_child(self) -> bool { !self.is_root() && self.0 % 2 == 1 }

    /// Number of edges between this node and the root.
    pub fn depth(self) -> u32 { self.0.ilog2() }

    /// Arithmetic parent id. Whether that node exists is up to the frame.
    pub fn parent(self) -> Option<HeapId> {
        match self.is_root() {
            true => None,
            false => Some(HeapId(self.0 / 2)),
        }
    }

    /// Arithmetic sibling id. Whether that node exists is up to the frame.
    pub fn sibling(self) -> Option<HeapId> {
        if self.is_root() {
            None
        } else if self.0 % 2 == 1 {
            Some(HeapId(self.0 - 1))
        } else {
            self.0.checked_add(1).map(HeapId)
        }
    }

    pub fn left_child(self) -> Option<HeapId> { self.0.checked_mul(2).map(HeapId) }

    pub fn right_child(self) -> Option<HeapId> {
        self.0.checked_mul(2).and_then(|id| id.checked_add(1)).map(HeapId)
    }
}

impl TryFrom<u64> for HeapId {
    type Error = DendroError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        HeapId::new(value).ok_or(DendroError::ZeroNodeId)
    }
}

impl From<HeapId> for u64 {
    fn from(id: HeapId) -> Self { id.0 }
}

impl Display for HeapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

/// Fitted response of a node: a number for regression trees, a class label
/// for classification trees.
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum FittedValue {
    Numeric(TreeFloat),
    Class(Arc<str>),
}

impl FittedValue {
    pub fn as_numeric(&self) -> Option<TreeFloat> {
        match self {
            FittedValue::Numeric(v) => Some(*v),
            FittedValue::Class(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool { matches!(self, FittedValue::Numeric(_)) }
}

impl From<TreeFloat> for FittedValue {
    fn from(value: TreeFloat) -> Self { FittedValue::Numeric(value) }
}

impl<'a> From<&'a str> for FittedValue {
    fn from(value: &'a str) -> Self { FittedValue::Class(value.into()) }
}

impl From<String> for FittedValue {
    fn from(value: String) -> Self { FittedValue::Class(value.into()) }
}

impl Display for FittedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FittedValue::Numeric(v) => write!(f, "{v}"),
            FittedValue::Class(c) => write!(f, "{c}"),
        }
    }
}

/// One row of a fitted tree's frame table.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    heap_id: HeapId,
    var: Arc<str>,
    value: FittedValue,
    count: usize,
    deviance: Option<TreeFloat>,
}

impl NodeRow {
    pub fn new(heap_id: HeapId, var: impl Into<Arc<str>>, value: impl Into<FittedValue>, count: usize) -> Self {
        Self { heap_id, var: var.into(), value: value.into(), count, deviance: None }
    }

    pub fn with_deviance(mut self, deviance: TreeFloat) -> Self {
        self.deviance = Some(deviance);
        self
    }

    pub fn heap_id(&self) -> HeapId { self.heap_id }

    /// Split variable name, or the frame's leaf sentinel for terminal nodes.
    pub fn var(&self) -> Arc<str> { self.var.clone() }
    pub fn value(&self) -> &FittedValue { &self.value }
    pub fn count(&self) -> usize { self.count }
    pub fn deviance(&self) -> Option<TreeFloat> { self.deviance }
    pub fn set_deviance(&mut self, deviance: Option<TreeFloat>) { self.deviance = deviance; }
    pub fn is_leaf(&self, leaf_sentinel: &str) -> bool { &*self.var == leaf_sentinel }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(i: u64) -> HeapId { HeapId::new(i).unwrap() }

    #[test]
    fn heap_arithmetic() {
        assert_eq!(HeapId::new(0), None);
        assert_eq!(id(1).parent(), None);
        assert_eq!(id(1).sibling(), None);
        assert_eq!(id(2).parent(), Some(id(1)));
        assert_eq!(id(3).parent(), Some(id(1)));
        assert_eq!(id(7).parent(), Some(id(3)));
        assert_eq!(id(2).sibling(), Some(id(3)));
        assert_eq!(id(3).sibling(), Some(id(2)));
        assert_eq!(id(12).sibling(), Some(id(13)));
        assert_eq!(id(5).left_child(), Some(id(10)));
        assert_eq!(id(5).right_child(), Some(id(11)));
        assert_eq!(id(u64::MAX).right_child(), None);
    }

    #[test]
    fn heap_depth() {
        let cases = [(1, 0), (2, 1), (3, 1), (4, 2), (7, 2), (8, 3), (1023, 9), (1024, 10)];
        for (raw, depth) in cases {
            assert_eq!(id(raw).depth(), depth, "depth of {raw}");
        }
    }

    #[test]
    fn fitted_value_display() {
        assert_eq!(FittedValue::from(2.0).to_string(), "2");
        assert_eq!(FittedValue::from(3.25).to_string(), "3.25");
        assert_eq!(FittedValue::from("yes").to_string(), "yes");
    }
}
