use crate::model::HeapId;
use thiserror::Error;

/// Broad category of a [`DendroError`].
///
/// Every failure this crate reports is a rejection of its input; nothing is
/// retried and no partial tables are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DendroError {
    #[error("Tree frame has no nodes.")]
    EmptyFrame,
    #[error("Tree frame has no root node (id 1).")]
    MissingRoot,
    #[error("Node id 0 is not a valid binary-heap id.")]
    ZeroNodeId,
    #[error("Node with id {0} already exists.")]
    DuplicateNode(HeapId),
    #[error("Parent node {parent} of node {node} does not exist.")]
    ParentNodeDoesNotExist { node: HeapId, parent: HeapId },
    #[error("Node {parent} is marked as a leaf but has child node {node}.")]
    LeafHasChildren { node: HeapId, parent: HeapId },
    #[error("No position for node {0}.")]
    MissingPosition(HeapId),
    #[error("Position of node {0} is not finite.")]
    NonFinitePosition(HeapId),
    #[error("Node {0} has no deviance; proportional layout needs one for every node.")]
    MissingDeviance(HeapId),
    #[error("Frame table, line {line}: {reason}.")]
    MalformedTable { line: usize, reason: String },
}

impl DendroError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidInput
    }
}
