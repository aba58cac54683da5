use super::node::{FittedValue, HeapId, NodeRow};
use crate::DendroError;
use log::trace;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::fmt::Display;
use std::sync::Arc;

new_key_type! { pub struct NodeKey; }

/// Leaf marker used in the `var` column of R `tree` model frames.
pub const DEFAULT_LEAF_SENTINEL: &str = "<leaf>";

/// Node table of a fitted binary tree.
///
/// Rows live in an arena; an index maps binary-heap ids to arena keys so that
/// parent, sibling and child relations are resolved arithmetically and then
/// checked against the ids actually present. A pruned tree simply lacks the
/// ids of the removed subtrees.
#[derive(Debug, Clone)]
pub struct TreeFrame {
    nodes: SlotMap<NodeKey, NodeRow>,
    index: FxHashMap<HeapId, NodeKey>,
    leaf_sentinel: Arc<str>,
}

impl Default for TreeFrame {
    fn default() -> Self {
        Self { nodes: SlotMap::with_key(), index: FxHashMap::default(), leaf_sentinel: DEFAULT_LEAF_SENTINEL.into() }
    }
}

impl TreeFrame {
    // =========================================================================
    // Construction & Validation
    // =========================================================================

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_leaf_sentinel(mut self, leaf_sentinel: impl Into<Arc<str>>) -> Self {
        self.set_leaf_sentinel(leaf_sentinel);
        self
    }

    pub fn set_leaf_sentinel(&mut self, leaf_sentinel: impl Into<Arc<str>>) {
        self.leaf_sentinel = leaf_sentinel.into();
    }

    pub fn leaf_sentinel(&self) -> &str {
        &self.leaf_sentinel
    }

    /// Adds a row built from raw parts and returns its id.
    pub fn add_new_node(
        &mut self,
        heap_id: u64,
        var: impl Into<Arc<str>>,
        value: impl Into<FittedValue>,
        count: usize,
    ) -> Result<HeapId, DendroError> {
        let heap_id = HeapId::try_from(heap_id)?;
        self.add_node(NodeRow::new(heap_id, var, value, count))?;
        Ok(heap_id)
    }

    pub fn add_node(&mut self, row: NodeRow) -> Result<NodeKey, DendroError> {
        let heap_id = row.heap_id();
        if self.index.contains_key(&heap_id) {
            return Err(DendroError::DuplicateNode(heap_id));
        }
        let key = self.nodes.insert(row);
        let _ = self.index.insert(heap_id, key);
        Ok(key)
    }

    pub fn add_nodes(&mut self, rows: impl IntoIterator<Item = NodeRow>) -> Result<Vec<NodeKey>, DendroError> {
        rows.into_iter().map(|row| self.add_node(row)).collect()
    }

    /// Checks that the rows form a single binary tree rooted at id 1.
    ///
    /// Every non-root node must have its parent present, and that parent must
    /// not carry the leaf sentinel.
    pub fn validate(&self) -> Result<(), DendroError> {
        if self.nodes.is_empty() {
            return Err(DendroError::EmptyFrame);
        }
        if !self.contains(HeapId::ROOT) {
            return Err(DendroError::MissingRoot);
        }

        for row in self.nodes.values() {
            let node = row.heap_id();
            let Some(parent) = node.parent() else { continue };
            match self.row(parent) {
                None => return Err(DendroError::ParentNodeDoesNotExist { node, parent }),
                Some(p) if p.is_leaf(&self.leaf_sentinel) => {
                    return Err(DendroError::LeafHasChildren { node, parent });
                }
                Some(_) => {}
            }
        }

        trace!("Tree frame is valid: {} nodes, {} leaves.", self.node_count(), self.leaf_count());
        Ok(())
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.values().filter(|row| row.is_leaf(&self.leaf_sentinel)).count()
    }

    pub fn contains(&self, heap_id: HeapId) -> bool {
        self.index.contains_key(&heap_id)
    }

    pub fn row(&self, heap_id: HeapId) -> Option<&NodeRow> {
        self.index.get(&heap_id).and_then(|key| self.nodes.get(*key))
    }

    pub fn row_mut(&mut self, heap_id: HeapId) -> Option<&mut NodeRow> {
        self.index.get(&heap_id).and_then(|key| self.nodes.get_mut(*key))
    }

    /// Whether the node carries the leaf sentinel. Absent nodes are not leaves.
    pub fn is_leaf(&self, heap_id: HeapId) -> bool {
        self.row(heap_id).is_some_and(|row| row.is_leaf(&self.leaf_sentinel))
    }

    /// All ids present, ascending.
    pub fn heap_ids(&self) -> Vec<HeapId> {
        let mut ids: Vec<HeapId> = self.index.keys().copied().collect();
        ids.par_sort_unstable();
        ids
    }

    /// All rows, ascending by id.
    pub fn rows(&self) -> Vec<&NodeRow> {
        self.heap_ids().into_iter().filter_map(|id| self.row(id)).collect()
    }

    // =========================================================================
    // Relations
    // =========================================================================

    pub fn parent_id(&self, heap_id: HeapId) -> Option<HeapId> {
        heap_id.parent().filter(|id| self.contains(*id))
    }

    pub fn sibling_id(&self, heap_id: HeapId) -> Option<HeapId> {
        heap_id.sibling().filter(|id| self.contains(*id))
    }

    /// Children present in the frame, left child first.
    pub fn child_ids(&self, heap_id: HeapId) -> Vec<HeapId> {
        [heap_id.left_child(), heap_id.right_child()]
            .into_iter()
            .flatten()
            .filter(|id| self.contains(*id))
            .collect()
    }

    pub fn depth(&self, heap_id: HeapId) -> Option<u32> {
        self.contains(heap_id).then(|| heap_id.depth())
    }

    pub fn max_depth(&self) -> u32 {
        self.index.keys().map(|id| id.depth()).max().unwrap_or(0)
    }

    // =========================================================================
    // Display
    // =========================================================================

    fn print_frame(&self) -> String {
        let mut result: String = String::new();
        result.push_str(&format!(
            "Nodes: {}\nLeaves: {}\nDepth: {}\n\n",
            self.node_count(),
            self.leaf_count(),
            self.max_depth()
        ));

        let mut stack: Vec<HeapId> = vec![HeapId::ROOT];
        while let Some(heap_id) = stack.pop() {
            let Some(row) = self.row(heap_id) else { continue };
            result.push_str(&self.print_row(row));
            stack.extend(self.child_ids(heap_id).into_iter().rev());
        }

        result
    }

    fn print_row(&self, row: &NodeRow) -> String {
        format!(
            "{}{}) {} | n = {} | yval = {}{}\n",
            " ".repeat(row.heap_id().depth() as usize * 2),
            row.heap_id(),
            row.var(),
            row.count(),
            row.value(),
            match row.deviance() {
                Some(dev) => format!(" | dev = {dev:.3}"),
                None => String::new(),
            }
        )
    }
}

impl Display for TreeFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.print_frame())
    }
}
