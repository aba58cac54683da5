mod frame;
mod node;

pub use frame::{DEFAULT_LEAF_SENTINEL, NodeKey, TreeFrame};
pub use node::{FittedValue, HeapId, NodeRow};
