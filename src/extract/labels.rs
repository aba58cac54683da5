use super::Placement;
use crate::TreeFloat;
use crate::model::FittedValue;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

/// Split variable name of an internal node at the node's position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub x: TreeFloat,
    pub y: TreeFloat,
    pub label: Arc<str>,
}

/// Fitted value of a leaf at the leaf's position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeafLabel {
    pub x: TreeFloat,
    pub y: TreeFloat,
    pub label: FittedValue,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct LabelTables {
    pub labels: Vec<Label>,
    pub leaf_labels: Vec<LeafLabel>,
}

/// Rounds to `digits` decimal places: scale, [`f64::round`], scale back.
///
/// Ties are broken away from zero, but a tie only exists if the scaled value
/// is exactly representable; `1.005` is stored just below `1.005` and rounds
/// to `1.0`. Values too large to scale are returned unchanged, and a
/// result of zero is always positive zero.
pub fn round_to(value: TreeFloat, digits: u8) -> TreeFloat {
    let scale = 10e0_f64.powi(i32::from(digits));
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / scale;
    if rounded == 0e0 { 0e0 } else { rounded }
}

pub(super) fn labels(placement: &Placement<'_>, leaf_sentinel: &str, digits: u8, min_len: usize) -> LabelTables {
    let (leaves, internals): (Vec<_>, Vec<_>) = placement
        .nodes
        .par_iter()
        .with_min_len(min_len)
        .partition(|placed| placed.row.is_leaf(leaf_sentinel));

    let labels = internals
        .into_iter()
        .map(|placed| Label { x: placed.point.x, y: placed.point.y, label: placed.row.var() })
        .collect();

    let leaf_labels = leaves
        .into_iter()
        .map(|placed| {
            let label = match placed.row.value() {
                FittedValue::Numeric(v) => FittedValue::Numeric(round_to(*v, digits)),
                class @ FittedValue::Class(_) => class.clone(),
            };
            LeafLabel { x: placed.point.x, y: placed.point.y, label }
        })
        .collect();

    LabelTables { labels, leaf_labels }
}
