//! # Text Patcher
//!
//! Writes scaled (or restored) text into a unit's owning node. A list
//! item can carry a nested sub-ingredient list; naively assigning the
//! item's full text content would delete that subtree, so when a nested
//! list is present only the first text-bearing direct child outside any
//! list container is rewritten.

use tracing::trace;

use crate::document::{Document, NodeId, NodeKind};
use crate::section::IngredientUnit;

/// Write `new_text` into the unit's node and mark it as scaled
pub fn apply_text(doc: &mut Document, unit: &IngredientUnit, new_text: &str, marker_class: &str) {
    replace_direct_text(doc, unit.node, new_text);
    doc.add_class(unit.node, marker_class);
    trace!(
        "Patched unit {} -> '{}'",
        unit.section_order,
        new_text
    );
}

/// Write the unit's original text back and clear the scaled marker
pub fn restore_text(doc: &mut Document, unit: &IngredientUnit, marker_class: &str) {
    replace_direct_text(doc, unit.node, &unit.original_text);
    doc.remove_class(unit.node, marker_class);
    trace!("Restored unit {}", unit.section_order);
}

/// Replace a node's own text while preserving any nested list subtree.
///
/// With a nested list present, only the node's immediate children are
/// walked: the first text node or non-list element child with non-blank
/// content is rewritten and the walk stops. Without a nested list the
/// node's entire text content is replaced directly.
fn replace_direct_text(doc: &mut Document, node: NodeId, new_text: &str) {
    if !doc.contains_list(node) {
        doc.set_text_content(node, new_text);
        return;
    }

    let children: Vec<NodeId> = doc.children(node).to_vec();
    for child in children {
        match doc.kind(child) {
            NodeKind::Text => {
                if !doc.text_content(child).trim().is_empty() {
                    doc.set_text_content(child, new_text);
                    return;
                }
            }
            NodeKind::Element => {
                if !doc.is_list(child) && !doc.text_content(child).trim().is_empty() {
                    doc.set_text_content(child, new_text);
                    return;
                }
            }
        }
    }
}
