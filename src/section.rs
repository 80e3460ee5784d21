//! # Section Extractor
//!
//! Locates the ingredients section of a page and enumerates the text
//! units the engine may scale. The section starts at the first top-level
//! `h1` whose id contains one of the configured title spellings and ends
//! at the next `h1` sibling (exclusive) or at document end.
//!
//! Units are collected in document order from three sources: inline spans
//! carrying the parse attribute, every list item in any list inside the
//! section, and section top-level elements that themselves carry the
//! parse attribute. List items contribute only their own direct text so a
//! nested sub-ingredient list never leaks into the parent item's unit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScalerConfig;
use crate::document::{Document, NodeId, NodeKind};

/// One scalable text unit inside the ingredients section.
///
/// `original_text` is captured once at extraction time and never mutated;
/// it is both the scan input on every factor change and the restore
/// target for reset. Quantity tokens are always re-derived from it, never
/// cached here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientUnit {
    /// The owning document node (borrowed from the tree, not owned)
    pub node: NodeId,
    /// Immutable text captured at extraction time
    pub original_text: String,
    /// Position of this unit within the section
    pub section_order: usize,
}

/// Find the ingredients section heading, if the page has one
pub fn find_section_heading(doc: &Document, config: &ScalerConfig) -> Option<NodeId> {
    doc.children(doc.root()).iter().copied().find(|&node| {
        doc.kind(node) == NodeKind::Element
            && doc.tag(node) == "h1"
            && doc.attr(node, "id").is_some_and(|id| {
                config
                    .section_title_patterns
                    .iter()
                    .any(|pattern| id.contains(pattern.as_str()))
            })
    })
}

/// Enumerate the scalable units of the ingredients section, in document
/// order. Empty when the page has no ingredients section.
pub fn extract_units(doc: &Document, config: &ScalerConfig) -> Vec<IngredientUnit> {
    let heading = match find_section_heading(doc, config) {
        Some(h) => h,
        None => {
            debug!("No ingredients section heading found");
            return Vec::new();
        }
    };

    let mut units = Vec::new();
    let mut current = doc.next_sibling(heading);

    while let Some(node) = current {
        if doc.kind(node) == NodeKind::Element && doc.tag(node) == "h1" {
            break;
        }

        // inline spans explicitly marked for quantity parsing
        for descendant in doc.descendants(node) {
            if doc.kind(descendant) == NodeKind::Element
                && doc.tag(descendant) == "span"
                && doc.has_attr(descendant, &config.parse_attr)
            {
                push_unit(&mut units, descendant, doc.text_content(descendant));
            }
        }

        // every list item in any list, nested ones included
        if doc.is_list(node) {
            for descendant in doc.descendants(node) {
                if doc.kind(descendant) == NodeKind::Element && doc.tag(descendant) == "li" {
                    push_unit(&mut units, descendant, direct_text(doc, descendant));
                }
            }
        }

        // the section element itself may carry the parse attribute
        if doc.kind(node) == NodeKind::Element && doc.has_attr(node, &config.parse_attr) {
            push_unit(&mut units, node, doc.text_content(node));
        }

        current = doc.next_sibling(node);
    }

    debug!("Extracted {} ingredient units", units.len());
    units
}

fn push_unit(units: &mut Vec<IngredientUnit>, node: NodeId, text: String) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    units.push(IngredientUnit {
        node,
        original_text: trimmed.to_string(),
        section_order: units.len(),
    });
}

/// A node's own direct text: concatenated direct text nodes plus the
/// aggregate text of non-list element children. Nested list subtrees are
/// excluded so a parent item's unit never swallows its sub-list.
pub fn direct_text(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    for &child in doc.children(node) {
        match doc.kind(child) {
            NodeKind::Text => out.push_str(&doc.text_content(child)),
            NodeKind::Element => {
                if !doc.is_list(child) {
                    out.push_str(&doc.text_content(child));
                }
            }
        }
    }
    out
}
