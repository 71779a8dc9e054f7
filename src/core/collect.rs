/// Text-unit collection — decides which text the typewriter animates.
///
/// A depth-first walk of the passage that is transparent to formatting
/// elements, prunes choice-link subtrees, and captures every non-blank text
/// node together with its original content. Captured nodes are cleared in
/// place so nothing is visible before the first tick.

use crate::schema::contract::LINK_TAG;
use crate::schema::dom::{filtered_descendants, Dom, NodeKind};

/// One contiguous run of narrative text: the live node and what it said
/// before the collector blanked it.
#[derive(Debug, Clone)]
pub struct TextUnit<N> {
    pub node: N,
    pub text: String,
}

impl<N> TextUnit<N> {
    /// Number of reveal steps this unit needs.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Collect the passage's text units in document order and clear their live
/// content. Text inside choice links is excluded wholesale: it belongs to
/// the proxy manager, not the typewriter.
pub fn collect_units<D: Dom>(dom: &mut D, passage: &D::Node) -> Vec<TextUnit<D::Node>> {
    let nodes = filtered_descendants(dom, passage, |d, n| {
        d.tag_name(n).as_deref() != Some(LINK_TAG)
    });

    let mut units = Vec::new();
    for node in nodes {
        if dom.kind(&node) != NodeKind::Text {
            continue;
        }
        let text = dom.text(&node);
        if text.trim().is_empty() {
            continue;
        }
        dom.set_text(&node, "");
        units.push(TextUnit { node, text });
    }
    units
}
