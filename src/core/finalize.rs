/// Completion finalizer — the one-shot transition into the interactive state.
///
/// Runs on natural exhaustion and on skip alike; the session guarantees it
/// executes at most once per run. Host-side halves of the sequence (timer
/// cancellation, skip-listener detach) happen around the call.

use crate::core::collect::TextUnit;
use crate::core::proxy::ProxyBinding;
use crate::schema::contract::{
    INDICATOR_CLASS, INDICATOR_GLYPH, INDICATOR_TAG, INTERACTIVE_CLASS, PROXY_PENDING_CLASS,
    TYPING_CLASS,
};
use crate::schema::dom::{Dom, NodeKind};

/// Apply the completion sequence and return the inserted indicator.
pub fn finalize<D: Dom>(
    dom: &mut D,
    passage: &D::Node,
    units: &[TextUnit<D::Node>],
    bindings: &[ProxyBinding<D::Node>],
) -> D::Node {
    // Repair any partially typed state; a skip can land mid-character run.
    for unit in units {
        dom.set_text(&unit.node, &unit.text);
    }

    dom.remove_class(passage, TYPING_CLASS);
    dom.add_class(passage, INTERACTIVE_CLASS);

    for binding in bindings {
        dom.remove_class(&binding.proxy, PROXY_PENDING_CLASS);
    }

    let indicator = insert_indicator(dom, passage, units);
    collapse_trailing_spacing(dom, passage, &indicator);
    suppress_trailing_content(dom, passage, &indicator);
    indicator
}

/// Place the indicator glyph right after the last revealed text node, inside
/// that node's structural parent. With no text at all it lands at the
/// passage root.
fn insert_indicator<D: Dom>(
    dom: &mut D,
    passage: &D::Node,
    units: &[TextUnit<D::Node>],
) -> D::Node {
    let indicator = dom.create_element(INDICATOR_TAG);
    dom.add_class(&indicator, INDICATOR_CLASS);
    let glyph = dom.create_text(INDICATOR_GLYPH);
    dom.append_child(&indicator, &glyph);

    match units.last() {
        Some(last) => {
            let parent = dom.parent(&last.node).unwrap_or_else(|| passage.clone());
            let reference = dom.next_sibling(&last.node);
            dom.insert_before(&parent, &indicator, reference.as_ref());
        }
        None => dom.append_child(passage, &indicator),
    }
    indicator
}

/// Zero bottom margin and padding on every element between the indicator
/// and the passage container, exclusive, so block spacing rules cannot open
/// a gap under the final line.
fn collapse_trailing_spacing<D: Dom>(dom: &mut D, passage: &D::Node, indicator: &D::Node) {
    let mut ancestor = dom.parent(indicator);
    while let Some(node) = ancestor {
        if node == *passage {
            break;
        }
        dom.set_style(&node, "margin-bottom", "0");
        dom.set_style(&node, "padding-bottom", "0");
        ancestor = dom.parent(&node);
    }
}

/// Hide everything after the indicator's top-level block: trailing blank
/// structure authored after the last visible line must not appear once the
/// indicator marks the stopping point.
fn suppress_trailing_content<D: Dom>(dom: &mut D, passage: &D::Node, indicator: &D::Node) {
    let mut top = indicator.clone();
    while let Some(parent) = dom.parent(&top) {
        if parent == *passage {
            break;
        }
        top = parent;
    }

    let mut sibling = dom.next_sibling(&top);
    while let Some(node) = sibling {
        match dom.kind(&node) {
            NodeKind::Element => dom.set_style(&node, "display", "none"),
            NodeKind::Text => dom.set_text(&node, ""),
            NodeKind::Other => {}
        }
        sibling = dom.next_sibling(&node);
    }
}
