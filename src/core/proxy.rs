/// Choice proxy manager — centered duplicates of in-passage links.
///
/// Originals stay in the document (hidden in place) so the host's
/// navigation bookkeeping sees them exactly where it put them; the proxies
/// live in one shared container kept immediately before the passage and are
/// revealed only by the finalizer.

use crate::schema::contract::{
    LINK_HIDDEN_CLASS, LINK_TAG, PROXY_CONTAINER_ID, PROXY_CONTAINER_TAG, PROXY_PENDING_CLASS,
};
use crate::schema::dom::{elements_by_tag, Dom, NodeKind};

/// A proxy and the original link it forwards to.
#[derive(Debug, Clone)]
pub struct ProxyBinding<N> {
    pub proxy: N,
    pub original: N,
}

/// Build one suppressed proxy per choice link, in document order. Returns
/// the shared container and the bindings the host wires click forwarding to.
pub fn build_proxies<D: Dom>(
    dom: &mut D,
    story: &D::Node,
    passage: &D::Node,
) -> (D::Node, Vec<ProxyBinding<D::Node>>) {
    let container = ensure_container(dom, story, passage);

    let mut bindings = Vec::new();
    for original in elements_by_tag(dom, passage, LINK_TAG) {
        let proxy = dom.clone_subtree(&original);
        dom.add_class(&proxy, PROXY_PENDING_CLASS);
        dom.append_child(&container, &proxy);
        dom.add_class(&original, LINK_HIDDEN_CLASS);
        bindings.push(ProxyBinding { proxy, original });
    }
    (container, bindings)
}

/// Find or create the shared proxy container, cleared of the previous
/// passage's proxies and of any leftover inline positioning, and re-seated
/// immediately before the current passage.
fn ensure_container<D: Dom>(dom: &mut D, story: &D::Node, passage: &D::Node) -> D::Node {
    let existing = dom.children(story).into_iter().find(|n| {
        dom.kind(n) == NodeKind::Element
            && dom.attribute(n, "id").as_deref() == Some(PROXY_CONTAINER_ID)
    });
    let container = match existing {
        Some(node) => node,
        None => {
            let node = dom.create_element(PROXY_CONTAINER_TAG);
            dom.set_attribute(&node, "id", PROXY_CONTAINER_ID);
            node
        }
    };
    dom.clear_children(&container);
    dom.clear_style(&container);
    dom.insert_before(story, &container, Some(passage));
    container
}
