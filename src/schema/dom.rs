/// DOM abstraction — the seam between reveal semantics and a concrete tree.
///
/// The engine never touches a browser API directly; everything it needs from
/// a document is captured here. `reveal-engine-wasm` implements the trait
/// over `web_sys`, and [`crate::arena::ArenaDom`] implements it in memory
/// for tests and tooling.

/// Coarse node classification. Anything that is neither an element nor a
/// text node (comments, processing instructions) is `Other` and is left
/// untouched by every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Other,
}

/// Mutable document tree.
///
/// `Node` is a cheap handle: an arena index natively, a JS reference in the
/// browser. All mutation methods treat failure as impossible — the engine
/// has no error surface for DOM operations.
pub trait Dom {
    type Node: Clone + PartialEq;

    fn kind(&self, node: &Self::Node) -> NodeKind;
    /// Lowercase tag name; `None` for non-elements.
    fn tag_name(&self, node: &Self::Node) -> Option<String>;

    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
    fn prev_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Text content of a text node (empty for elements).
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&mut self, node: &Self::Node, content: &str);

    fn create_element(&mut self, tag: &str) -> Self::Node;
    fn create_text(&mut self, content: &str) -> Self::Node;

    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    /// Insert `child` before `reference`; append when `reference` is `None`.
    /// A child already in the tree is moved, not duplicated.
    fn insert_before(
        &mut self,
        parent: &Self::Node,
        child: &Self::Node,
        reference: Option<&Self::Node>,
    );
    fn remove(&mut self, node: &Self::Node);
    /// Deep copy of a subtree, returned detached.
    fn clone_subtree(&mut self, node: &Self::Node) -> Self::Node;
    fn clear_children(&mut self, node: &Self::Node);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&mut self, node: &Self::Node, class: &str);
    fn remove_class(&mut self, node: &Self::Node, class: &str);

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str);

    fn set_style(&mut self, node: &Self::Node, property: &str, value: &str);
    /// Drop all inline style overrides.
    fn clear_style(&mut self, node: &Self::Node);
}

/// Pre-order traversal of `root`'s descendants (root excluded), pruning any
/// element subtree rejected by `descend`.
///
/// The predicate decouples "what counts as revealable content" from the walk
/// itself: the text collector rejects choice-link subtrees, the normalizer
/// and proxy manager accept everything.
pub fn filtered_descendants<D, P>(dom: &D, root: &D::Node, descend: P) -> Vec<D::Node>
where
    D: Dom,
    P: Fn(&D, &D::Node) -> bool,
{
    let mut out = Vec::new();
    let mut stack: Vec<D::Node> = dom.children(root);
    stack.reverse();
    while let Some(node) = stack.pop() {
        if dom.kind(&node) == NodeKind::Element && !descend(dom, &node) {
            continue;
        }
        let mut kids = dom.children(&node);
        kids.reverse();
        out.push(node);
        stack.extend(kids);
    }
    out
}

/// All descendants in document order, no pruning.
pub fn descendants<D: Dom>(dom: &D, root: &D::Node) -> Vec<D::Node> {
    filtered_descendants(dom, root, |_, _| true)
}

/// Descendant elements with the given lowercase tag name.
pub fn elements_by_tag<D: Dom>(dom: &D, root: &D::Node, tag: &str) -> Vec<D::Node> {
    descendants(dom, root)
        .into_iter()
        .filter(|n| dom.tag_name(n).as_deref() == Some(tag))
        .collect()
}

/// True for a text node containing only whitespace.
pub fn is_blank_text<D: Dom>(dom: &D, node: &D::Node) -> bool {
    dom.kind(node) == NodeKind::Text && dom.text(node).trim().is_empty()
}
