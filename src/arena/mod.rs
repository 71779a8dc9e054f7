//! Arena-backed in-memory DOM.
//!
//! The native implementation of [`Dom`]: nodes live in a flat `Vec`, handles
//! are indices. Detached or removed nodes keep their slot; a reveal run
//! allocates a handful of nodes, so slot reuse is not worth the bookkeeping.

use rustc_hash::FxHashMap;

use crate::schema::dom::{Dom, NodeKind};

/// Handle into an [`ArenaDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attrs: FxHashMap<String, String>,
    styles: FxHashMap<String, String>,
}

#[derive(Debug, Clone)]
enum Payload {
    Element(ElementData),
    Text(String),
}

#[derive(Debug, Clone)]
struct Entry {
    payload: Payload,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct ArenaDom {
    nodes: Vec<Entry>,
}

impl ArenaDom {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, payload: Payload) -> NodeId {
        self.nodes.push(Entry {
            payload,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    fn entry(&self, id: NodeId) -> &Entry {
        &self.nodes[id.0]
    }

    fn entry_mut(&mut self, id: NodeId) -> &mut Entry {
        &mut self.nodes[id.0]
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.entry(id).payload {
            Payload::Element(data) => Some(data),
            Payload::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.entry_mut(id).payload {
            Payload::Element(data) => Some(data),
            Payload::Text(_) => None,
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.entry(id).parent {
            self.entry_mut(parent).children.retain(|c| *c != id);
            self.entry_mut(id).parent = None;
        }
    }

    fn sibling(&self, id: NodeId, offset: isize) -> Option<NodeId> {
        let parent = self.entry(id).parent?;
        let siblings = &self.entry(parent).children;
        let pos = siblings.iter().position(|c| *c == id)? as isize + offset;
        if pos < 0 {
            return None;
        }
        siblings.get(pos as usize).copied()
    }

    /// True once a node has been removed from (or never attached to) the tree.
    pub fn is_detached(&self, id: NodeId) -> bool {
        self.entry(id).parent.is_none()
    }

    /// Inline style value, for assertions.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?.styles.get(property).map(String::as_str)
    }

    /// Concatenated text of a subtree in document order. Raw: does not apply
    /// `display:none`, so hidden-but-present content still counts.
    pub fn text_content(&self, id: NodeId) -> String {
        match &self.entry(id).payload {
            Payload::Text(content) => content.clone(),
            Payload::Element(_) => self
                .entry(id)
                .children
                .iter()
                .map(|c| self.text_content(*c))
                .collect(),
        }
    }
}

impl Dom for ArenaDom {
    type Node = NodeId;

    fn kind(&self, node: &NodeId) -> NodeKind {
        match self.entry(*node).payload {
            Payload::Element(_) => NodeKind::Element,
            Payload::Text(_) => NodeKind::Text,
        }
    }

    fn tag_name(&self, node: &NodeId) -> Option<String> {
        self.element(*node).map(|e| e.tag.clone())
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.entry(*node).parent
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.entry(*node).children.clone()
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.sibling(*node, 1)
    }

    fn prev_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.sibling(*node, -1)
    }

    fn text(&self, node: &NodeId) -> String {
        match &self.entry(*node).payload {
            Payload::Text(content) => content.clone(),
            Payload::Element(_) => String::new(),
        }
    }

    fn set_text(&mut self, node: &NodeId, content: &str) {
        if let Payload::Text(existing) = &mut self.entry_mut(*node).payload {
            *existing = content.to_string();
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Payload::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
            attrs: FxHashMap::default(),
            styles: FxHashMap::default(),
        }))
    }

    fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Payload::Text(content.to_string()))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        self.insert_before(parent, child, None);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: Option<&NodeId>) {
        self.detach(*child);
        let children = &mut self.entry_mut(*parent).children;
        match reference.and_then(|r| children.iter().position(|c| c == r)) {
            Some(pos) => children.insert(pos, *child),
            None => children.push(*child),
        }
        self.entry_mut(*child).parent = Some(*parent);
    }

    fn remove(&mut self, node: &NodeId) {
        self.detach(*node);
    }

    fn clone_subtree(&mut self, node: &NodeId) -> NodeId {
        let copy = match self.entry(*node).payload.clone() {
            Payload::Text(content) => self.alloc(Payload::Text(content)),
            Payload::Element(data) => self.alloc(Payload::Element(data)),
        };
        for child in self.entry(*node).children.clone() {
            let child_copy = self.clone_subtree(&child);
            self.append_child(&copy, &child_copy);
        }
        copy
    }

    fn clear_children(&mut self, node: &NodeId) {
        for child in self.entry(*node).children.clone() {
            self.detach(child);
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.element(*node)
            .map(|e| e.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if !self.has_class(node, class) {
            if let Some(element) = self.element_mut(*node) {
                element.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(element) = self.element_mut(*node) {
            element.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.element(*node)?.attrs.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(*node) {
            element.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn set_style(&mut self, node: &NodeId, property: &str, value: &str) {
        if let Some(element) = self.element_mut(*node) {
            element
                .styles
                .insert(property.to_string(), value.to_string());
        }
    }

    fn clear_style(&mut self, node: &NodeId) {
        if let Some(element) = self.element_mut(*node) {
            element.styles.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_before_moves_an_attached_node() {
        let mut dom = ArenaDom::new();
        let root = dom.create_element("div");
        let a = dom.create_text("a");
        let b = dom.create_text("b");
        dom.append_child(&root, &a);
        dom.append_child(&root, &b);
        // Re-seating b before a must not duplicate it.
        dom.insert_before(&root, &b, Some(&a));
        assert_eq!(dom.children(&root), vec![b, a]);
        assert_eq!(dom.text_content(root), "ba");
    }

    #[test]
    fn clone_subtree_is_deep_and_detached() {
        let mut dom = ArenaDom::new();
        let link = dom.create_element("tw-link");
        dom.add_class(&link, "fancy");
        let label = dom.create_text("Go north");
        dom.append_child(&link, &label);

        let copy = dom.clone_subtree(&link);
        assert!(dom.is_detached(copy));
        assert!(dom.has_class(&copy, "fancy"));
        assert_eq!(dom.text_content(copy), "Go north");

        // Mutating the copy leaves the original alone.
        let copy_label = dom.children(&copy)[0];
        dom.set_text(&copy_label, "elsewhere");
        assert_eq!(dom.text_content(link), "Go north");
    }

    #[test]
    fn clear_children_detaches_everything() {
        let mut dom = ArenaDom::new();
        let root = dom.create_element("div");
        let a = dom.create_text("a");
        let b = dom.create_element("b");
        dom.append_child(&root, &a);
        dom.append_child(&root, &b);
        dom.clear_children(&root);
        assert!(dom.children(&root).is_empty());
        assert!(dom.is_detached(a));
        assert!(dom.is_detached(b));
    }

    #[test]
    fn sibling_navigation() {
        let mut dom = ArenaDom::new();
        let root = dom.create_element("div");
        let a = dom.create_text("a");
        let b = dom.create_text("b");
        dom.append_child(&root, &a);
        dom.append_child(&root, &b);
        assert_eq!(dom.next_sibling(&a), Some(b));
        assert_eq!(dom.prev_sibling(&b), Some(a));
        assert_eq!(dom.next_sibling(&b), None);
        assert_eq!(dom.prev_sibling(&a), None);
    }

    #[test]
    fn classes_and_styles_only_apply_to_elements() {
        let mut dom = ArenaDom::new();
        let text = dom.create_text("t");
        dom.add_class(&text, "x");
        dom.set_style(&text, "display", "none");
        assert!(!dom.has_class(&text, "x"));
        assert_eq!(dom.style(text, "display"), None);
    }
}
