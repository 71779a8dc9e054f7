//! [`Dom`] implementation over the live browser document.
//!
//! Node handles are `web_sys::Node` references; mutation goes straight
//! through the platform APIs. Fallible `web_sys` calls cannot actually fail
//! for the operations the engine performs, so they end in `unwrap_throw`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, Node};

use reveal_engine::schema::dom::{Dom, NodeKind};

pub struct WebDom {
    document: Document,
}

impl WebDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn style_of(node: &Node) -> Option<CssStyleDeclaration> {
        node.dyn_ref::<HtmlElement>().map(|e| e.style())
    }
}

impl Dom for WebDom {
    type Node = Node;

    fn kind(&self, node: &Node) -> NodeKind {
        match node.node_type() {
            Node::ELEMENT_NODE => NodeKind::Element,
            Node::TEXT_NODE => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    fn tag_name(&self, node: &Node) -> Option<String> {
        node.dyn_ref::<Element>().map(|e| e.tag_name().to_lowercase())
    }

    fn parent(&self, node: &Node) -> Option<Node> {
        node.parent_node()
    }

    fn children(&self, node: &Node) -> Vec<Node> {
        let list = node.child_nodes();
        (0..list.length()).filter_map(|i| list.item(i)).collect()
    }

    fn next_sibling(&self, node: &Node) -> Option<Node> {
        node.next_sibling()
    }

    fn prev_sibling(&self, node: &Node) -> Option<Node> {
        node.previous_sibling()
    }

    fn text(&self, node: &Node) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&mut self, node: &Node, content: &str) {
        node.set_text_content(Some(content));
    }

    fn create_element(&mut self, tag: &str) -> Node {
        self.document.create_element(tag).unwrap_throw().into()
    }

    fn create_text(&mut self, content: &str) -> Node {
        self.document.create_text_node(content).into()
    }

    fn append_child(&mut self, parent: &Node, child: &Node) {
        parent.append_child(child).unwrap_throw();
    }

    fn insert_before(&mut self, parent: &Node, child: &Node, reference: Option<&Node>) {
        parent.insert_before(child, reference).unwrap_throw();
    }

    fn remove(&mut self, node: &Node) {
        if let Some(parent) = node.parent_node() {
            parent.remove_child(node).unwrap_throw();
        }
    }

    fn clone_subtree(&mut self, node: &Node) -> Node {
        node.clone_node_with_deep(true).unwrap_throw()
    }

    fn clear_children(&mut self, node: &Node) {
        while let Some(child) = node.first_child() {
            node.remove_child(&child).unwrap_throw();
        }
    }

    fn has_class(&self, node: &Node, class: &str) -> bool {
        node.dyn_ref::<Element>()
            .map(|e| e.class_list().contains(class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, node: &Node, class: &str) {
        if let Some(element) = node.dyn_ref::<Element>() {
            element.class_list().add_1(class).unwrap_throw();
        }
    }

    fn remove_class(&mut self, node: &Node, class: &str) {
        if let Some(element) = node.dyn_ref::<Element>() {
            element.class_list().remove_1(class).unwrap_throw();
        }
    }

    fn attribute(&self, node: &Node, name: &str) -> Option<String> {
        node.dyn_ref::<Element>()?.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Node, name: &str, value: &str) {
        if let Some(element) = node.dyn_ref::<Element>() {
            element.set_attribute(name, value).unwrap_throw();
        }
    }

    fn set_style(&mut self, node: &Node, property: &str, value: &str) {
        if let Some(style) = Self::style_of(node) {
            style.set_property(property, value).unwrap_throw();
        }
    }

    fn clear_style(&mut self, node: &Node) {
        if let Some(element) = node.dyn_ref::<Element>() {
            element.remove_attribute("style").unwrap_throw();
        }
    }
}
