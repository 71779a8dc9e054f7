/// Passage fixtures — RON-described DOM trees for tests and tooling.
///
/// A fixture is the declarative form of the markup the host rendering engine
/// would insert. Tests, demos, and the preview tool instantiate fixtures
/// into an arena DOM instead of a browser.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use super::dom::Dom;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One node of a passage fixture.
///
/// ```ron
/// Element(
///     tag: "tw-passage",
///     children: [
///         Text("You wake in darkness."),
///         Element(tag: "tw-link", children: [Text("Go north")]),
///     ],
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FixtureNode {
    Element {
        tag: String,
        #[serde(default)]
        classes: Vec<String>,
        #[serde(default)]
        attrs: HashMap<String, String>,
        #[serde(default)]
        children: Vec<FixtureNode>,
    },
    Text(String),
}

impl FixtureNode {
    /// Parse a fixture from RON source.
    pub fn parse_ron(source: &str) -> Result<FixtureNode, FixtureError> {
        Ok(ron::from_str(source)?)
    }

    /// Load a fixture from a `.ron` file.
    pub fn load_from_ron(path: &Path) -> Result<FixtureNode, FixtureError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Instantiate the fixture into `dom`, returning the detached root node.
    pub fn build<D: Dom>(&self, dom: &mut D) -> D::Node {
        match self {
            FixtureNode::Text(content) => dom.create_text(content),
            FixtureNode::Element {
                tag,
                classes,
                attrs,
                children,
            } => {
                let node = dom.create_element(tag);
                for class in classes {
                    dom.add_class(&node, class);
                }
                for (name, value) in attrs {
                    dom.set_attribute(&node, name, value);
                }
                for child in children {
                    let built = child.build(dom);
                    dom.append_child(&node, &built);
                }
                node
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaDom;
    use crate::schema::dom::{elements_by_tag, NodeKind};

    #[test]
    fn parse_and_build_round_trip_structure() {
        let fixture = FixtureNode::parse_ron(
            r#"Element(
                tag: "tw-passage",
                children: [
                    Text("Hello."),
                    Element(tag: "img", classes: ["sprite"], attrs: {"src": "cat.png"}),
                    Element(tag: "tw-link", children: [Text("Onward")]),
                ],
            )"#,
        )
        .unwrap();

        let mut dom = ArenaDom::new();
        let root = fixture.build(&mut dom);
        assert_eq!(dom.tag_name(&root).as_deref(), Some("tw-passage"));
        assert_eq!(dom.children(&root).len(), 3);

        let img = elements_by_tag(&dom, &root, "img").pop().unwrap();
        assert!(dom.has_class(&img, "sprite"));
        assert_eq!(dom.attribute(&img, "src").as_deref(), Some("cat.png"));

        let text = dom.children(&root)[0].clone();
        assert_eq!(dom.kind(&text), NodeKind::Text);
        assert_eq!(dom.text(&text), "Hello.");
    }

    #[test]
    fn malformed_ron_reports_error() {
        let err = FixtureNode::parse_ron("Element(tag:").unwrap_err();
        assert!(matches!(err, FixtureError::Ron(_)));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = FixtureNode::load_from_ron(Path::new("tests/fixtures/nope.ron")).unwrap_err();
        assert!(matches!(err, FixtureError::Io(_)));
    }
}
