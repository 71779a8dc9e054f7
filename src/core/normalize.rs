/// Structural normalizer — cleanups applied before any animation state.
///
/// Upstream content generation emits a line break after every block it
/// writes, including non-visual ones (scripts, sprites). Those breaks are
/// stray and removed here. Sprites themselves render in a fixed slot at the
/// front of the story container rather than in narrative flow.

use crate::schema::contract::{
    BREAK_TAG, IMAGE_TAG, SCRIPT_TAG, SPRITE_CLASS, SPRITE_ENTER_CLASS,
};
use crate::schema::dom::{elements_by_tag, is_blank_text, Dom, NodeKind};

/// Remove every `br` whose nearest non-whitespace preceding sibling is a
/// script element or a sprite image.
pub fn remove_stray_breaks<D: Dom>(dom: &mut D, passage: &D::Node) {
    for br in elements_by_tag(dom, passage, BREAK_TAG) {
        let mut cursor = dom.prev_sibling(&br);
        while let Some(node) = &cursor {
            if !is_blank_text(dom, node) {
                break;
            }
            cursor = dom.prev_sibling(node);
        }
        let Some(node) = cursor else { continue };
        if dom.kind(&node) != NodeKind::Element {
            continue;
        }
        let stray = match dom.tag_name(&node).as_deref() {
            Some(SCRIPT_TAG) => true,
            Some(IMAGE_TAG) => dom.has_class(&node, SPRITE_CLASS),
            _ => false,
        };
        if stray {
            dom.remove(&br);
        }
    }
}

/// Move every sprite image in the passage to the front of the story
/// container. Returns the relocated sprites; the host applies the entry
/// class after the contract delay via [`mark_sprites_entered`].
pub fn relocate_sprites<D: Dom>(
    dom: &mut D,
    story: &D::Node,
    passage: &D::Node,
) -> Vec<D::Node> {
    let sprites: Vec<D::Node> = elements_by_tag(dom, passage, IMAGE_TAG)
        .into_iter()
        .filter(|img| dom.has_class(img, SPRITE_CLASS))
        .collect();
    // Anchor on the pre-relocation first child so a multi-sprite passage
    // keeps its document order at the front of the story.
    let anchor = dom.children(story).into_iter().next();
    for sprite in &sprites {
        dom.insert_before(story, sprite, anchor.as_ref());
    }
    sprites
}

/// Apply the entry-transition class to relocated sprites.
pub fn mark_sprites_entered<D: Dom>(dom: &mut D, sprites: &[D::Node]) {
    for sprite in sprites {
        dom.add_class(sprite, SPRITE_ENTER_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaDom;
    use crate::schema::fixture::FixtureNode;

    fn build(ron: &str) -> (ArenaDom, crate::arena::NodeId, crate::arena::NodeId) {
        let mut dom = ArenaDom::new();
        let story = dom.create_element("tw-story");
        let passage = FixtureNode::parse_ron(ron).unwrap().build(&mut dom);
        dom.append_child(&story, &passage);
        (dom, story, passage)
    }

    #[test]
    fn break_after_sprite_is_removed_across_whitespace() {
        let (mut dom, _story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Element(tag: "img", classes: ["sprite"]),
                Text("  "),
                Text("\n"),
                Element(tag: "br"),
                Text("Morning again."),
            ])"#,
        );
        remove_stray_breaks(&mut dom, &passage);
        assert!(elements_by_tag(&dom, &passage, "br").is_empty());
    }

    #[test]
    fn break_after_script_is_removed() {
        let (mut dom, _story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Element(tag: "script"),
                Element(tag: "br"),
                Text("Hello."),
            ])"#,
        );
        remove_stray_breaks(&mut dom, &passage);
        assert!(elements_by_tag(&dom, &passage, "br").is_empty());
    }

    #[test]
    fn break_after_text_survives() {
        let (mut dom, _story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Text("First line."),
                Element(tag: "br"),
                Text("Second line."),
            ])"#,
        );
        remove_stray_breaks(&mut dom, &passage);
        assert_eq!(elements_by_tag(&dom, &passage, "br").len(), 1);
    }

    #[test]
    fn plain_image_does_not_claim_its_break() {
        let (mut dom, _story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Element(tag: "img"),
                Element(tag: "br"),
            ])"#,
        );
        remove_stray_breaks(&mut dom, &passage);
        assert_eq!(elements_by_tag(&dom, &passage, "br").len(), 1);
    }

    #[test]
    fn sprites_move_to_story_front_and_enter_on_request() {
        let (mut dom, story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Text("A shape in the fog."),
                Element(tag: "img", classes: ["sprite"]),
            ])"#,
        );
        let sprites = relocate_sprites(&mut dom, &story, &passage);
        assert_eq!(sprites.len(), 1);
        assert_eq!(dom.children(&story)[0], sprites[0]);
        assert!(!dom.has_class(&sprites[0], SPRITE_ENTER_CLASS));

        mark_sprites_entered(&mut dom, &sprites);
        assert!(dom.has_class(&sprites[0], SPRITE_ENTER_CLASS));
    }

    #[test]
    fn two_sprites_keep_document_order() {
        let (mut dom, story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Element(tag: "img", classes: ["sprite"], attrs: {"src": "owl.png"}),
                Text("Two watchers."),
                Element(tag: "img", classes: ["sprite"], attrs: {"src": "fox.png"}),
            ])"#,
        );
        let sprites = relocate_sprites(&mut dom, &story, &passage);
        assert_eq!(sprites.len(), 2);
        let kids = dom.children(&story);
        assert_eq!(kids[0], sprites[0]);
        assert_eq!(kids[1], sprites[1]);
        assert_eq!(dom.attribute(&kids[0], "src").as_deref(), Some("owl.png"));
        assert_eq!(dom.attribute(&kids[1], "src").as_deref(), Some("fox.png"));
    }

    #[test]
    fn earlier_sprites_are_left_in_place() {
        // Relocation prepends without clearing prior passages' sprites.
        let (mut dom, story, passage) = build(
            r#"Element(tag: "tw-passage", children: [
                Element(tag: "img", classes: ["sprite"]),
            ])"#,
        );
        let stale = dom.create_element("img");
        dom.add_class(&stale, "sprite");
        let first = dom.children(&story)[0];
        dom.insert_before(&story, &stale, Some(&first));

        let sprites = relocate_sprites(&mut dom, &story, &passage);
        let kids = dom.children(&story);
        assert_eq!(kids[0], sprites[0]);
        assert!(kids.contains(&stale));
    }
}
