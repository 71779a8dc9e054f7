/// Shared-fixture integration: the `.ron` passages under `tests/fixtures/`
/// load, build, and run end to end.

use std::path::Path;

use reveal_engine::arena::ArenaDom;
use reveal_engine::core::session::{RevealSession, RunState, TickOutcome};
use reveal_engine::schema::contract::{INTERACTIVE_CLASS, PROXY_PENDING_CLASS};
use reveal_engine::schema::dom::{elements_by_tag, Dom};
use reveal_engine::schema::fixture::FixtureNode;

fn load(name: &str) -> (ArenaDom, reveal_engine::arena::NodeId, reveal_engine::arena::NodeId) {
    let path = format!("tests/fixtures/{name}");
    let fixture = FixtureNode::load_from_ron(Path::new(&path)).unwrap();
    let mut dom = ArenaDom::new();
    let story = dom.create_element("tw-story");
    let passage = fixture.build(&mut dom);
    dom.append_child(&story, &passage);
    (dom, story, passage)
}

#[test]
fn forest_fixture_full_run() {
    let (mut dom, story, passage) = load("forest.ron");
    let mut session = RevealSession::start(&mut dom, &story, &passage);

    // Sprite relocated, its stray break gone, both choices proxied.
    assert_eq!(session.sprites().len(), 1);
    assert_eq!(elements_by_tag(&dom, &passage, "br").len(), 1);
    assert_eq!(session.bindings().len(), 2);
    assert_eq!(
        dom.text_content(session.bindings()[0].proxy),
        "Take the left path"
    );
    assert_eq!(
        dom.text_content(session.bindings()[1].proxy),
        "Take the right path"
    );

    while session.tick(&mut dom) == TickOutcome::Revealed {}
    assert_eq!(session.state(), RunState::Interactive);
    let text: String = session.units().iter().map(|u| dom.text(&u.node)).collect();
    assert_eq!(text, "The forest path splits beneath a watchful owl.");
    assert!(dom.has_class(&passage, INTERACTIVE_CLASS));
    for binding in session.bindings() {
        assert!(!dom.has_class(&binding.proxy, PROXY_PENDING_CLASS));
    }
}

#[test]
fn ending_fixture_skip_run() {
    let (mut dom, story, passage) = load("ending.ron");
    let mut session = RevealSession::start(&mut dom, &story, &passage);
    assert!(session.bindings().is_empty());

    session.tick(&mut dom);
    session.skip(&mut dom);

    let text: String = session.units().iter().map(|u| dom.text(&u.node)).collect();
    assert_eq!(text, "And with that, the story was over.");

    // Trailing blank paragraph vanished behind the indicator.
    let paragraphs = elements_by_tag(&dom, &passage, "p");
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(dom.style(paragraphs[0], "display"), None);
    assert_eq!(dom.style(paragraphs[1], "display"), Some("none"));
}
