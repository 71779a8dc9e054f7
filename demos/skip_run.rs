/// Skip walkthrough: the reader clicks five characters in; the full text
/// appears at once and the choices unlock immediately.
///
/// Run with: cargo run --example skip_run

use reveal_engine::arena::ArenaDom;
use reveal_engine::core::session::RevealSession;
use reveal_engine::schema::dom::Dom;
use reveal_engine::schema::fixture::FixtureNode;

fn main() {
    let fixture = FixtureNode::parse_ron(
        r#"Element(
            tag: "tw-passage",
            children: [
                Text("The corridor stretches on and on, far past the reach of the lantern."),
                Element(tag: "tw-link", children: [Text("Keep walking")]),
                Element(tag: "tw-link", children: [Text("Turn back")]),
            ],
        )"#,
    )
    .expect("fixture parses");

    let mut dom = ArenaDom::new();
    let story = dom.create_element("tw-story");
    let passage = fixture.build(&mut dom);
    dom.append_child(&story, &passage);

    let mut session = RevealSession::start(&mut dom, &story, &passage);
    for _ in 0..5 {
        session.tick(&mut dom);
    }
    let partial: String = session.units().iter().map(|u| dom.text(&u.node)).collect();
    println!("before the click: {partial:?}");

    session.skip(&mut dom);

    let full: String = session.units().iter().map(|u| dom.text(&u.node)).collect();
    println!("after the click:  {full:?}");
    println!("state: {:?}", session.state());
    for binding in session.bindings() {
        let target = session.proxy_target(&binding.proxy);
        println!(
            "{} -> {}",
            dom.text_content(binding.proxy),
            if target.is_some() { "live" } else { "suppressed" }
        );
    }
}
