/// Natural-completion walkthrough: a passage with formatting and one choice
/// typed out tick by tick, then finalized.
///
/// Run with: cargo run --example natural_run

use reveal_engine::arena::ArenaDom;
use reveal_engine::core::session::{RevealSession, TickOutcome};
use reveal_engine::schema::dom::Dom;
use reveal_engine::schema::fixture::FixtureNode;

fn main() {
    let fixture = FixtureNode::parse_ron(
        r#"Element(
            tag: "tw-passage",
            children: [
                Text("You wake in darkness. Something "),
                Element(tag: "i", children: [Text("breathes")]),
                Text(" nearby."),
                Element(tag: "tw-link", children: [Text("Strike a match")]),
            ],
        )"#,
    )
    .expect("fixture parses");

    let mut dom = ArenaDom::new();
    let story = dom.create_element("tw-story");
    let passage = fixture.build(&mut dom);
    dom.append_child(&story, &passage);

    let mut session = RevealSession::start(&mut dom, &story, &passage);
    println!(
        "typing {} units, {} choice(s) waiting\n",
        session.units().len(),
        session.bindings().len()
    );

    let mut ticks = 0;
    while session.tick(&mut dom) == TickOutcome::Revealed {
        ticks += 1;
        let frame: String = session.units().iter().map(|u| dom.text(&u.node)).collect();
        println!("{frame}");
    }

    println!("\ncompleted after {ticks} ticks ({:?})", session.state());
    for binding in session.bindings() {
        println!(
            "choice now live: {} -> forwards to original link",
            dom.text_content(binding.proxy)
        );
    }
}
