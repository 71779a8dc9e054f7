/// Preview — replay a reveal run against a passage fixture in the terminal.
///
/// Usage: preview <fixture.ron> [--skip-after <ticks>] [--delay <ms>] [--quiet]
///
///   --skip-after <ticks>  Inject a skip click after N ticks
///   --delay <ms>          Sleep between ticks (0 = as fast as possible)
///   --quiet               Suppress per-tick frames, print the summary only

use std::path::Path;
use std::time::Duration;

use reveal_engine::arena::ArenaDom;
use reveal_engine::core::session::{RevealSession, RunState, TickOutcome};
use reveal_engine::schema::contract::{PASSAGE_TAG, STORY_TAG};
use reveal_engine::schema::dom::Dom;
use reveal_engine::schema::fixture::FixtureNode;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let fixture_path = args[1].clone();
    let mut skip_after: Option<usize> = None;
    let mut delay_ms: u64 = 0;
    let mut quiet = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--skip-after" if i + 1 < args.len() => {
                i += 1;
                skip_after = args[i].parse().ok();
            }
            "--delay" if i + 1 < args.len() => {
                i += 1;
                delay_ms = args[i].parse().unwrap_or(0);
            }
            "--quiet" => quiet = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let fixture = match FixtureNode::load_from_ron(Path::new(&fixture_path)) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("ERROR loading fixture {}: {}", fixture_path, e);
            std::process::exit(1);
        }
    };

    let mut dom = ArenaDom::new();
    let story = dom.create_element(STORY_TAG);
    let passage = fixture.build(&mut dom);
    if dom.tag_name(&passage).as_deref() != Some(PASSAGE_TAG) {
        eprintln!(
            "WARNING: fixture root is <{}>, expected <{}>",
            dom.tag_name(&passage).unwrap_or_else(|| "text".into()),
            PASSAGE_TAG
        );
    }
    dom.append_child(&story, &passage);

    let mut session = RevealSession::start(&mut dom, &story, &passage);
    println!(
        "Loaded {} ({} text units, {} choices, {} sprites)",
        fixture_path,
        session.units().len(),
        session.bindings().len(),
        session.sprites().len()
    );
    session.mark_sprites_entered(&mut dom);

    let mut ticks = 0usize;
    loop {
        if skip_after == Some(ticks) {
            println!("[tick {:04}] *click* — skipping", ticks);
            session.skip(&mut dom);
            break;
        }
        match session.tick(&mut dom) {
            TickOutcome::Revealed => {
                ticks += 1;
                if !quiet {
                    let frame: String = session
                        .units()
                        .iter()
                        .map(|u| dom.text(&u.node))
                        .collect();
                    println!("[tick {:04}] {}", ticks, frame);
                }
                if delay_ms > 0 {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                }
            }
            TickOutcome::Completed => break,
        }
    }

    println!("\n--- Final state ---");
    println!("state: {:?}", session.state());
    assert_eq!(session.state(), RunState::Interactive);
    let full: String = session.units().iter().map(|u| u.text.as_str()).collect();
    println!("text: {}", full);
    for binding in session.bindings() {
        println!("choice: {}", dom.text_content(binding.proxy));
    }
    println!(
        "indicator: {}",
        if session.indicator().is_some() {
            "inserted"
        } else {
            "missing"
        }
    );
}

fn print_usage() {
    println!("Preview — replay a reveal run against a passage fixture in the terminal.");
    println!();
    println!("Usage: preview <fixture.ron> [--skip-after <ticks>] [--delay <ms>] [--quiet]");
    println!();
    println!("  --skip-after <ticks>  Inject a skip click after N ticks");
    println!("  --delay <ms>          Sleep between ticks (0 = as fast as possible)");
    println!("  --quiet               Suppress per-tick frames, print the summary only");
}
