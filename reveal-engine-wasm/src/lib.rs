//! WASM bindings for reveal-engine — drives the typewriter on a live page.
//!
//! Owns every browser-only collaborator: the MutationObserver watching the
//! story container for passage insertions, the 30 ms `setTimeout` chain that
//! paces the reveal, the capturing skip listener, proxy click forwarding,
//! the sprite entry delay, and the startup scroll reset.

mod web_dom;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, MutationObserver,
    MutationObserverInit, MutationRecord, Node, ScrollRestoration,
};

use reveal_engine::core::session::{RevealSession, TickOutcome};
use reveal_engine::schema::contract::{
    PASSAGE_TAG, SPRITE_ENTER_DELAY_MS, STORY_TAG, TYPE_INTERVAL_MS,
};

use web_dom::WebDom;

/// One passage's run: the session plus the browser resources it holds.
/// Replaced wholesale when the next passage is inserted.
struct ActiveRun {
    session: RevealSession<WebDom>,
    timer: Option<i32>,
    tick_cb: Closure<dyn FnMut()>,
    skip_cb: Closure<dyn FnMut(Event)>,
    // Proxy forwarding closures must outlive the proxies they listen on.
    _proxy_cbs: Vec<Closure<dyn FnMut(Event)>>,
}

thread_local! {
    static RUN: RefCell<Option<ActiveRun>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() {
    let window = web_sys::window().expect_throw("no window");
    window.scroll_to_with_x_and_y(0.0, 0.0);
    // Treat every load as a fresh start rather than restoring scroll.
    if let Ok(history) = window.history() {
        let _ = history.set_scroll_restoration(ScrollRestoration::Manual);
    }

    let document = window.document().expect_throw("no document");
    if document.ready_state() == "loading" {
        let ready_doc = document.clone();
        let on_ready = Closure::once_into_js(move || init(&ready_doc));
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .unwrap_throw();
    } else {
        init(&document);
    }
}

fn init(document: &Document) {
    // Host container absent: nothing to do on this page.
    let Some(story) = document.query_selector(STORY_TAG).unwrap_throw() else {
        return;
    };
    let story: Node = story.into();

    let watched = story.clone();
    let on_mutations = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
        move |records: js_sys::Array, _observer: MutationObserver| {
            for record in records.iter() {
                let record: MutationRecord = record.unchecked_into();
                let added = record.added_nodes();
                for i in 0..added.length() {
                    if let Some(node) = added.item(i) {
                        if is_passage(&node) {
                            begin_run(&watched, &node);
                        }
                    }
                }
            }
        },
    );
    let observer = MutationObserver::new(on_mutations.as_ref().unchecked_ref()).unwrap_throw();
    let options = MutationObserverInit::new();
    options.set_child_list(true);
    observer.observe_with_options(&story, &options).unwrap_throw();
    // The observer watches for the lifetime of the page.
    on_mutations.forget();

    // Passage already present on first load (non-navigated state).
    if let Some(passage) = story
        .dyn_ref::<Element>()
        .and_then(|e| e.query_selector(PASSAGE_TAG).unwrap_throw())
    {
        begin_run(&story, &passage.into());
    }
}

fn is_passage(node: &Node) -> bool {
    node.dyn_ref::<Element>()
        .map(|e| e.tag_name().eq_ignore_ascii_case(PASSAGE_TAG))
        .unwrap_or(false)
}

fn begin_run(story: &Node, passage: &Node) {
    let document = current_document();
    teardown_previous(&document);

    let mut dom = WebDom::new(document.clone());
    let session = RevealSession::start(&mut dom, story, passage);

    let tick_cb = Closure::<dyn FnMut()>::new(run_tick);
    let skip_cb = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.stop_propagation();
        event.prevent_default();
        skip_run();
    });
    document
        .add_event_listener_with_callback_and_bool("click", skip_cb.as_ref().unchecked_ref(), true)
        .unwrap_throw();

    let proxy_cbs = wire_proxies(&session);

    RUN.with(|run| {
        *run.borrow_mut() = Some(ActiveRun {
            session,
            timer: None,
            tick_cb,
            skip_cb,
            _proxy_cbs: proxy_cbs,
        });
    });

    schedule_next_tick();
    schedule_sprite_entry(&document);
}

fn teardown_previous(document: &Document) {
    let previous = RUN.with(|run| run.borrow_mut().take());
    if let Some(run) = previous {
        if let Some(timer) = run.timer {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer);
            }
        }
        detach_skip(document, &run.skip_cb);
    }
}

fn detach_skip(document: &Document, skip_cb: &Closure<dyn FnMut(Event)>) {
    document
        .remove_event_listener_with_callback_and_bool(
            "click",
            skip_cb.as_ref().unchecked_ref(),
            true,
        )
        .unwrap_throw();
}

fn schedule_next_tick() {
    let window = web_sys::window().expect_throw("no window");
    RUN.with(|run| {
        if let Some(active) = run.borrow_mut().as_mut() {
            let id = window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    active.tick_cb.as_ref().unchecked_ref(),
                    TYPE_INTERVAL_MS as i32,
                )
                .unwrap_throw();
            active.timer = Some(id);
        }
    });
}

fn run_tick() {
    let document = current_document();
    let outcome = RUN.with(|run| {
        let mut slot = run.borrow_mut();
        let active = slot.as_mut()?;
        active.timer = None;
        let mut dom = WebDom::new(document.clone());
        Some(active.session.tick(&mut dom))
    });
    match outcome {
        Some(TickOutcome::Revealed) => schedule_next_tick(),
        Some(TickOutcome::Completed) => finish_run(&document),
        None => {}
    }
}

fn skip_run() {
    let document = current_document();
    let skipped = RUN.with(|run| {
        let mut slot = run.borrow_mut();
        let Some(active) = slot.as_mut() else {
            return false;
        };
        if let Some(timer) = active.timer.take() {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(timer);
            }
        }
        let mut dom = WebDom::new(document.clone());
        active.session.skip(&mut dom);
        true
    });
    if skipped {
        finish_run(&document);
    }
}

/// Completion housekeeping shared by natural exhaustion and skip: the skip
/// listener must never fire again for this passage.
fn finish_run(document: &Document) {
    RUN.with(|run| {
        if let Some(active) = run.borrow().as_ref() {
            detach_skip(document, &active.skip_cb);
        }
    });
}

fn wire_proxies(session: &RevealSession<WebDom>) -> Vec<Closure<dyn FnMut(Event)>> {
    let mut closures = Vec::new();
    for binding in session.bindings() {
        let proxy = binding.proxy.clone();
        let cb = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.stop_propagation();
            event.prevent_default();
            forward_proxy_click(&proxy);
        });
        binding
            .proxy
            .add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())
            .unwrap_throw();
        closures.push(cb);
    }
    closures
}

/// Forward a proxy activation to its original link. Resolution fails while
/// the passage is still typing, so early clicks do nothing.
fn forward_proxy_click(proxy: &Node) {
    let target = RUN.with(|run| {
        run.borrow()
            .as_ref()
            .and_then(|active| active.session.proxy_target(proxy))
    });
    if let Some(original) = target {
        if let Some(element) = original.dyn_ref::<HtmlElement>() {
            element.click();
        }
    }
}

fn schedule_sprite_entry(document: &Document) {
    let has_sprites = RUN.with(|run| {
        run.borrow()
            .as_ref()
            .map(|active| !active.session.sprites().is_empty())
            .unwrap_or(false)
    });
    if !has_sprites {
        return;
    }
    let window = web_sys::window().expect_throw("no window");
    let document = document.clone();
    let cb = Closure::once_into_js(move || {
        RUN.with(|run| {
            if let Some(active) = run.borrow().as_ref() {
                let mut dom = WebDom::new(document);
                active.session.mark_sprites_entered(&mut dom);
            }
        });
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            SPRITE_ENTER_DELAY_MS as i32,
        )
        .unwrap_throw();
}

fn current_document() -> Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect_throw("no document")
}
