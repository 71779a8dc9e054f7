/// Reveal session — one passage's typewriter run as an explicit object.
///
/// Owns everything a run touches: the text units and reveal cursor, the
/// proxy bindings, the relocated sprites, and the two-state machine
/// `Typing → Interactive`. The host owns the clock: it calls [`tick`] on the
/// contract cadence and [`skip`] from its capturing click listener, and
/// stops scheduling once either reports [`TickOutcome::Completed`].
///
/// [`tick`]: RevealSession::tick
/// [`skip`]: RevealSession::skip

use crate::core::collect::{collect_units, TextUnit};
use crate::core::finalize::finalize;
use crate::core::normalize::{mark_sprites_entered, relocate_sprites, remove_stray_breaks};
use crate::core::proxy::{build_proxies, ProxyBinding};
use crate::schema::contract::TYPING_CLASS;
use crate::schema::dom::Dom;

/// The passage's visual state. Exactly one of the two holds at any instant,
/// mirrored by the state classes on the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Typing,
    Interactive,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One character revealed; schedule another tick.
    Revealed,
    /// The run is finalized; stop scheduling.
    Completed,
}

#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    unit: usize,
    chars: usize,
}

pub struct RevealSession<D: Dom> {
    passage: D::Node,
    units: Vec<TextUnit<D::Node>>,
    bindings: Vec<ProxyBinding<D::Node>>,
    container: D::Node,
    sprites: Vec<D::Node>,
    cursor: Cursor,
    state: RunState,
    indicator: Option<D::Node>,
}

impl<D: Dom> RevealSession<D> {
    /// Prepare a freshly inserted passage: normalize structure, build the
    /// choice proxies, capture and blank the text, and enter the typing
    /// state. The first tick is due one interval after this returns.
    pub fn start(dom: &mut D, story: &D::Node, passage: &D::Node) -> Self {
        remove_stray_breaks(dom, passage);
        let sprites = relocate_sprites(dom, story, passage);
        let (container, bindings) = build_proxies(dom, story, passage);
        let units = collect_units(dom, passage);
        dom.add_class(passage, TYPING_CLASS);

        RevealSession {
            passage: passage.clone(),
            units,
            bindings,
            container,
            sprites,
            cursor: Cursor::default(),
            state: RunState::Typing,
            indicator: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Reveal the next character, or finalize when every unit is exhausted.
    /// Characters appear strictly left-to-right within a unit, units
    /// strictly in document order.
    pub fn tick(&mut self, dom: &mut D) -> TickOutcome {
        if self.state == RunState::Interactive {
            return TickOutcome::Completed;
        }
        if self.cursor.unit >= self.units.len() {
            self.complete(dom);
            return TickOutcome::Completed;
        }

        let unit = &self.units[self.cursor.unit];
        self.cursor.chars += 1;
        let revealed = prefix_chars(&unit.text, self.cursor.chars);
        dom.set_text(&unit.node, revealed);

        if self.cursor.chars >= unit.char_len() {
            self.cursor.unit += 1;
            self.cursor.chars = 0;
        }
        TickOutcome::Revealed
    }

    /// Cut the run short. Equivalent to natural completion in final visual
    /// outcome; a no-op once interactive.
    pub fn skip(&mut self, dom: &mut D) {
        if self.state == RunState::Typing {
            self.complete(dom);
        }
    }

    fn complete(&mut self, dom: &mut D) {
        let indicator = finalize(dom, &self.passage, &self.units, &self.bindings);
        self.indicator = Some(indicator);
        self.state = RunState::Interactive;
    }

    /// Resolve a proxy to the original link it forwards to. `None` while
    /// typing: choices cannot be activated before the text finishes.
    pub fn proxy_target(&self, proxy: &D::Node) -> Option<D::Node> {
        if self.state != RunState::Interactive {
            return None;
        }
        self.bindings
            .iter()
            .find(|b| b.proxy == *proxy)
            .map(|b| b.original.clone())
    }

    /// Sprites awaiting their entry transition; the host applies it after
    /// the contract delay.
    pub fn sprites(&self) -> &[D::Node] {
        &self.sprites
    }

    pub fn mark_sprites_entered(&self, dom: &mut D) {
        mark_sprites_entered(dom, &self.sprites);
    }

    pub fn units(&self) -> &[TextUnit<D::Node>] {
        &self.units
    }

    pub fn bindings(&self) -> &[ProxyBinding<D::Node>] {
        &self.bindings
    }

    pub fn container(&self) -> &D::Node {
        &self.container
    }

    pub fn indicator(&self) -> Option<&D::Node> {
        self.indicator.as_ref()
    }
}

/// Prefix of `s` holding its first `n` characters.
fn prefix_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaDom;
    use crate::schema::fixture::FixtureNode;

    fn start(ron: &str) -> (ArenaDom, RevealSession<ArenaDom>, crate::arena::NodeId) {
        let mut dom = ArenaDom::new();
        let story = dom.create_element("tw-story");
        let passage = FixtureNode::parse_ron(ron).unwrap().build(&mut dom);
        dom.append_child(&story, &passage);
        let session = RevealSession::start(&mut dom, &story, &passage);
        (dom, session, passage)
    }

    #[test]
    fn ticks_equal_char_count_plus_finalizing_tick() {
        let (mut dom, mut session, _) =
            start(r#"Element(tag: "tw-passage", children: [Text("Hi!")])"#);
        assert_eq!(session.tick(&mut dom), TickOutcome::Revealed);
        assert_eq!(session.tick(&mut dom), TickOutcome::Revealed);
        assert_eq!(session.tick(&mut dom), TickOutcome::Revealed);
        assert_eq!(session.state(), RunState::Typing);
        assert_eq!(session.tick(&mut dom), TickOutcome::Completed);
        assert_eq!(session.state(), RunState::Interactive);
    }

    #[test]
    fn prefix_grows_one_character_per_tick() {
        let (mut dom, mut session, _) =
            start(r#"Element(tag: "tw-passage", children: [Text("abc")])"#);
        let node = session.units()[0].node;
        session.tick(&mut dom);
        assert_eq!(dom.text(&node), "a");
        session.tick(&mut dom);
        assert_eq!(dom.text(&node), "ab");
        session.tick(&mut dom);
        assert_eq!(dom.text(&node), "abc");
    }

    #[test]
    fn multibyte_text_reveals_on_scalar_boundaries() {
        let (mut dom, mut session, _) =
            start(r#"Element(tag: "tw-passage", children: [Text("héllo…")])"#);
        let node = session.units()[0].node;
        session.tick(&mut dom);
        session.tick(&mut dom);
        assert_eq!(dom.text(&node), "hé");
        while session.tick(&mut dom) == TickOutcome::Revealed {}
        assert_eq!(dom.text(&node), "héllo…");
    }

    #[test]
    fn empty_passage_completes_on_first_tick() {
        let (mut dom, mut session, _) =
            start(r#"Element(tag: "tw-passage", children: [Text("   ")])"#);
        assert!(session.units().is_empty());
        assert_eq!(session.tick(&mut dom), TickOutcome::Completed);
        assert_eq!(session.state(), RunState::Interactive);
    }

    #[test]
    fn tick_after_completion_stays_completed() {
        let (mut dom, mut session, _) =
            start(r#"Element(tag: "tw-passage", children: [Text("x")])"#);
        while session.tick(&mut dom) == TickOutcome::Revealed {}
        assert_eq!(session.tick(&mut dom), TickOutcome::Completed);
        assert_eq!(session.tick(&mut dom), TickOutcome::Completed);
    }
}
