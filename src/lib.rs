//! Reveal Engine — typewriter reveal for interactive-fiction passages.
//!
//! Progressively reveals a passage's narrative text character by character,
//! relocates decorative sprites, mirrors choice links into a centered proxy
//! row, and finalizes with a continue marker once typing completes or is
//! skipped. All semantics are expressed over the [`schema::dom::Dom`]
//! abstraction, so the engine runs unchanged against a live browser DOM (see
//! the `reveal-engine-wasm` crate) or the in-memory [`arena::ArenaDom`].

pub mod arena;
pub mod core;
pub mod schema;
