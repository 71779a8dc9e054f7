/// DOM contract — the fixed identifiers shared with the host page.
///
/// The host rendering engine and its stylesheet address the reveal engine
/// exclusively through these tag names, classes, and timings. None of them
/// are configurable at runtime.

/// Story container element observed for passage insertions.
pub const STORY_TAG: &str = "tw-story";

/// One narrative screen, inserted by the host rendering engine.
pub const PASSAGE_TAG: &str = "tw-passage";

/// In-passage navigation link.
pub const LINK_TAG: &str = "tw-link";

/// Tag carrying decorative sprite images.
pub const IMAGE_TAG: &str = "img";

/// Class identifying sprite images within a passage.
pub const SPRITE_CLASS: &str = "sprite";

/// Entry-transition class applied to a relocated sprite after
/// [`SPRITE_ENTER_DELAY_MS`].
pub const SPRITE_ENTER_CLASS: &str = "entered";

/// State class carried by the passage while text is being typed.
pub const TYPING_CLASS: &str = "typing";

/// State class carried by the passage once typing has finished.
/// Mutually exclusive with [`TYPING_CLASS`].
pub const INTERACTIVE_CLASS: &str = "interactive";

/// Class hiding an original choice link in place once it has a proxy.
/// The link stays in the document so the host's navigation bookkeeping
/// is undisturbed.
pub const LINK_HIDDEN_CLASS: &str = "proxied";

/// Id of the shared proxy container, kept immediately before the passage.
pub const PROXY_CONTAINER_ID: &str = "choice-proxies";

/// Tag used for the proxy container.
pub const PROXY_CONTAINER_TAG: &str = "div";

/// Class suppressing a proxy (transparent, non-interactive) until the
/// finalizer reveals it.
pub const PROXY_PENDING_CLASS: &str = "pending";

/// Tag and class of the completion indicator element.
pub const INDICATOR_TAG: &str = "span";
pub const INDICATOR_CLASS: &str = "continue-marker";

/// Glyph shown by the completion indicator.
pub const INDICATOR_GLYPH: &str = "▼";

/// Milliseconds between character reveals.
pub const TYPE_INTERVAL_MS: u32 = 30;

/// Milliseconds before a relocated sprite receives its entry class.
pub const SPRITE_ENTER_DELAY_MS: u32 = 50;

/// Elements whose trailing line breaks are upstream artifacts: a `br`
/// following one of these (across whitespace) is removed by the normalizer.
pub const SCRIPT_TAG: &str = "script";
pub const BREAK_TAG: &str = "br";
