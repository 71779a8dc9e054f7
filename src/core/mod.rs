//! The reveal pipeline: normalize → proxy → collect → type → finalize.

pub mod collect;
pub mod finalize;
pub mod normalize;
pub mod proxy;
pub mod session;
