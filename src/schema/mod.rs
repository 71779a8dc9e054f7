//! Data-model layer: the host DOM contract, the tree abstraction the engine
//! runs against, and the RON fixture format used off-browser.

pub mod contract;
pub mod dom;
pub mod fixture;
