//! The generation function gateway: authenticated relay routes that stand
//! in front of the agent platform, one slug per backend.

pub mod handlers;
pub mod lyzr;

pub use lyzr::LyzrClient;
