//! Domain layer for narrative content.

pub mod entry;
pub mod store;
