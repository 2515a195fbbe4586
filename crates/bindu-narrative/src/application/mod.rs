//! Application layer for narrative content.

pub mod selection;
