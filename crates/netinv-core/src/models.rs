//! Domain models for NETINV.
//!
//! These are the core types shared across all crates.

pub mod asset;
pub mod history;
pub mod role;
pub mod status;
pub mod switch;
