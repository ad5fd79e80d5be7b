//! NETINV Core — Domain models, repository traits, and validation for
//! the network-asset inventory.

pub mod error;
pub mod models;
pub mod repository;
pub mod validate;

pub use error::{NetinvError, NetinvResult};
