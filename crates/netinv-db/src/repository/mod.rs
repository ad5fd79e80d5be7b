//! SurrealDB repository implementations.

mod asset;
mod history;
mod switch;
mod uniqueness;

pub use asset::SurrealAssetRepository;
pub use history::SurrealStatusHistoryRepository;
pub use switch::SurrealSwitchRepository;

/// Web forms submit empty strings for untouched optional inputs;
/// treat those as absent.
pub(crate) fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
