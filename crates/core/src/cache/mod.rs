//! Cache identity and on-disk storage of captured outputs

pub mod identifier;
pub mod output_cache;

// Re-export the main cache types
pub use identifier::{compute_identifier, flatten_path};
pub use output_cache::OutputCache;
