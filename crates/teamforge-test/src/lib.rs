//! Shared test fixtures for teamforge crates.
//!
//! - [`players`] - player builders and deterministic pools
//! - [`relations`] - chemistry, rivalry and trio fixtures
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! teamforge-test = { workspace = true }
//! ```

pub mod players;
pub mod relations;

pub use players::{balanced_pool, pool_with_goalkeepers, rated, skill_ladder, PlayerBuilder};
pub use relations::{chemistry_web, clustered_pairs};
