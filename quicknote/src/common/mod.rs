//! Common utilities shared across the QuickNote crate

/// Environment variable loading utilities
pub mod env_loader;

/// Monotonic ULID generation for note ids
pub mod ulid_generator;

pub use env_loader::{load_env_optional, load_env_parsed, load_env_string, EnvLoader};
pub use ulid_generator::{generate_monotonic_ulid, generate_monotonic_ulid_string};
