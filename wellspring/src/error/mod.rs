//! Error types produced by the settings loader.

mod constructors;
mod types;

pub use types::{ConstructError, LoadError};
