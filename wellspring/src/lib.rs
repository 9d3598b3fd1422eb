//! Core crate for the `wellspring` settings framework.
//!
//! `wellspring` binds declaratively-annotated record types to values drawn
//! from environment variables, mounted secret files, and TOML documents.
//! The derive macro in the companion `wellspring_macros` crate generates a
//! static [`RecordShape`] per type; the resolution engine walks that shape
//! recursively, queries each field's sources in priority order, and hands
//! the assembled values to the record's own construction path.
//!
//! ```rust,no_run
//! use serde::{Deserialize, Serialize};
//! use wellspring::{Settings, load_settings};
//!
//! #[derive(Debug, Serialize, Deserialize, Settings)]
//! #[setting(flavor = "plain")]
//! struct AppConfig {
//!     #[setting(env("APP_PORT"))]
//!     port: u16,
//!     #[setting(env("APP_HOST"))]
//!     host: String,
//! }
//!
//! # fn run() -> Result<(), wellspring::LoadError> {
//! let config: AppConfig = load_settings()?;
//! # Ok(())
//! # }
//! ```

pub use wellspring_macros::Settings;

mod collect;
mod context;
mod error;
mod load;
mod shape;
mod source;

pub use error::{ConstructError, LoadError};
pub use load::{DEFAULT_DELIMITER, Loader, load_settings};
pub use shape::{FieldShape, Flavor, Markers, RecordShape, ScalarKind, Shape, TypeSpec};
pub use source::secret::DEFAULT_SECRET_DIR;
pub use source::{EnvSource, SecretSource, Source, SourceKind, TomlSource};

/// Re-export of the TOML value model used by generated code.
pub use toml;

/// Trait implemented for record types the resolution engine can load.
///
/// Deriving `Settings` generates both methods; builder-pattern records
/// implement the trait by hand. Derived implementations also require
/// `serde::Serialize` and `serde::Deserialize`, since construction and
/// nested reserialization go through serde.
pub trait Settings: Sized {
    /// The static shape descriptor driving introspection for this type.
    fn shape() -> &'static RecordShape;

    /// Constructs an instance from a resolved name-to-value table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructError`] when the table is missing required
    /// fields or contains values the type rejects.
    fn from_table(table: toml::value::Table) -> Result<Self, ConstructError>;
}
