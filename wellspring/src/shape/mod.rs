//! Static descriptors for resolvable record types.
//!
//! The derive macro generates one [`RecordShape`] per `Settings` type. The
//! shape carries the type's flavor markers, its ordered field list, and a
//! construction hook that rebuilds an instance from a resolved table and
//! reserializes it so nested results can participate in a parent table.

mod flavor;
pub(crate) mod introspect;

pub use flavor::{Flavor, Markers};

use crate::error::ConstructError;
use crate::source::Source;


/// Function returning the static shape of a record type.
///
/// Shapes reference nested shapes through this indirection so descriptor
/// construction stays lazy and cycles in type definitions cannot recurse at
/// initialisation time.
pub type Shape = fn() -> &'static RecordShape;

/// Static descriptor for one resolvable record type.
#[derive(Debug)]
pub struct RecordShape {
    /// Type name, used in diagnostics and error messages.
    pub name: &'static str,
    /// Capability markers from which the record's flavor is detected.
    pub markers: Markers,
    /// Produces the ordered field list in declaration order.
    pub fields: fn() -> Vec<FieldShape>,
    /// Builds an instance from a resolved table and reserializes it.
    pub construct: fn(toml::value::Table) -> Result<toml::Value, ConstructError>,
}

/// Descriptor for one declared field of a record type.
#[derive(Debug)]
pub struct FieldShape {
    /// Logical field identifier, unique within the owning record.
    pub name: &'static str,
    /// Declared type description.
    pub ty: TypeSpec,
    /// Ordered source annotations; order determines source priority.
    pub annotations: Vec<Source>,
}

/// Shallow description of a field's declared type.
#[derive(Debug)]
pub enum TypeSpec {
    /// A scalar value of the given kind.
    Scalar(ScalarKind),
    /// A nested record with its own shape.
    Record(Shape),
    /// An optional wrapper around another type.
    Optional(Box<TypeSpec>),
    /// A union of candidate types, at most one of which may be a record.
    Union(Vec<TypeSpec>),
    /// A non-instantiable marker type, excluded from resolution.
    Marker,
}

/// Scalar kinds the coercing flavors know how to parse from raw text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// Boolean values, parsed from `true`/`false`.
    Boolean,
    /// Signed integer values.
    Integer,
    /// Floating-point values.
    Float,
    /// String values, kept verbatim.
    String,
    /// Anything else; raw values pass through unchanged.
    Other,
}
