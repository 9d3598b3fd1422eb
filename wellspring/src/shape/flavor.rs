//! Record flavor detection from capability markers.
//!
//! A record type opts into a construction strategy by setting marker flags
//! on its shape. Detection walks a fixed priority order and the first match
//! wins, so a type carrying both the field-table and schema markers is
//! always the defaulted-serde flavor regardless of marker declaration order.

/// Capability markers a record shape declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Markers {
    /// The type carries a per-field table with defaults.
    pub field_table: bool,
    /// The type validates and coerces through a deserialization schema.
    pub schema: bool,
    /// The type is a slot-based record rejecting undeclared fields.
    pub positional: bool,
    /// The type is constructed through a builder.
    pub builder: bool,
}

/// Construction strategies detectable from [`Markers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Field-by-field construction with per-field coercion.
    Plain,
    /// Whole-record deserialization; the schema validates and coerces.
    Serde,
    /// Whole-record deserialization after filling absent keys from defaults.
    SerdeDefaulted,
    /// Field-by-field construction that rejects undeclared fields.
    Positional,
    /// Construction through the type's builder.
    Builder,
}

impl Markers {
    /// Detects the record flavor, or `None` when no marker is set.
    #[must_use]
    pub const fn flavor(self) -> Option<Flavor> {
        if self.field_table && self.schema {
            Some(Flavor::SerdeDefaulted)
        } else if self.positional {
            Some(Flavor::Positional)
        } else if self.field_table {
            Some(Flavor::Plain)
        } else if self.schema {
            Some(Flavor::Serde)
        } else if self.builder {
            Some(Flavor::Builder)
        } else {
            None
        }
    }
}

impl Flavor {
    /// Whether scalar fields of this flavor coerce raw text themselves.
    ///
    /// The serde flavor delegates coercion to its schema, so raw values pass
    /// through untouched; every other flavor parses scalars before
    /// construction.
    #[must_use]
    pub const fn coerces_scalars(self) -> bool {
        !matches!(self, Self::Serde)
    }
}
