//! Field planning for record shapes.
//!
//! Introspection turns a [`RecordShape`] into an ordered list of
//! [`FieldPlan`]s: the declared type is stripped of one optional wrapper,
//! union candidates are resolved to at most one nested record, and a value
//! mapper is selected according to the record's flavor. Each call re-walks
//! the shape; plans are never cached.

use toml::Value;

use crate::error::{ConstructError, LoadError};
use crate::source::Source;

use super::{Flavor, RecordShape, ScalarKind, Shape, TypeSpec};

/// Resolution plan for one field, produced fresh on every introspection.
#[derive(Debug)]
pub(crate) struct FieldPlan {
    name: &'static str,
    annotations: Vec<Source>,
    nested: Option<Shape>,
    mapper: Mapper,
    marker: bool,
}

/// Transformation applied to a field's raw resolved value.
#[derive(Debug)]
enum Mapper {
    /// Use the raw value unchanged.
    Passthrough,
    /// Parse raw text into the declared scalar kind.
    Scalar(ScalarKind),
    /// Rebuild a nested record from a resolved table.
    Nested(Shape),
}

impl FieldPlan {
    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn annotations(&self) -> &[Source] {
        &self.annotations
    }

    pub(crate) const fn nested(&self) -> Option<Shape> {
        self.nested
    }

    pub(crate) const fn is_marker(&self) -> bool {
        self.marker
    }

    /// Applies the field's mapper to a resolved raw value.
    ///
    /// Failures here are soft: the collector logs and discards them, leaving
    /// the field to the record constructor's own defaulting and validation.
    pub(crate) fn map_value(&self, raw: Value) -> Result<Value, ConstructError> {
        match &self.mapper {
            Mapper::Passthrough => Ok(raw),
            Mapper::Scalar(kind) => coerce_scalar(raw, *kind),
            Mapper::Nested(shape) => match raw {
                Value::Table(table) => ((shape)().construct)(table),
                other => Err(ConstructError::coerce(
                    crate::context::display_value(&other),
                    (shape)().name,
                )),
            },
        }
    }
}

/// Produces the ordered field plans for `shape`.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedType`] when the shape's markers match no
/// flavor and [`LoadError::AmbiguousUnion`] when a field's union type
/// contains more than one record member.
pub(crate) fn introspect(shape: &'static RecordShape) -> Result<Vec<FieldPlan>, LoadError> {
    let flavor = shape
        .markers
        .flavor()
        .ok_or(LoadError::UnsupportedType {
            type_name: shape.name,
        })?;
    (shape.fields)()
        .into_iter()
        .map(|field| plan_field(shape, flavor, field))
        .collect()
}

fn plan_field(
    shape: &'static RecordShape,
    flavor: Flavor,
    field: super::FieldShape,
) -> Result<FieldPlan, LoadError> {
    let super::FieldShape {
        name,
        ty,
        annotations,
    } = field;
    let (nested, mapper, marker) = match strip_optional(ty) {
        TypeSpec::Marker => (None, Mapper::Passthrough, true),
        TypeSpec::Record(nested_shape) => (Some(nested_shape), Mapper::Nested(nested_shape), false),
        TypeSpec::Union(members) => resolve_union(shape, name, &members)?,
        TypeSpec::Scalar(kind) => (None, scalar_mapper(flavor, kind), false),
        // A second optional layer carries no further type information.
        TypeSpec::Optional(_) => (None, Mapper::Passthrough, false),
    };
    Ok(FieldPlan {
        name,
        annotations,
        nested,
        mapper,
        marker,
    })
}

/// Strips exactly one optional wrapper from a type description.
fn strip_optional(ty: TypeSpec) -> TypeSpec {
    match ty {
        TypeSpec::Optional(inner) => *inner,
        other => other,
    }
}

/// Resolves a union to its sole record member, if any.
///
/// More than one record member is a configuration error. A union with no
/// record members is not a nested type; its raw values pass through to the
/// constructor unchanged.
fn resolve_union(
    shape: &'static RecordShape,
    field: &'static str,
    members: &[TypeSpec],
) -> Result<(Option<Shape>, Mapper, bool), LoadError> {
    let records: Vec<Shape> = members
        .iter()
        .filter_map(|member| match member {
            TypeSpec::Record(nested_shape) => Some(*nested_shape),
            _ => None,
        })
        .collect();
    match records.as_slice() {
        [] => Ok((None, Mapper::Passthrough, false)),
        [sole] => Ok((Some(*sole), Mapper::Nested(*sole), false)),
        more => Err(LoadError::AmbiguousUnion {
            record: shape.name,
            field,
            members: more
                .iter()
                .map(|nested_shape| (nested_shape)().name)
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

const fn scalar_mapper(flavor: Flavor, kind: ScalarKind) -> Mapper {
    if flavor.coerces_scalars() {
        Mapper::Scalar(kind)
    } else {
        Mapper::Passthrough
    }
}

/// Parses raw text into the declared scalar kind.
///
/// Non-string raw values are already structured and pass through unchanged;
/// the constructor validates them.
fn coerce_scalar(raw: Value, kind: ScalarKind) -> Result<Value, ConstructError> {
    let Value::String(text) = raw else {
        return Ok(raw);
    };
    match kind {
        ScalarKind::Boolean => {
            let parsed = match text.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            };
            parsed
                .map(Value::Boolean)
                .ok_or_else(|| ConstructError::coerce(text, "boolean"))
        }
        ScalarKind::Integer => text
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| ConstructError::coerce(text, "integer")),
        ScalarKind::Float => text
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| ConstructError::coerce(text, "float")),
        ScalarKind::String | ScalarKind::Other => Ok(Value::String(text)),
    }
}
