//! The recursive field collector.
//!
//! `collect` walks an introspected shape in declaration order. Nested
//! records recurse with a child context; leaf fields query their source
//! annotations in priority order until one yields a value. Mapping failures
//! are soft: the offending value is logged and dropped so the record's own
//! construction path can default or reject the field.

use toml::Value;
use toml::value::Table;

use crate::context::Context;
use crate::error::LoadError;
use crate::shape::RecordShape;
use crate::shape::introspect::{FieldPlan, introspect};

/// Resolves `shape`'s fields into a name-to-value table.
///
/// The table is never null; an empty table means no field resolved a value.
pub(crate) fn collect(
    shape: &'static RecordShape,
    ctx: &mut Context<'_>,
) -> Result<Table, LoadError> {
    let plans = introspect(shape)?;
    let mut table = Table::new();
    for plan in plans {
        if plan.is_marker() {
            continue;
        }
        let mut field_ctx = ctx.enter(plan.name());
        let candidate = resolve_field(&plan, &mut field_ctx)?;
        let Some(raw) = candidate else {
            continue;
        };
        match plan.map_value(raw) {
            Ok(value) => {
                table.insert(plan.name().to_owned(), value);
            }
            Err(error) => {
                tracing::debug!(
                    field = %field_ctx.dotted(),
                    %error,
                    "discarding value the field mapper rejected"
                );
            }
        }
    }
    Ok(table)
}

/// Produces a field's candidate value, recursing into nested records.
///
/// An empty table from a nested recurse is treated as no value, so an
/// all-optional nested record with nothing resolved stays unset instead of
/// constructing a zero-valued instance.
fn resolve_field(
    plan: &FieldPlan,
    ctx: &mut Context<'_>,
) -> Result<Option<Value>, LoadError> {
    if let Some(nested) = plan.nested() {
        let inner = collect(nested(), ctx)?;
        if inner.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Value::Table(inner)));
    }
    for source in plan.annotations() {
        if !ctx.is_registered(source.kind()) {
            continue;
        }
        if let Some(value) = source.load(ctx)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}
