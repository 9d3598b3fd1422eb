//! Type introspection helpers.
//!
//! These utilities perform shallow inspection of `syn::Type` values to
//! recognise the `Option<T>` wrapper, `PhantomData` markers, and the scalar
//! kinds the coercing flavors parse from raw text.

use syn::{GenericArgument, PathArguments, Type};

/// Scalar classification mirrored into the generated shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarClass {
    Boolean,
    Integer,
    Float,
    String,
    Other,
}

/// Extract the first type argument from a `PathArguments` container.
fn extract_first_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    let first = angle_args.args.first()?;
    let GenericArgument::Type(inner) = first else {
        return None;
    };
    Some(inner)
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    let Type::Path(p) = ty else {
        return None;
    };
    p.path.segments.last()
}

/// Returns the inner type if `ty` is `Option<T>`.
///
/// The check is shallow: it inspects only the final path segment, so
/// fully-qualified forms like `std::option::Option<T>` match, and
/// `Option<Option<T>>` yields `Option<T>` rather than `T`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    let last = last_segment(ty)?;
    if last.ident != "Option" {
        return None;
    }
    extract_first_type_argument(&last.arguments)
}

/// Returns whether `ty` is `PhantomData<T>` in any path form.
pub(crate) fn is_phantom_data(ty: &Type) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == "PhantomData")
}

/// Classifies the scalar kind of `ty` from its final path segment.
///
/// Anything unrecognised is `Other`, which the resolution engine treats as
/// a passthrough rather than an error.
pub(crate) fn scalar_class(ty: &Type) -> ScalarClass {
    let Some(segment) = last_segment(ty) else {
        return ScalarClass::Other;
    };
    match segment.ident.to_string().as_str() {
        "bool" => ScalarClass::Boolean,
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64" | "u128"
        | "usize" => ScalarClass::Integer,
        "f32" | "f64" => ScalarClass::Float,
        "String" => ScalarClass::String,
        _ => ScalarClass::Other,
    }
}
