//! Typed access to lopdf objects.
//!
//! Every accessor resolves indirect references first and reports a
//! [`MetricsError::TypeMismatch`] when the resolved object has the wrong type.

use cidmetrics_core::MetricsError;
use lopdf::{Document, Object};

/// Upper bound on `n 0 R` chains followed by [`resolve`].
const MAX_REFERENCE_DEPTH: usize = 32;

/// Resolve an indirect reference to the object it points at.
///
/// Dangling references and over-long chains resolve to the last reference
/// seen, which the typed accessors then report as a type mismatch.
pub fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    let mut current = obj;
    for _ in 0..MAX_REFERENCE_DEPTH {
        match current {
            Object::Reference(id) => match doc.get_object(*id) {
                Ok(target) => current = target,
                Err(_) => return current,
            },
            _ => return current,
        }
    }
    current
}

/// PDF type name of an object, for error messages.
pub fn kind_name(obj: &Object) -> &'static str {
    match obj {
        Object::Null => "Null",
        Object::Boolean(_) => "Boolean",
        Object::Integer(_) => "Integer",
        Object::Real(_) => "Real",
        Object::Name(_) => "Name",
        Object::String(..) => "String",
        Object::Array(_) => "Array",
        Object::Dictionary(_) => "Dictionary",
        Object::Stream(_) => "Stream",
        Object::Reference(_) => "Reference",
    }
}

/// Resolve `obj` and require a number (integer or real).
pub fn get_number(doc: &Document, obj: &Object) -> Result<f64, MetricsError> {
    match resolve(doc, obj) {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        other => Err(mismatch("Number", other)),
    }
}

/// Resolve `obj` and require an array.
pub fn get_array<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a [Object], MetricsError> {
    match resolve(doc, obj) {
        Object::Array(items) => Ok(items.as_slice()),
        other => Err(mismatch("Array", other)),
    }
}

/// Resolve `obj` and return its name bytes, if it is a name.
pub fn get_name<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a [u8]> {
    match resolve(doc, obj) {
        Object::Name(name) => Some(name),
        _ => None,
    }
}

/// Encode a number the way PDF writers conventionally do: integral values
/// as integers, everything else as reals.
pub fn number_object(value: f64) -> Object {
    // 2^53: beyond this not every integer is representable as f64.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        Object::Integer(value as i64)
    } else {
        Object::Real(value as f32)
    }
}

/// The value a number reads back as after [`number_object`].
///
/// Reals are stored as `f32`, so encoders compare values in this form to
/// make the encoding a fixed point of decode-then-encode.
pub fn wire_number(value: f64) -> f64 {
    match number_object(value) {
        Object::Integer(i) => i as f64,
        Object::Real(r) => f64::from(r),
        _ => value,
    }
}

fn mismatch(expected: &'static str, found: &Object) -> MetricsError {
    MetricsError::TypeMismatch {
        expected,
        found: kind_name(found),
    }
}
