//! Cell value coercion.
//!
//! Parsing is tolerant: only a non-numeric value in a numeric column is an
//! error. Everything else resolves to some value.

use sheetgen_model::{CoercionError, TypeTag, TypedValue};

/// Cell text that reads as null in every column type.
pub const NULL_LITERAL: &str = "None";

/// Case-insensitive spellings of `true` in a `bool` column.
pub const TRUE_LITERALS: [&str; 3] = ["true", "1", "yes"];

const LIST_SEPARATOR: char = ',';

/// Converts one raw cell into a typed value for the declared column type.
///
/// Empty cells and the literal `None` are null for every type. List cells are
/// split on `,`, elements are trimmed and empty elements dropped, so a cell of
/// only separators and whitespace is an empty list.
pub fn coerce(raw: &str, type_tag: TypeTag) -> Result<TypedValue, CoercionError> {
    if raw.is_empty() || raw == NULL_LITERAL {
        return Ok(TypedValue::Null);
    }
    let value = match type_tag {
        TypeTag::Int => TypedValue::Int(parse_int(raw)?),
        TypeTag::Float => TypedValue::Float(parse_float(raw)?),
        TypeTag::String => TypedValue::Str(raw.to_string()),
        TypeTag::Bool => TypedValue::Bool(parse_bool(raw)),
        TypeTag::IntList => TypedValue::IntList(
            list_elements(raw)
                .map(parse_int)
                .collect::<Result<_, _>>()?,
        ),
        TypeTag::FloatList => TypedValue::FloatList(
            list_elements(raw)
                .map(parse_float)
                .collect::<Result<_, _>>()?,
        ),
        TypeTag::StringList => {
            TypedValue::StrList(list_elements(raw).map(str::to_string).collect())
        }
    };
    Ok(value)
}

fn list_elements(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|element| !element.is_empty())
}

fn parse_int(raw: &str) -> Result<i32, CoercionError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|error| coercion_error(raw, TypeTag::Int, error.to_string()))
}

fn parse_float(raw: &str) -> Result<f64, CoercionError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|error| coercion_error(raw, TypeTag::Float, error.to_string()))?;
    // JSON has no representation for NaN or infinities.
    if !value.is_finite() {
        return Err(coercion_error(
            raw,
            TypeTag::Float,
            "value is not a finite number".to_string(),
        ));
    }
    Ok(value)
}

fn parse_bool(raw: &str) -> bool {
    TRUE_LITERALS
        .iter()
        .any(|literal| raw.eq_ignore_ascii_case(literal))
}

fn coercion_error(raw: &str, type_tag: TypeTag, reason: String) -> CoercionError {
    CoercionError {
        value: raw.to_string(),
        type_tag,
        reason,
    }
}
