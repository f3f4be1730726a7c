use crate::arena::ArenaError;
use crate::json::{JsonObject, JsonWriter};

/// Largest integer an `f64` represents exactly, 2^53.
pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A parsed json value.
///
/// Strings are views into the parsed input and containers are arena slices, so a tree
/// can outlive neither the buffer it was parsed from nor the arena it was built in.
#[derive(Debug, PartialEq)]
pub enum Value<'a> {
    Null,
    Bool(bool),
    Number(f64),
    String(&'a str),
    Array(&'a [Value<'a>]),
    Object(JsonObject<'a>),
}

impl<'a> Value<'a> {
    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The number as an unsigned integer, if it is a whole number that fits exactly.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= MAX_SAFE_INTEGER => Some(*n as u64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::Array(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&JsonObject<'a>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Serializes the tree. Object entries come out in slot order.
    pub fn write(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        match self {
            Value::Null => writer.put_null(),
            Value::Bool(b) => writer.put_bool(*b),
            Value::Number(n) => writer.put_number(*n),
            Value::String(s) => writer.put_string(s),
            Value::Array(elements) => {
                writer.begin_array()?;
                for element in elements.iter() {
                    element.write(writer)?;
                }
                writer.end_array()
            }
            Value::Object(object) => {
                writer.begin_object()?;
                for (key, value) in object.iter() {
                    writer.put_key(key)?;
                    value.write(writer)?;
                }
                writer.end_object()
            }
        }
    }
}
