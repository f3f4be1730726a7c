//! Data-driven marshalling between json objects and plain Rust records.
//!
//! A record describes itself once through [`Schema::FIELDS`], a static table of
//! [`Field`] entries: the exact json key, its semantic [`FieldKind`] and a pair of
//! functions that move one value in and out. [`from_json`] and [`to_json`] walk that table,
//! so adding a field to a record is a single table entry. Every entry is normally built
//! with the [`json_field!`](crate::json_field) macro on top of a [`FieldCodec`]
//! implementation for the field's Rust type.
//!
//! Keys that are not listed in the table are ignored on input.

use std::fmt;

use crate::arena::{Arena, ArenaError};
use crate::json::{FieldError, JsonObject, JsonWriter, SchemaError, Value, parse_bytes};

/// Semantic type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Boolean,
    Enumeration,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::Enumeration => "enumeration",
        };
        f.write_str(name)
    }
}

/// Conversion of a single field value from and to json.
pub trait FieldCodec: Sized {
    const KIND: FieldKind;

    /// `value` is `None` when the key is absent from the object.
    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError>;

    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError>;
}

impl FieldCodec for String {
    const KIND: FieldKind = FieldKind::String;

    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
        match required(value)? {
            Value::String(s) => Ok((*s).to_owned()),
            other => Err(wrong_type(Self::KIND, other)),
        }
    }

    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        writer.put_string(self)
    }
}

impl FieldCodec for f64 {
    const KIND: FieldKind = FieldKind::Number;

    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
        let value = required(value)?;
        value.as_f64().ok_or_else(|| wrong_type(Self::KIND, value))
    }

    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        writer.put_number(*self)
    }
}

impl FieldCodec for u64 {
    const KIND: FieldKind = FieldKind::Integer;

    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
        let value = required(value)?;
        let number = value.as_f64().ok_or_else(|| wrong_type(Self::KIND, value))?;
        value.as_u64().ok_or_else(|| FieldError::OutOfRange { expected: Self::KIND, value: number.to_string() })
    }

    #[allow(clippy::cast_precision_loss, reason = "json numbers are doubles")]
    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        writer.put_number(*self as f64)
    }
}

impl FieldCodec for u32 {
    const KIND: FieldKind = FieldKind::Integer;

    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
        let wide = u64::decode(value)?;
        u32::try_from(wide).map_err(|_e| FieldError::OutOfRange { expected: Self::KIND, value: wide.to_string() })
    }

    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        writer.put_number(f64::from(*self))
    }
}

impl FieldCodec for bool {
    const KIND: FieldKind = FieldKind::Boolean;

    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
        let value = required(value)?;
        value.as_bool().ok_or_else(|| wrong_type(Self::KIND, value))
    }

    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        writer.put_bool(*self)
    }
}

/// Optional fields: an absent key and an explicit `null` both decode to `None`, and
/// `None` is written back as `null`.
impl<T: FieldCodec> FieldCodec for Option<T> {
    const KIND: FieldKind = T::KIND;

    fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
        match value {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::decode(Some(value)).map(Some),
        }
    }

    fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
        match self {
            Some(inner) => inner.encode(writer),
            None => writer.put_null(),
        }
    }
}

/// Decodes a string-valued enumeration by exact match against `names`, returning the
/// variant at the same index.
pub fn decode_variant<T: Copy>(
    value: Option<&Value<'_>>,
    names: &'static [&'static str],
    variants: &[T],
) -> Result<T, FieldError> {
    let value = required(value)?;
    let text = value.as_str().ok_or_else(|| wrong_type(FieldKind::Enumeration, value))?;

    names
        .iter()
        .zip(variants)
        .find_map(|(name, variant)| (*name == text).then_some(*variant))
        .ok_or_else(|| FieldError::UnknownVariant { value: text.to_owned(), expected: names })
}

fn required<'v, 'a>(value: Option<&'v Value<'a>>) -> Result<&'v Value<'a>, FieldError> {
    value.ok_or(FieldError::Missing)
}

fn wrong_type(expected: FieldKind, found: &Value<'_>) -> FieldError {
    FieldError::WrongType { expected, found: found.type_name() }
}

/// One entry of a record's field table.
pub struct Field<E> {
    pub name: &'static str,
    pub kind: FieldKind,
    pub decode: fn(&mut E, Option<&Value<'_>>) -> Result<(), FieldError>,
    pub encode: fn(&E, &mut JsonWriter<'_>) -> Result<(), ArenaError>,
}

impl<E> fmt::Debug for Field<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).field("kind", &self.kind).finish()
    }
}

/// A record that can be marshalled through its field table.
///
/// Decoding starts from `Default::default()` and lets every field overwrite its slot.
pub trait Schema: Default + Sized + 'static {
    const FIELDS: &'static [Field<Self>];
}

/// Builds a [`Field`] entry for `$record.$member` stored under the json key `$name`.
///
/// The member type must implement [`FieldCodec`].
///
/// ```ignore
/// impl Schema for Project {
///     const FIELDS: &'static [Field<Self>] = &[
///         json_field!(Project, id: String => "Id"),
///         json_field!(Project, name: String => "Name"),
///     ];
/// }
/// ```
#[macro_export]
macro_rules! json_field {
    ($record:ty, $member:ident : $member_ty:ty => $name:literal) => {
        $crate::json::Field::<$record> {
            name: $name,
            kind: <$member_ty as $crate::json::FieldCodec>::KIND,
            decode: |record, value| {
                record.$member = <$member_ty as $crate::json::FieldCodec>::decode(value)?;
                Ok(())
            },
            encode: |record, writer| <$member_ty as $crate::json::FieldCodec>::encode(&record.$member, writer),
        }
    };
}

/// Reads a record out of a parsed json object.
///
/// # Errors
///
/// The first field that is missing or malformed is reported by name.
pub fn from_json<E: Schema>(object: &JsonObject<'_>) -> Result<E, SchemaError> {
    let mut record = E::default();
    for field in E::FIELDS {
        (field.decode)(&mut record, object.get(field.name)).map_err(|e| SchemaError::field(field.name, e))?;
    }
    Ok(record)
}

/// Parses `body` in `arena` and reads a record out of the top-level object.
pub fn from_body<'a, E: Schema>(arena: &'a Arena, body: &'a [u8]) -> Result<E, SchemaError> {
    let value = parse_bytes(arena, body)?;
    match &value {
        Value::Object(object) => from_json(object),
        other => Err(SchemaError::NotAnObject { found: other.type_name() }),
    }
}

/// Writes `record` as an object whose keys follow the field table order.
pub fn to_json<E: Schema>(record: &E, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
    writer.begin_object()?;
    for field in E::FIELDS {
        writer.put_key(field.name)?;
        (field.encode)(record, writer)?;
    }
    writer.end_object()
}

pub fn to_json_array<E: Schema>(records: &[E], writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
    writer.begin_array()?;
    for record in records {
        to_json(record, writer)?;
    }
    writer.end_array()
}
