//! Json engine: tokenizer, parser, value tree, object table, writer and record schemas.
//!
//! Parsing borrows from its input and allocates into an [`Arena`](crate::arena::Arena).
//! Every string in a [`Value`] tree is a view into the parsed text, while array elements
//! and object slot tables are arena slices, so a tree is bounded by both borrows and a
//! body too large for the arena fails with [`JsonError::Arena`]. Escape sequences are never interpreted: a string is
//! returned exactly as it appears between its quotes, and [`JsonWriter`] writes strings
//! back verbatim.
//!
//! # Numbers
//!
//! Number tokens follow `-?digits(.digits)?([eE][+-]?digits)?` and are converted with
//! the standard `f64` parser. Whole numbers are written back without a fractional part.
//!
//! # Duplicate keys
//!
//! An object containing the same key twice is a contract violation and makes
//! [`parse`] panic. The connection loop contains such panics to the request that
//! triggered them.
//!
//! # Example
//!
//! ```
//! use bump_http::arena::Arena;
//! use bump_http::json::{JsonWriter, parse};
//!
//! let arena = Arena::new(4096);
//! let value = parse(&arena, r#"{"Id": "p-1", "Stars": 3}"#).unwrap();
//! let object = value.as_object().unwrap();
//! assert_eq!(object.get_str("Id"), Some("p-1"));
//!
//! let mut writer = JsonWriter::begin(&arena).unwrap();
//! writer.begin_array().unwrap();
//! writer.put_number(object.get_f64("Stars").unwrap()).unwrap();
//! writer.end_array().unwrap();
//! assert_eq!(writer.end(), b"[3]");
//! ```

mod error;
mod object;
mod parser;
mod schema;
mod token;
mod value;
mod writer;

pub use error::FieldError;
pub use error::JsonError;
pub use error::SchemaError;
pub use object::DEFAULT_OBJECT_CAPACITY;
pub use object::JsonObject;
pub use object::MAX_LOAD_PERCENT;
pub use object::fnv1;
pub use parser::MAX_DEPTH;
pub use parser::parse;
pub use parser::parse_bytes;
pub use schema::Field;
pub use schema::FieldCodec;
pub use schema::FieldKind;
pub use schema::Schema;
pub use schema::decode_variant;
pub use schema::from_body;
pub use schema::from_json;
pub use schema::to_json;
pub use schema::to_json_array;
pub use value::Value;
pub use writer::JsonWriter;
