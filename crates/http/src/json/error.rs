use thiserror::Error;

use crate::arena::ArenaError;
use crate::json::FieldKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    #[error("unexpected end of json input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unexpected token `{found}` at offset {offset}, expected {expected}")]
    UnexpectedToken { found: String, offset: usize, expected: &'static str },

    #[error("unclosed string starting at offset {offset}")]
    UnclosedString { offset: usize },

    #[error("illegal token `{text}` at offset {offset}")]
    IllegalToken { text: String, offset: usize },

    #[error("invalid number `{text}`")]
    InvalidNumber { text: String },

    #[error("trailing characters at offset {offset}")]
    TrailingCharacters { offset: usize },

    #[error("nesting deeper than {max_depth} levels")]
    TooDeep { max_depth: usize },

    #[error("json input is not valid utf-8")]
    InvalidUtf8,

    #[error("no room left for the json tree: {source}")]
    Arena {
        #[from]
        source: ArenaError,
    },
}

impl JsonError {
    pub(crate) fn unexpected_token<S: ToString>(found: S, offset: usize, expected: &'static str) -> Self {
        Self::UnexpectedToken { found: found.to_string(), offset, expected }
    }

    pub(crate) fn illegal_token<S: ToString>(text: S, offset: usize) -> Self {
        Self::IllegalToken { text: text.to_string(), offset }
    }
}

/// A single field could not be read out of a json value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing required field")]
    Missing,

    #[error("expected {expected}, found {found}")]
    WrongType { expected: FieldKind, found: &'static str },

    #[error("value `{value}` out of range for {expected}")]
    OutOfRange { expected: FieldKind, value: String },

    #[error("unknown variant `{value}`, expected one of {expected:?}")]
    UnknownVariant { value: String, expected: &'static [&'static str] },
}

/// Failure to marshal an entity in or out of json.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid json body: {source}")]
    Json {
        #[from]
        source: JsonError,
    },

    #[error("expected a json object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("field `{name}`: {source}")]
    Field { name: &'static str, source: FieldError },

    #[error("arena error: {source}")]
    Arena {
        #[from]
        source: ArenaError,
    },
}

impl SchemaError {
    pub fn field(name: &'static str, source: FieldError) -> Self {
        Self::Field { name, source }
    }
}
