use std::io;
use thiserror::Error;

use crate::arena::ArenaError;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },

    #[error("can't receive request: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("can't store request: {source}")]
    Arena {
        #[from]
        source: ArenaError,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("request ended before the {part} was complete")]
    Incomplete { part: &'static str },

    #[error("invalid http method: {method}")]
    InvalidMethod { method: String },

    #[error("invalid http version: {version}")]
    InvalidVersion { version: String },

    #[error("invalid request line: {reason}")]
    InvalidRequestLine { reason: String },

    #[error("invalid header: {reason}")]
    InvalidHeader { reason: String },

    #[error("no request received")]
    Empty,

    #[error("no room for the request headers: {source}")]
    Arena {
        #[from]
        source: ArenaError,
    },
}

impl ParseError {
    pub fn incomplete(part: &'static str) -> Self {
        Self::Incomplete { part }
    }

    pub fn invalid_method(bytes: &[u8]) -> Self {
        Self::InvalidMethod { method: String::from_utf8_lossy(bytes).into_owned() }
    }

    pub fn invalid_version(bytes: &[u8]) -> Self {
        Self::InvalidVersion { version: String::from_utf8_lossy(bytes).into_owned() }
    }

    pub fn invalid_request_line<S: ToString>(str: S) -> Self {
        Self::InvalidRequestLine { reason: str.to_string() }
    }

    pub fn invalid_header<S: ToString>(str: S) -> Self {
        Self::InvalidHeader { reason: str.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("can't encode response: {source}")]
    Arena {
        #[from]
        source: ArenaError,
    },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
