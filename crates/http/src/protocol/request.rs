//! Borrowed request representation.
//!
//! A [`Request`] never owns bytes: its path, header names, header values and body are
//! views into the buffer the request was decoded from, and the header list itself is a
//! slice of the arena the request was decoded in.

use std::fmt;

use crate::protocol::{Method, Version};

/// One header line, split at the first `:`.
///
/// Names keep their wire casing and values have leading spaces and tabs removed.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> Header<'a> {
    pub fn new(name: &'a [u8], value: &'a [u8]) -> Self {
        Self { name, value }
    }
}

impl fmt::Debug for Header<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", String::from_utf8_lossy(self.name), String::from_utf8_lossy(self.value))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Request<'a> {
    method: Method,
    path: &'a [u8],
    version: Version,
    headers: &'a [Header<'a>],
    body: &'a [u8],
}

impl<'a> Request<'a> {
    pub fn new(method: Method, path: &'a [u8], version: Version, headers: &'a [Header<'a>], body: &'a [u8]) -> Self {
        Self { method, path, version, headers, body }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// The raw request target, not percent-decoded and including any query string.
    pub fn path(&self) -> &'a [u8] {
        self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// Headers in wire order; repeated names are kept as separate entries.
    pub fn headers(&self) -> &'a [Header<'a>] {
        self.headers
    }

    /// First header whose name matches `name` byte for byte.
    pub fn header(&self, name: &[u8]) -> Option<&'a [u8]> {
        self.headers.iter().find(|header| header.name == name).map(|header| header.value)
    }

    /// Everything after the blank line that ends the header section.
    pub fn body(&self) -> &'a [u8] {
        self.body
    }
}

impl fmt::Debug for Request<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &String::from_utf8_lossy(self.path))
            .field("version", &self.version)
            .field("headers", &self.headers)
            .field("body_len", &self.body.len())
            .finish()
    }
}
