use crate::arena::{ArenaError, ArenaVec};
use crate::protocol::{Status, Version};

/// Header sent with every response so browser front ends on other origins can read it.
pub const ALLOW_ORIGIN_HEADER: &[u8] = b"Access-Control-Allow-Origin: *\r\n";

/// Writes `<version> <code> <reason>\r\n`, the fixed header block, an empty line and the body.
///
/// There is no `Content-Length`: the body ends when the connection is closed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseEncoder {
    version: Version,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Exact number of bytes [`ResponseEncoder::encode`] writes for `status` and `body`.
    pub fn encoded_len(&self, status: Status, body: &[u8]) -> usize {
        self.head_len(status) + body.len()
    }

    /// Everything before the body: `"<version> <code> <reason>\r\n"`, the header and `"\r\n"`.
    pub fn head_len(&self, status: Status) -> usize {
        self.version.as_str().len() + 5 + status.reason().len() + 2 + ALLOW_ORIGIN_HEADER.len() + 2
    }

    /// The longest head over every status.
    pub fn max_head_len(&self) -> usize {
        Status::ALL.into_iter().map(|status| self.head_len(status)).max().unwrap_or_default()
    }

    pub fn encode_head(&self, status: Status, dst: &mut ArenaVec<'_, u8>) -> Result<(), ArenaError> {
        dst.push_fmt(format_args!("{} {} {}\r\n", self.version, status.code(), status.reason()))?;
        dst.extend_from_slice(ALLOW_ORIGIN_HEADER)?;
        dst.extend_from_slice(b"\r\n")
    }

    pub fn encode(&self, status: Status, body: &[u8], dst: &mut ArenaVec<'_, u8>) -> Result<(), ArenaError> {
        self.encode_head(status, dst)?;
        dst.extend_from_slice(body)
    }
}
