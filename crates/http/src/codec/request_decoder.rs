//! HTTP request decoder.
//!
//! Decodes a complete request out of a single received buffer in one forward pass:
//!
//! 1. the method, up to the first space, matched case-sensitively
//! 2. the path, up to the next space, kept raw
//! 3. the version, up to `\r`, which must be `HTTP/1.1` and be followed by `\n`
//! 4. header lines `name ':' value \r\n` until an empty line
//! 5. the body: every byte after the empty line
//!
//! Nothing is copied. The returned [`Request`] borrows the buffer, and the header list is
//! allocated in the arena passed to [`RequestDecoder::decode`], so the request cannot
//! outlive the next arena reset.
//!
//! # Example
//!
//! ```
//! use bump_http::arena::Arena;
//! use bump_http::codec::RequestDecoder;
//! use bump_http::protocol::Method;
//!
//! let arena = Arena::new(1024);
//! let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
//! assert_eq!(request.method(), Method::Get);
//! assert_eq!(request.path(), b"/");
//! assert_eq!(request.header(b"Host"), Some(&b"x"[..]));
//! ```

use tracing::trace;

use crate::arena::{Arena, ArenaVec};
use crate::ensure;
use crate::protocol::{Header, Method, ParseError, Request, Version};

const CRLF: &[u8] = b"\r\n";

#[derive(Debug, Default, Clone, Copy)]
pub struct RequestDecoder;

impl RequestDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes one request out of `src`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when `src` is empty, truncated before the end of the
    /// header section, or malformed at any step. Running out of arena while collecting
    /// headers is [`ParseError::Arena`].
    pub fn decode<'a>(&self, arena: &'a Arena, src: &'a [u8]) -> Result<Request<'a>, ParseError> {
        ensure!(!src.is_empty(), ParseError::Empty);

        let (method, rest) = split_once(src, b' ').ok_or(ParseError::incomplete("method"))?;
        let method = Method::from_bytes(method).ok_or_else(|| ParseError::invalid_method(method))?;

        let (path, rest) = split_once(rest, b' ').ok_or(ParseError::incomplete("path"))?;
        ensure!(!path.is_empty(), ParseError::invalid_request_line("empty path"));

        let (version, rest) = split_once(rest, b'\r').ok_or(ParseError::incomplete("version"))?;
        let version = Version::from_bytes(version).ok_or_else(|| ParseError::invalid_version(version))?;
        let mut rest = expect_line_feed(rest, "request line")?;

        let mut headers = ArenaVec::new_in(arena);
        loop {
            if let Some(body) = rest.strip_prefix(CRLF) {
                trace!(%method, header_count = headers.len(), body_size = body.len(), "decoded request");
                return Ok(Request::new(method, path, version, headers.into_slice(), body));
            }

            let (line, next) = split_once(rest, b'\r').ok_or(ParseError::incomplete("headers"))?;
            rest = expect_line_feed(next, "header line")?;
            headers.push(parse_header(line)?)?;
        }
    }
}

fn parse_header(line: &[u8]) -> Result<Header<'_>, ParseError> {
    let (name, value) =
        split_once(line, b':').ok_or_else(|| ParseError::invalid_header(String::from_utf8_lossy(line)))?;
    ensure!(!name.is_empty(), ParseError::invalid_header("empty header name"));

    let skipped = value.iter().take_while(|b| matches!(b, b' ' | b'\t')).count();
    Ok(Header::new(name, &value[skipped..]))
}

/// `rest` starts right after a `\r`, which must be followed by `\n`.
fn expect_line_feed<'a>(rest: &'a [u8], part: &'static str) -> Result<&'a [u8], ParseError> {
    match rest.split_first() {
        Some((b'\n', rest)) => Ok(rest),
        Some(_) => Err(ParseError::invalid_request_line(format!("bare carriage return in {part}"))),
        None => Err(ParseError::incomplete(part)),
    }
}

/// Splits at the first `delimiter`, which belongs to neither half.
#[inline]
fn split_once(bytes: &[u8], delimiter: u8) -> Option<(&[u8], &[u8])> {
    let index = bytes.iter().position(|b| *b == delimiter)?;
    Some((&bytes[..index], &bytes[index + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaError;
    use indoc::indoc;

    fn crlf(text: &str) -> String {
        text.replace('\n', "\r\n")
    }

    #[test]
    fn minimal_get() {
        let arena = Arena::new(4096);
        let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), b"/");
        assert_eq!(request.version(), Version::Http11);
        assert_eq!(request.headers(), &[Header::new(b"Host", b"x")]);
        assert!(request.body().is_empty());
    }

    #[test]
    fn headers_keep_wire_order_and_casing() {
        let arena = Arena::new(4096);
        let str = crlf(indoc! {r##"
            POST /insert-project HTTP/1.1
            Host: 127.0.0.1:5959
            user-agent:	curl/8.4.0
            Accept: */*
            X-Empty:
            Accept: text/plain

            {"Id":"p-1","Name":"Tracker","Description":"bugs"}"##});

        let request = RequestDecoder::new().decode(&arena, str.as_bytes()).unwrap();

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.path(), b"/insert-project");
        assert_eq!(
            request.headers(),
            &[
                Header::new(b"Host", b"127.0.0.1:5959"),
                Header::new(b"user-agent", b"curl/8.4.0"),
                Header::new(b"Accept", b"*/*"),
                Header::new(b"X-Empty", b""),
                Header::new(b"Accept", b"text/plain"),
            ]
        );
        assert_eq!(request.header(b"Accept"), Some(&b"*/*"[..]));
        assert_eq!(request.header(b"User-Agent"), None);
        assert_eq!(request.body(), br#"{"Id":"p-1","Name":"Tracker","Description":"bugs"}"#);
    }

    #[test]
    fn body_is_taken_verbatim() {
        let arena = Arena::new(4096);
        let src = b"POST /get-project HTTP/1.1\r\n\r\np-1\r\n\r\nmore";
        let request = RequestDecoder::new().decode(&arena, src).unwrap();
        assert!(request.headers().is_empty());
        assert_eq!(request.body(), b"p-1\r\n\r\nmore");
    }

    #[test]
    fn path_is_raw() {
        let arena = Arena::new(4096);
        let request = RequestDecoder::new().decode(&arena, b"GET /a%20b?x=1 HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(request.path(), b"/a%20b?x=1");
    }

    #[test]
    fn header_value_keeps_inner_colons() {
        let arena = Arena::new(4096);
        let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\nHost:localhost:5959\r\n\r\n").unwrap();
        assert_eq!(request.header(b"Host"), Some(&b"localhost:5959"[..]));
    }

    #[test]
    fn missing_separators_fail() {
        let arena = Arena::new(4096);
        let decoder = RequestDecoder::new();
        assert_eq!(decoder.decode(&arena, b"GETHTTP/1.1\r\n\r\n"), Err(ParseError::incomplete("method")));
        assert_eq!(decoder.decode(&arena, b""), Err(ParseError::Empty));
        assert_eq!(decoder.decode(&arena, b"GET /"), Err(ParseError::incomplete("path")));
        assert_eq!(decoder.decode(&arena, b"GET / HTTP/1.1"), Err(ParseError::incomplete("version")));
        assert_eq!(decoder.decode(&arena, b"GET / HTTP/1.1\r"), Err(ParseError::incomplete("request line")));
        assert_eq!(decoder.decode(&arena, b"GET / HTTP/1.1\r\n"), Err(ParseError::incomplete("headers")));
        assert_eq!(decoder.decode(&arena, b"GET / HTTP/1.1\r\nHost: x"), Err(ParseError::incomplete("headers")));
        assert_eq!(decoder.decode(&arena, b"GET / HTTP/1.1\r\nHost: x\r\n"), Err(ParseError::incomplete("headers")));
    }

    #[test]
    fn unknown_method_or_version_fails() {
        let arena = Arena::new(4096);
        let decoder = RequestDecoder::new();
        assert!(matches!(decoder.decode(&arena, b"get / HTTP/1.1\r\n\r\n"), Err(ParseError::InvalidMethod { .. })));
        assert!(matches!(decoder.decode(&arena, b"PATCH / HTTP/1.1\r\n\r\n"), Err(ParseError::InvalidMethod { .. })));
        assert!(matches!(decoder.decode(&arena, b"GET / HTTP/1.0\r\n\r\n"), Err(ParseError::InvalidVersion { .. })));
        assert!(matches!(decoder.decode(&arena, b"GET / HTTP/2\r\n\r\n"), Err(ParseError::InvalidVersion { .. })));
    }

    #[test]
    fn malformed_lines_fail() {
        let arena = Arena::new(4096);
        let decoder = RequestDecoder::new();
        let decode = |src: &'static [u8]| decoder.decode(&arena, src);
        assert!(matches!(decode(b"GET  HTTP/1.1\r\n\r\n"), Err(ParseError::InvalidRequestLine { .. })));
        assert!(matches!(decode(b"GET / HTTP/1.1\rX\n\r\n"), Err(ParseError::InvalidRequestLine { .. })));
        assert!(matches!(decode(b"GET / HTTP/1.1\r\nNoColon\r\n\r\n"), Err(ParseError::InvalidHeader { .. })));
        assert!(matches!(decode(b"GET / HTTP/1.1\r\n: x\r\n\r\n"), Err(ParseError::InvalidHeader { .. })));
    }

    #[test]
    fn lf_only_request_is_rejected() {
        let arena = Arena::new(4096);
        let str = indoc! {r##"
            GET /index.html HTTP/1.1
            Host: 127.0.0.1:8080

            "##};
        assert!(RequestDecoder::new().decode(&arena, str.as_bytes()).is_err());
    }

    #[test]
    fn headers_are_carved_from_the_arena() {
        let arena = Arena::new(4096);
        RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(arena.offset(), 0);

        let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\nA: 1\r\nB: 2\r\n\r\n").unwrap();
        assert_eq!(request.headers().len(), 2);
        assert!(arena.offset() >= 2 * size_of::<Header<'_>>());
    }

    #[test]
    fn too_many_headers_for_the_arena() {
        let mut request = b"GET / HTTP/1.1\r\n".to_vec();
        for i in 0..10 {
            request.extend_from_slice(format!("X-Header-{i}: {i}\r\n").as_bytes());
        }
        request.extend_from_slice(b"\r\n");

        let arena = Arena::new(64);
        let result = RequestDecoder::new().decode(&arena, &request);
        assert!(matches!(result, Err(ParseError::Arena { source: ArenaError::OutOfMemory { .. } })));
        assert!(arena.offset() <= arena.capacity());
    }
}
