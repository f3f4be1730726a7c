//! Request handlers.
//!
//! A [`Handler`] receives a [`ResponseContext`], fills in the response body and returns
//! the status to send. Handlers are synchronous: all data they need is already in the
//! arena when they run, and the connection loop serves one request at a time.
//!
//! Plain functions and closures become handlers through [`make_handler`]:
//!
//! ```
//! use bump_http::handler::{BoxError, ResponseContext, make_handler};
//! use bump_http::protocol::Status;
//!
//! fn hello(ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError> {
//!     ctx.set_content(b"HELLO");
//!     Ok(Status::Ok)
//! }
//!
//! let handler = make_handler(hello);
//! # let _ = handler;
//! ```

use std::error::Error;

use crate::arena::{Arena, ArenaError};
use crate::json::JsonWriter;
use crate::protocol::{Request, Status};

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Everything a handler may touch while serving one request.
///
/// `arena` is the connection arena the request was received into; anything pushed there
/// lives until the response is written. `scratch` is reset together with it and is meant
/// for short-lived formatting.
#[derive(Debug)]
pub struct ResponseContext<'a> {
    arena: &'a Arena,
    scratch: &'a Arena,
    request: &'a Request<'a>,
    content: &'a [u8],
}

impl<'a> ResponseContext<'a> {
    pub fn new(arena: &'a Arena, scratch: &'a Arena, request: &'a Request<'a>) -> Self {
        Self { arena, scratch, request, content: &[] }
    }

    #[inline]
    pub fn arena(&self) -> &'a Arena {
        self.arena
    }

    #[inline]
    pub fn scratch(&self) -> &'a Arena {
        self.scratch
    }

    #[inline]
    pub fn request(&self) -> &'a Request<'a> {
        self.request
    }

    /// The response body set so far, empty by default.
    pub fn content(&self) -> &'a [u8] {
        self.content
    }

    pub fn set_content(&mut self, content: &'a [u8]) {
        self.content = content;
    }

    /// Builds the response body with a fresh [`JsonWriter`] over the connection arena.
    pub fn write_json<F>(&mut self, write: F) -> Result<(), ArenaError>
    where
        F: FnOnce(&mut JsonWriter<'a>) -> Result<(), ArenaError>,
    {
        let mut writer = JsonWriter::begin(self.arena)?;
        write(&mut writer)?;
        self.content = writer.end();
        Ok(())
    }
}

pub trait Handler {
    /// Returning `Err` makes the connection answer `500 Internal Server Error`.
    fn call(&self, ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut ResponseContext<'_>) -> Result<Status, BoxError>,
{
    fn call(&self, ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError> {
        (self.f)(ctx)
    }
}

pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut ResponseContext<'_>) -> Result<Status, BoxError>,
{
    HandlerFn { f }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn call(&self, ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError> {
        (**self).call(ctx)
    }
}

impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    fn call(&self, ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError> {
        (**self).call(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RequestDecoder;

    #[test]
    fn function_handler_sets_content() {
        let arena = Arena::new(1024);
        let scratch = Arena::new(256);
        let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\n\r\n").unwrap();
        let mut ctx = ResponseContext::new(&arena, &scratch, &request);
        assert!(ctx.content().is_empty());

        let handler = make_handler(|ctx: &mut ResponseContext<'_>| {
            let name = ctx.scratch().format(format_args!("{}-{}", "user", 7))?;
            ctx.write_json(|w| {
                w.begin_object()?;
                w.put_key("Id")?;
                w.put_string(name)?;
                w.end_object()
            })?;
            Ok(Status::Ok)
        });

        assert_eq!(handler.call(&mut ctx).unwrap(), Status::Ok);
        assert_eq!(ctx.content(), br#"{"Id":"user-7"}"#);
    }

    #[test]
    fn errors_are_boxed() {
        let arena = Arena::new(64);
        let scratch = Arena::new(0);
        let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\n\r\n").unwrap();
        let mut ctx = ResponseContext::new(&arena, &scratch, &request);

        let handler: Box<dyn Handler> = Box::new(make_handler(|ctx: &mut ResponseContext<'_>| {
            ctx.scratch().push(1)?;
            Ok(Status::Ok)
        }));

        let err = handler.call(&mut ctx).unwrap_err();
        assert!(err.to_string().contains("out of memory"));
    }
}
