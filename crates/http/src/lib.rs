//! An arena backed HTTP/1.1 and json engine for small application servers.
//!
//! This crate serves one request per connection, one connection at a time. Every byte a
//! connection needs lives in a single bump [`arena::Arena`]: the request is read straight
//! into it, decoded in place into borrowed views, handed to a synchronous handler that
//! writes its json reply into the same arena, and encoded there before being sent. The
//! arena is rewound before the next connection, and lifetimes make sure nothing from
//! the previous one is still referenced.
//!
//! # Example
//!
//! ```no_run
//! use bump_http::config::ServerConfig;
//! use bump_http::handler::{BoxError, ResponseContext, make_handler};
//! use bump_http::json::parse_bytes;
//! use bump_http::protocol::Status;
//! use bump_http::router::Router;
//! use bump_http::server::Server;
//!
//! fn echo_name(ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError> {
//!     let body = parse_bytes(ctx.arena(), ctx.request().body())?;
//!     let Some(name) = body.as_object().and_then(|object| object.get_str("Name")) else {
//!         return Ok(Status::BadRequest);
//!     };
//!
//!     ctx.write_json(|writer| {
//!         writer.begin_object()?;
//!         writer.put_key("Name")?;
//!         writer.put_string(name)?;
//!         writer.end_object()
//!     })?;
//!     Ok(Status::Ok)
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::builder().route("/echo-name", make_handler(echo_name)).build()?;
//!     let server = Server::builder().router(router).config(ServerConfig::from_env()?).build()?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`arena`]: the bump allocator and an arena-backed growable buffer
//! - [`json`]: tokenizer, parser, open-addressing object, writer and record schemas
//! - [`protocol`]: request, method, version, status and error types
//! - [`codec`]: request decoding and response encoding
//! - [`router`]: exact-match route table
//! - [`handler`]: the handler trait and the response context
//! - [`connection`]: the lifecycle of a single connection
//! - [`server`]: the serial accept loop
//! - [`config`]: settings loaded from the environment
//!
//! # Error Handling
//!
//! - [`protocol::HttpError`]: top-level connection error
//! - [`protocol::ParseError`]: the request could not be decoded, the connection is closed without reply
//! - [`protocol::SendError`]: the response could not be encoded or written
//! - [`arena::ArenaError`]: an arena ran out of space
//! - [`json::JsonError`]: malformed json
//!
//! Handler errors and handler panics are answered with `500 Internal Server Error`.
//!
//! # Limitations
//!
//! - HTTP/1.1 only, one request per connection, no keep-alive
//! - No chunked transfer encoding and no `Content-Length` in responses
//! - A request must arrive in a single read that fits in the connection arena
//! - Json escape sequences are passed through, never decoded
//! - No TLS support (use a reverse proxy for HTTPS)
//!
//! # Safety
//!
//! Unsafe code is confined to [`arena::Arena`], which hands out non-overlapping slices of
//! its buffer through a shared reference and reclaims them only through `&mut self`.

pub mod arena;
pub mod codec;
pub mod config;
pub mod connection;
pub mod handler;
pub mod json;
pub mod protocol;
pub mod router;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
