//! Core HTTP protocol types.
//!
//! This module holds the vocabulary shared by the decoder, the router, the handlers and
//! the encoder:
//!
//! - [`Request`] and [`Header`]: a decoded request whose every byte is a view into the
//!   receive buffer
//! - [`Method`], [`Version`] and [`Status`]: the closed sets of methods, versions and
//!   statuses the server speaks
//! - [`HttpError`], [`ParseError`] and [`SendError`]: failures while receiving or sending
//!
//! Only a deliberately small slice of HTTP/1.1 is covered: one request per connection,
//! no chunked transfer encoding, no header folding and no percent-decoding of paths.

mod method;
pub use method::Method;

mod version;
pub use version::Version;

mod status;
pub use status::Status;

mod request;
pub use request::Header;
pub use request::Request;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
