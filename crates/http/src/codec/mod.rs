//! Wire codec for HTTP/1.1 messages.
//!
//! - [`RequestDecoder`]: turns a received buffer into a borrowed [`Request`](crate::protocol::Request)
//! - [`ResponseEncoder`]: writes a status line, the fixed header block and a body into an
//!   arena buffer
//!
//! Both sides work on whole messages. A request must arrive in a single read and a
//! response is terminated by closing the connection.

mod request_decoder;
mod response_encoder;

pub use request_decoder::RequestDecoder;
pub use response_encoder::ALLOW_ORIGIN_HEADER;
pub use response_encoder::ResponseEncoder;
