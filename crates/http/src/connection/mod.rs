//! HTTP connection handling.
//!
//! - [`HttpConnection`]: serves a single request on a single connection, reading it into
//!   the connection arena and answering from the same arena
//!
//! There is no keep-alive and no pipelining. The response is terminated by shutting
//! down the write side of the connection.

mod http_connection;

pub use http_connection::HttpConnection;
