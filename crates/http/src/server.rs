//! The serial accept loop.
//!
//! [`Server::serve`] owns one connection arena and one scratch arena. Every iteration
//! resets both, accepts a single connection and serves it to completion before the next
//! accept. Nothing runs concurrently, so the two arenas are never shared.
//!
//! ```no_run
//! use bump_http::handler::{BoxError, ResponseContext, make_handler};
//! use bump_http::protocol::Status;
//! use bump_http::router::Router;
//! use bump_http::server::Server;
//!
//! fn hello(ctx: &mut ResponseContext<'_>) -> Result<Status, BoxError> {
//!     ctx.set_content(b"HELLO");
//!     Ok(Status::Ok)
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let router = Router::builder().route("/", make_handler(hello)).build().unwrap();
//!     let server = Server::builder().router(router).port(5959).build().unwrap();
//!     server.start().await.unwrap();
//! }
//! ```

use std::io;
use std::net::{Ipv4Addr, SocketAddr};

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

use crate::arena::Arena;
use crate::config::ServerConfig;
use crate::connection::HttpConnection;
use crate::router::Router;

pub const LISTEN_BACKLOG: u32 = 256;

#[derive(Debug)]
pub struct ServerBuilder {
    router: Option<Router>,
    config: ServerConfig,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { router: None, config: ServerConfig::default() }
    }

    pub fn router(mut self, router: Router) -> Self {
        self.router = Some(router);
        self
    }

    /// Replaces every setting, usually with [`ServerConfig::from_env`].
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn arena_capacity(mut self, capacity: usize) -> Self {
        self.config.arena_capacity = capacity;
        self
    }

    pub fn scratch_capacity(mut self, capacity: usize) -> Self {
        self.config.scratch_capacity = capacity;
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let router = self.router.ok_or(ServerBuildError::MissingRouter)?;
        Ok(Server { router, config: self.config })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't listen on port {port}: {source}")]
    Bind { port: u16, source: io::Error },

    #[error("can't install the log subscriber: {source}")]
    Tracing {
        #[from]
        source: SetGlobalDefaultError,
    },
}

#[derive(Debug)]
pub struct Server {
    router: Router,
    config: ServerConfig,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Installs the log subscriber, binds the listener and serves forever.
    pub async fn start(self) -> Result<(), ServerError> {
        init_tracing(self.config.log_level)?;

        let listener = self.bind().inspect_err(|e| error!(cause = %e, "bind server error"))?;
        self.serve(listener).await;
        Ok(())
    }

    /// Opens an IPv4 listener on all interfaces with `SO_REUSEADDR` set.
    pub fn bind(&self) -> Result<TcpListener, ServerError> {
        let port = self.config.port;
        let bind_error = |source| ServerError::Bind { port, source };

        let socket = TcpSocket::new_v4().map_err(bind_error)?;
        socket.set_reuseaddr(true).map_err(bind_error)?;
        socket.bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))).map_err(bind_error)?;
        let listener = socket.listen(LISTEN_BACKLOG).map_err(bind_error)?;

        info!(port, addr = ?listener.local_addr().ok(), "start listening");
        Ok(listener)
    }

    /// Accepts and serves connections one at a time. Never returns.
    pub async fn serve(&self, listener: TcpListener) {
        let mut arena = Arena::new(self.config.arena_capacity);
        let mut scratch = Arena::new(self.config.scratch_capacity);

        loop {
            arena.reset();
            scratch.reset();

            let (tcp_stream, remote_addr) = match listener.accept().await {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let (reader, writer) = tcp_stream.into_split();
            let connection = HttpConnection::new(reader, writer);
            match connection.process(&arena, &scratch, &self.router).await {
                Ok(status) => {
                    debug!(
                        %remote_addr,
                        status = status.code(),
                        arena_used = arena.offset(),
                        "finished process, connection shutdown"
                    );
                }
                Err(e) => {
                    error!(%remote_addr, cause = %e, "service has error, connection shutdown");
                }
            }
        }
    }
}

/// Installs a global `tracing` subscriber printing events up to `level`.
pub fn init_tracing(level: Level) -> Result<(), SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
}
