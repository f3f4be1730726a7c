use std::panic::{AssertUnwindSafe, catch_unwind};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

use crate::arena::{Arena, ArenaVec};
use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::ResponseContext;
use crate::protocol::{HttpError, Request, SendError, Status};
use crate::router::Router;

/// Largest receive buffer carved out of the connection arena.
pub const MAX_REQUEST_SIZE: usize = 1024 * 1024;

/// Serves exactly one request on one connection.
///
/// The lifecycle is a straight line: one read into a buffer carved from the connection
/// arena, decode, route, run the handler, encode, write, shut down. A request that does
/// not decode is dropped without any reply. Failures and panics inside a handler are
/// answered with `500 Internal Server Error`.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    reader: R,
    writer: W,
    decoder: RequestDecoder,
    encoder: ResponseEncoder,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer, decoder: RequestDecoder::new(), encoder: ResponseEncoder::new() }
    }

    /// Processes the connection using `arena` for everything received and sent.
    ///
    /// The receive buffer takes half of the remaining arena, at most [`MAX_REQUEST_SIZE`],
    /// and room for the response head is reserved before the handler runs. Both arenas are
    /// expected to be freshly reset; nothing is rewound here.
    pub async fn process(mut self, arena: &Arena, scratch: &Arena, router: &Router) -> Result<Status, HttpError> {
        let buffer = arena.push(receive_size(arena))?;
        let received = self.reader.read(buffer).await?;
        let buffer: &[u8] = buffer;
        let received = &buffer[..received];

        let request = match self.decoder.decode(arena, received) {
            Ok(request) => request,
            Err(e) => {
                warn!(cause = %e, received = received.len(), "can't decode request, closing without reply");
                self.shutdown().await;
                return Err(e.into());
            }
        };

        let head = ArenaVec::with_capacity_in(self.encoder.max_head_len(), arena)?;
        let (status, body) = dispatch(arena, scratch, router, &request);
        info!(
            method = %request.method(),
            path = %String::from_utf8_lossy(request.path()),
            status = status.code(),
            "served request"
        );

        self.send_response(head, status, body).await?;
        Ok(status)
    }

    async fn send_response(
        &mut self,
        mut head: ArenaVec<'_, u8>,
        status: Status,
        body: &[u8],
    ) -> Result<(), SendError> {
        self.encoder.encode_head(status, &mut head)?;

        self.writer.write_all(&head).await?;
        self.writer.write_all(body).await?;
        self.writer.flush().await?;
        self.writer.shutdown().await?;
        Ok(())
    }

    async fn shutdown(&mut self) {
        if let Err(e) = self.writer.shutdown().await {
            debug!(cause = %e, "can't shut down connection");
        }
    }
}

/// Half of what is left, so the decoded request, the handler output and the reply still fit.
fn receive_size(arena: &Arena) -> usize {
    (arena.remaining() / 2).min(MAX_REQUEST_SIZE)
}

/// Runs the matching handler, returning the status and body to send.
fn dispatch<'a>(arena: &'a Arena, scratch: &'a Arena, router: &Router, request: &'a Request<'a>) -> (Status, &'a [u8]) {
    let Some(handler) = router.at(request.path()) else {
        return (Status::NotFound, &[]);
    };

    let mut ctx = ResponseContext::new(arena, scratch, request);
    match catch_unwind(AssertUnwindSafe(|| handler.call(&mut ctx))) {
        Ok(Ok(status)) => (status, ctx.content()),
        Ok(Err(e)) => {
            error!(cause = %e, "handler failed");
            (Status::InternalServerError, &[])
        }
        Err(panic) => {
            let cause = panic
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| panic.downcast_ref::<&str>().copied())
                .unwrap_or("unknown panic payload");
            error!(cause, "handler panicked");
            (Status::InternalServerError, &[])
        }
    }
}
