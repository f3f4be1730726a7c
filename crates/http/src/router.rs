//! Exact-match route table.
//!
//! Routes are matched against the raw request path byte for byte, in registration
//! order, and the first hit wins. There are no patterns, no trailing-slash folding and
//! no case folding. The table holds at most [`MAX_ROUTES`] entries.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::handler::Handler;

pub const MAX_ROUTES: usize = 100;

type RouteHandler = dyn Handler + Send + Sync + 'static;

pub struct Router {
    routes: Vec<RouterItem>,
}

pub struct RouterItem {
    path: String,
    handler: Box<RouteHandler>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("route table is full, at most {max_routes} routes can be registered")]
    TooManyRoutes { max_routes: usize },
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Looks up the handler registered for exactly `path`.
    pub fn at(&self, path: &[u8]) -> Option<&RouteHandler> {
        let item = self.routes.iter().find(|item| item.path.as_bytes() == path);
        if item.is_none() {
            debug!(path = %String::from_utf8_lossy(path), "no route matched");
        }
        item.map(RouterItem::handler)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Registered paths in registration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|item| item.path.as_str())
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.paths()).finish()
    }
}

impl RouterItem {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn handler(&self) -> &RouteHandler {
        self.handler.as_ref()
    }
}

impl fmt::Debug for RouterItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterItem").field("path", &self.path).finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct RouterBuilder {
    routes: Vec<RouterItem>,
}

impl RouterBuilder {
    fn new() -> Self {
        Self::default()
    }

    pub fn route<H>(mut self, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler + Send + Sync + 'static,
    {
        self.routes.push(RouterItem { path: path.into(), handler: Box::new(handler) });
        self
    }

    /// # Errors
    ///
    /// Fails with [`RouterError::TooManyRoutes`] when more than [`MAX_ROUTES`] routes
    /// were registered.
    pub fn build(self) -> Result<Router, RouterError> {
        if self.routes.len() > MAX_ROUTES {
            return Err(RouterError::TooManyRoutes { max_routes: MAX_ROUTES });
        }
        Ok(Router { routes: self.routes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;
    use crate::codec::RequestDecoder;
    use crate::handler::{BoxError, ResponseContext, make_handler};
    use crate::protocol::Status;

    fn fixed(body: &'static [u8]) -> impl Handler + Send + Sync + 'static {
        make_handler(move |ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
            ctx.set_content(body);
            Ok(Status::Ok)
        })
    }

    fn content_of(router: &Router, path: &[u8]) -> Option<Vec<u8>> {
        let arena = Arena::new(256);
        let scratch = Arena::new(64);
        let request = RequestDecoder::new().decode(&arena, b"GET / HTTP/1.1\r\n\r\n").unwrap();
        let mut ctx = ResponseContext::new(&arena, &scratch, &request);
        let handler = router.at(path)?;
        handler.call(&mut ctx).unwrap();
        Some(ctx.content().to_vec())
    }

    #[test]
    fn exact_match_only() {
        let router = Router::builder().route("/insert-project", fixed(b"insert")).build().unwrap();

        assert_eq!(content_of(&router, b"/insert-project"), Some(b"insert".to_vec()));
        assert!(router.at(b"/insert-project/").is_none());
        assert!(router.at(b"/INSERT-PROJECT").is_none());
        assert!(router.at(b"/insert").is_none());
        assert!(router.at(b"/insert-project?x=1").is_none());
        assert!(router.at(b"").is_none());
    }

    #[test]
    fn first_registration_wins() {
        let router = Router::builder()
            .route("/", fixed(b"first"))
            .route("/get-all-projects", fixed(b"all"))
            .route("/", fixed(b"second"))
            .build()
            .unwrap();

        assert_eq!(router.len(), 3);
        assert_eq!(content_of(&router, b"/"), Some(b"first".to_vec()));
        assert_eq!(content_of(&router, b"/get-all-projects"), Some(b"all".to_vec()));
        assert_eq!(router.paths().collect::<Vec<_>>(), ["/", "/get-all-projects", "/"]);
    }

    #[test]
    fn table_is_bounded() {
        let full = (0..MAX_ROUTES).fold(Router::builder(), |builder, i| builder.route(format!("/{i}"), fixed(b"")));
        assert_eq!(full.build().map(|router| router.len()), Ok(MAX_ROUTES));

        let overfull =
            (0..=MAX_ROUTES).fold(Router::builder(), |builder, i| builder.route(format!("/{i}"), fixed(b"")));
        assert_eq!(overfull.build().err(), Some(RouterError::TooManyRoutes { max_routes: MAX_ROUTES }));
    }

    #[test]
    fn empty_router_matches_nothing() {
        let router = Router::builder().build().unwrap();
        assert!(router.is_empty());
        assert!(router.at(b"/").is_none());
    }
}
