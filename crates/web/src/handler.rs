//! Request handlers for the entity routes.
//!
//! Every entity gets the same five handlers, generic over its [`Record`] type:
//!
//! | route | method | body | reply |
//! |---|---|---|---|
//! | `/insert-<name>` | `POST` | the record as json | empty |
//! | `/get-all-<plural>` | `GET` | none | json array of every record |
//! | `/get-<name>` | `POST` | the bare id | the record as json |
//! | `/update-<name>` | `POST` | the patch as json | empty |
//! | `/delete-<name>` | `POST` | the bare id | empty |
//!
//! A wrong method is answered with `405`, an unreadable body with `400` and an unknown id
//! with `404`. Repository failures propagate as handler errors, which the connection
//! turns into `500`.

use std::sync::Arc;

use bump_http::handler::{BoxError, Handler, ResponseContext, make_handler};
use bump_http::json::{Schema, from_body, to_json, to_json_array};
use bump_http::protocol::{Method, Status};
use tracing::{debug, warn};

use crate::entity::Record;
use crate::repository::Repository;

pub const INDEX_CONTENT: &[u8] = b"HELLO";

/// Answers every request with `HELLO`.
pub fn index() -> impl Handler + Send + Sync + 'static {
    make_handler(|ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
        ctx.set_content(INDEX_CONTENT);
        Ok(Status::Ok)
    })
}

pub fn insert<E: Record>(repository: Arc<dyn Repository<E>>) -> impl Handler + Send + Sync + 'static {
    make_handler(move |ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
        if !allowed(ctx, Method::Post) {
            return Ok(Status::MethodNotAllowed);
        }
        let Some(record) = read_body::<E>(ctx) else {
            return Ok(Status::BadRequest);
        };

        repository.insert(record)?;
        Ok(Status::Ok)
    })
}

pub fn get_all<E: Record>(repository: Arc<dyn Repository<E>>) -> impl Handler + Send + Sync + 'static {
    make_handler(move |ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
        if !allowed(ctx, Method::Get) {
            return Ok(Status::MethodNotAllowed);
        }

        let records = repository.get_all()?;
        ctx.write_json(|writer| to_json_array(&records, writer))?;
        Ok(Status::Ok)
    })
}

pub fn get_by_id<E: Record>(repository: Arc<dyn Repository<E>>) -> impl Handler + Send + Sync + 'static {
    make_handler(move |ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
        if !allowed(ctx, Method::Post) {
            return Ok(Status::MethodNotAllowed);
        }
        let Some(id) = read_id(ctx) else {
            return Ok(Status::BadRequest);
        };

        match repository.get_by_id(id)? {
            Some(record) => {
                ctx.write_json(|writer| to_json(&record, writer))?;
                Ok(Status::Ok)
            }
            None => Ok(Status::NotFound),
        }
    })
}

pub fn update<E: Record>(repository: Arc<dyn Repository<E>>) -> impl Handler + Send + Sync + 'static {
    make_handler(move |ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
        if !allowed(ctx, Method::Post) {
            return Ok(Status::MethodNotAllowed);
        }
        let Some(patch) = read_body::<E::Patch>(ctx) else {
            return Ok(Status::BadRequest);
        };

        Ok(if repository.update(patch)? { Status::Ok } else { Status::NotFound })
    })
}

pub fn delete<E: Record>(repository: Arc<dyn Repository<E>>) -> impl Handler + Send + Sync + 'static {
    make_handler(move |ctx: &mut ResponseContext<'_>| -> Result<Status, BoxError> {
        if !allowed(ctx, Method::Post) {
            return Ok(Status::MethodNotAllowed);
        }
        let Some(id) = read_id(ctx) else {
            return Ok(Status::BadRequest);
        };

        Ok(if repository.delete(id)? { Status::Ok } else { Status::NotFound })
    })
}

fn allowed(ctx: &ResponseContext<'_>, expected: Method) -> bool {
    let method = ctx.request().method();
    if method != expected {
        debug!(%method, %expected, "method not allowed");
    }
    method == expected
}

fn read_body<T: Schema>(ctx: &ResponseContext<'_>) -> Option<T> {
    from_body(ctx.arena(), ctx.request().body()).inspect_err(|e| warn!(cause = %e, "can't read request body")).ok()
}

/// The whole body is the id, surrounding whitespace excluded.
fn read_id<'a>(ctx: &ResponseContext<'a>) -> Option<&'a str> {
    let id = std::str::from_utf8(ctx.request().body()).ok()?.trim();
    if id.is_empty() {
        warn!("request body carries no id");
        return None;
    }
    Some(id)
}
