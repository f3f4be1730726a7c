//! Project, user and feature tracking service built on `bump-http`.
//!
//! Three kinds of records are stored: [`entity::Project`], [`entity::User`] and
//! [`entity::Feature`]. Each is exposed through the same five routes, wired up by
//! [`routes::router`] and served by the handlers in [`handler`]. Storage sits behind the
//! [`repository::Repository`] trait.

pub mod entity;
pub mod handler;
pub mod repository;
pub mod routes;
