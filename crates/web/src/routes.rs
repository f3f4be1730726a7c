//! Route table of the service.

use std::sync::Arc;

use bump_http::router::{Router, RouterBuilder, RouterError};

use crate::entity::{Feature, Project, Record, User};
use crate::handler;
use crate::repository::{MemoryRepository, Repository};

/// One repository per entity.
#[derive(Clone)]
pub struct Repositories {
    pub projects: Arc<dyn Repository<Project>>,
    pub users: Arc<dyn Repository<User>>,
    pub features: Arc<dyn Repository<Feature>>,
}

impl Repositories {
    /// Empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            projects: Arc::new(MemoryRepository::new()),
            users: Arc::new(MemoryRepository::new()),
            features: Arc::new(MemoryRepository::new()),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories").finish_non_exhaustive()
    }
}

/// Builds the full table: `/` plus the five crud routes of every entity.
pub fn router(repositories: &Repositories) -> Result<Router, RouterError> {
    let builder = Router::builder().route("/", handler::index());
    let builder = crud(builder, &repositories.projects);
    let builder = crud(builder, &repositories.users);
    let builder = crud(builder, &repositories.features);
    builder.build()
}

fn crud<E: Record>(builder: RouterBuilder, repository: &Arc<dyn Repository<E>>) -> RouterBuilder {
    builder
        .route(format!("/insert-{}", E::NAME), handler::insert(Arc::clone(repository)))
        .route(format!("/get-all-{}", E::PLURAL), handler::get_all(Arc::clone(repository)))
        .route(format!("/get-{}", E::NAME), handler::get_by_id(Arc::clone(repository)))
        .route(format!("/update-{}", E::NAME), handler::update(Arc::clone(repository)))
        .route(format!("/delete-{}", E::NAME), handler::delete(Arc::clone(repository)))
}
