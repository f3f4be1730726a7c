//! Entities stored by the service and their json shape.
//!
//! Every entity is a [`Record`]: a [`Schema`] with a string id and a companion patch
//! type used by the update routes. Patch types carry the id plus every other field as
//! an `Option`; absent fields are left untouched.

mod feature;
mod project;
mod user;

pub use feature::Feature;
pub use feature::FeaturePatch;
pub use feature::FeaturePriority;
pub use feature::FeatureState;
pub use project::Project;
pub use project::ProjectPatch;
pub use user::User;
pub use user::UserPatch;

use bump_http::json::Schema;

pub trait Record: Schema + Clone + Send + Sync + 'static {
    type Patch: Schema + Send + 'static;

    /// Singular name used in route paths, such as `project` in `/insert-project`.
    const NAME: &'static str;

    /// Plural name used by the list route, such as `projects` in `/get-all-projects`.
    const PLURAL: &'static str;

    fn id(&self) -> &str;

    fn patch_id(patch: &Self::Patch) -> &str;

    /// Overwrites every field the patch carries.
    fn apply(&mut self, patch: Self::Patch);
}

/// Replaces `slot` when the patch has a value for it.
pub(crate) fn patch_field<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
