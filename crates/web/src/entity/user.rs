use bump_http::json::{Field, Schema};
use bump_http::json_field;

use crate::entity::{Record, patch_field};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Schema for User {
    const FIELDS: &'static [Field<Self>] = &[
        json_field!(User, id: String => "Id"),
        json_field!(User, first_name: String => "FirstName"),
        json_field!(User, last_name: String => "LastName"),
    ];
}

impl Schema for UserPatch {
    const FIELDS: &'static [Field<Self>] = &[
        json_field!(UserPatch, id: String => "Id"),
        json_field!(UserPatch, first_name: Option<String> => "FirstName"),
        json_field!(UserPatch, last_name: Option<String> => "LastName"),
    ];
}

impl Record for User {
    type Patch = UserPatch;

    const NAME: &'static str = "user";
    const PLURAL: &'static str = "users";

    fn id(&self) -> &str {
        &self.id
    }

    fn patch_id(patch: &UserPatch) -> &str {
        &patch.id
    }

    fn apply(&mut self, patch: UserPatch) {
        patch_field(&mut self.first_name, patch.first_name);
        patch_field(&mut self.last_name, patch.last_name);
    }
}
