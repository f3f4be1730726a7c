use std::fmt;

use bump_http::arena::ArenaError;
use bump_http::json::{Field, FieldCodec, FieldError, FieldKind, JsonWriter, Schema, Value, decode_variant};
use bump_http::json_field;

use crate::entity::{Record, patch_field};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeaturePriority {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeatureState {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// Implements [`FieldCodec`] for a fieldless enum stored as one of a fixed set of strings.
macro_rules! string_enum {
    ($ty:ty, [$($variant:path => $name:literal),+ $(,)?]) => {
        impl $ty {
            pub const NAMES: &'static [&'static str] = &[$($name),+];
            const VARIANTS: &'static [$ty] = &[$($variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FieldCodec for $ty {
            const KIND: FieldKind = FieldKind::Enumeration;

            fn decode(value: Option<&Value<'_>>) -> Result<Self, FieldError> {
                decode_variant(value, Self::NAMES, Self::VARIANTS)
            }

            fn encode(&self, writer: &mut JsonWriter<'_>) -> Result<(), ArenaError> {
                writer.put_string(self.as_str())
            }
        }
    };
}

string_enum!(FeaturePriority, [
    FeaturePriority::Low => "low",
    FeaturePriority::Medium => "medium",
    FeaturePriority::High => "high",
]);

string_enum!(FeatureState, [
    FeatureState::Todo => "todo",
    FeatureState::InProgress => "in-progress",
    FeatureState::Done => "done",
]);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub description: String,
    pub priority: FeaturePriority,
    pub project_id: String,
    /// Kept as the client sent it, usually an ISO 8601 timestamp.
    pub creation_date: String,
    pub owner_id: String,
    pub state: FeatureState,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturePatch {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<FeaturePriority>,
    pub project_id: Option<String>,
    pub creation_date: Option<String>,
    pub owner_id: Option<String>,
    pub state: Option<FeatureState>,
}

impl Schema for Feature {
    const FIELDS: &'static [Field<Self>] = &[
        json_field!(Feature, id: String => "Id"),
        json_field!(Feature, name: String => "Name"),
        json_field!(Feature, description: String => "Description"),
        json_field!(Feature, priority: FeaturePriority => "Priority"),
        json_field!(Feature, project_id: String => "ProjectId"),
        json_field!(Feature, creation_date: String => "CreationDate"),
        json_field!(Feature, owner_id: String => "OwnerId"),
        json_field!(Feature, state: FeatureState => "State"),
    ];
}

impl Schema for FeaturePatch {
    const FIELDS: &'static [Field<Self>] = &[
        json_field!(FeaturePatch, id: String => "Id"),
        json_field!(FeaturePatch, name: Option<String> => "Name"),
        json_field!(FeaturePatch, description: Option<String> => "Description"),
        json_field!(FeaturePatch, priority: Option<FeaturePriority> => "Priority"),
        json_field!(FeaturePatch, project_id: Option<String> => "ProjectId"),
        json_field!(FeaturePatch, creation_date: Option<String> => "CreationDate"),
        json_field!(FeaturePatch, owner_id: Option<String> => "OwnerId"),
        json_field!(FeaturePatch, state: Option<FeatureState> => "State"),
    ];
}

impl Record for Feature {
    type Patch = FeaturePatch;

    const NAME: &'static str = "feature";
    const PLURAL: &'static str = "features";

    fn id(&self) -> &str {
        &self.id
    }

    fn patch_id(patch: &FeaturePatch) -> &str {
        &patch.id
    }

    fn apply(&mut self, patch: FeaturePatch) {
        patch_field(&mut self.name, patch.name);
        patch_field(&mut self.description, patch.description);
        patch_field(&mut self.priority, patch.priority);
        patch_field(&mut self.project_id, patch.project_id);
        patch_field(&mut self.creation_date, patch.creation_date);
        patch_field(&mut self.owner_id, patch.owner_id);
        patch_field(&mut self.state, patch.state);
    }
}
