use bump_http::json::{Field, Schema};
use bump_http::json_field;

use crate::entity::{Record, patch_field};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Schema for Project {
    const FIELDS: &'static [Field<Self>] = &[
        json_field!(Project, id: String => "Id"),
        json_field!(Project, name: String => "Name"),
        json_field!(Project, description: String => "Description"),
    ];
}

impl Schema for ProjectPatch {
    const FIELDS: &'static [Field<Self>] = &[
        json_field!(ProjectPatch, id: String => "Id"),
        json_field!(ProjectPatch, name: Option<String> => "Name"),
        json_field!(ProjectPatch, description: Option<String> => "Description"),
    ];
}

impl Record for Project {
    type Patch = ProjectPatch;

    const NAME: &'static str = "project";
    const PLURAL: &'static str = "projects";

    fn id(&self) -> &str {
        &self.id
    }

    fn patch_id(patch: &ProjectPatch) -> &str {
        &patch.id
    }

    fn apply(&mut self, patch: ProjectPatch) {
        patch_field(&mut self.name, patch.name);
        patch_field(&mut self.description, patch.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bump_http::arena::Arena;
    use bump_http::json::{JsonWriter, from_body, to_json};

    #[test]
    fn json_shape() {
        let project = Project { id: "p-1".into(), name: "Tracker".into(), description: "bugs".into() };

        let arena = Arena::new(16 * 1024);
        let mut writer = JsonWriter::begin(&arena).unwrap();
        to_json(&project, &mut writer).unwrap();
        let json = writer.end();

        assert_eq!(json, br#"{"Id":"p-1","Name":"Tracker","Description":"bugs"}"#);
        assert_eq!(from_body::<Project>(&arena, json).unwrap(), project);
    }

    #[test]
    fn patch_applies_present_fields_only() {
        let arena = Arena::new(16 * 1024);
        let mut project = Project { id: "p-1".into(), name: "Tracker".into(), description: "bugs".into() };
        let patch: ProjectPatch = from_body(&arena, br#"{"Id": "p-1", "Description": "issues"}"#).unwrap();

        assert_eq!(Project::patch_id(&patch), "p-1");
        project.apply(patch);
        assert_eq!(project, Project { id: "p-1".into(), name: "Tracker".into(), description: "issues".into() });
    }
}
