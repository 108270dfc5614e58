// Reference module
// Proposals and instruments supplied by the host as lookup data

use crate::error::{Result, WidgetError};
use crate::models::event::Identifier;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Externally supplied lookup record, read-only to the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntity {
    pub id: Identifier,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub type Proposal = ReferenceEntity;
pub type Instrument = ReferenceEntity;

impl ReferenceEntity {
    pub fn new(id: impl Into<Identifier>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: None,
            extra: Map::new(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Find an entity and its zero-based position in the list.
pub fn position_of<'a>(
    list: &'a [ReferenceEntity],
    id: &Identifier,
) -> Option<(usize, &'a ReferenceEntity)> {
    list.iter().enumerate().find(|(_, entity)| entity.id.same_as(id))
}

pub fn find_by_key<'a>(list: &'a [ReferenceEntity], key: &str) -> Option<&'a ReferenceEntity> {
    list.iter().find(|entity| entity.id.matches(key))
}

/// Parse a reference list attribute. A missing attribute is an empty list.
pub fn parse_references(what: &'static str, value: Option<&str>) -> Result<Vec<ReferenceEntity>> {
    match value.map(str::trim) {
        None | Some("") | Some("null") => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(raw).map_err(|e| WidgetError::malformed(what, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposals() -> Vec<Proposal> {
        vec![
            ReferenceEntity::new(10, "Beamline A"),
            ReferenceEntity::new(20, "Beamline B").with_url("/proposals/20"),
        ]
    }

    #[test]
    fn test_position_of() {
        let list = proposals();
        let (index, proposal) = position_of(&list, &Identifier::from(20)).unwrap();
        assert_eq!(index, 1);
        assert_eq!(proposal.title, "Beamline B");
        assert!(position_of(&list, &Identifier::from(99)).is_none());
    }

    #[test]
    fn test_find_by_key_accepts_string_form() {
        let list = proposals();
        assert_eq!(find_by_key(&list, "10").unwrap().title, "Beamline A");
        assert!(find_by_key(&list, "x").is_none());
    }

    #[test]
    fn test_parse_references() {
        let list = parse_references(
            "proposals",
            Some(r#"[{"id": 1, "title": "P1", "url": "/p/1"}, {"id": "2", "title": "P2"}]"#),
        )
        .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].url.as_deref(), Some("/p/1"));
        assert_eq!(list[1].id, Identifier::Text("2".into()));
    }

    #[test]
    fn test_parse_references_missing_is_empty() {
        assert!(parse_references("instruments", None).unwrap().is_empty());
        assert!(parse_references("instruments", Some("null")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_references_malformed() {
        let err = parse_references("instruments", Some("[{")).unwrap_err();
        assert!(err.to_string().starts_with("malformed instruments"));
    }
}
