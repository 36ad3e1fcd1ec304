use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{LoreError, Result};

/// Facet mapping keyed by facet name. Keys are open; any entity type may
/// define any key.
pub type Facets = BTreeMap<String, FacetValue>;

/// A single facet value: a string, a list of strings, or a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Flag(bool),
    Text(String),
    List(Vec<String>),
}

impl FacetValue {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Whether this value renders as `value` when compared as text.
    /// Lists match when any element matches.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::Flag(flag) => value.parse::<bool>().is_ok_and(|v| v == *flag),
            Self::Text(text) => text == value,
            Self::List(items) => items.iter().any(|item| item == value),
        }
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for FacetValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Vec<&str>> for FacetValue {
    fn from(values: Vec<&str>) -> Self {
        Self::List(values.into_iter().map(str::to_string).collect())
    }
}

/// A titled block of body text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub title: String,
    pub body: String,
}

/// Directed, typed edge to another entity by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: String,
    pub target: String,
}

impl Relationship {
    pub fn new(kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            target: target.into(),
        }
    }
}

/// A typed, uniquely identified record: a work, character, place, etc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<ContentSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationships: Vec<Relationship>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(
        default,
        deserialize_with = "drop_null_facets",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub facets: Facets,
}

impl Entity {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            name: name.into(),
            description: None,
            content: Vec::new(),
            aliases: Vec::new(),
            relationships: Vec::new(),
            properties: BTreeMap::new(),
            tags: Vec::new(),
            facets: Facets::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_section(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.content.push(ContentSection {
            title: title.into(),
            body: body.into(),
        });
        self
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn with_relationship(mut self, kind: impl Into<String>, target: impl Into<String>) -> Self {
        self.relationships.push(Relationship::new(kind, target));
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_facet(mut self, key: impl Into<String>, value: impl Into<FacetValue>) -> Self {
        self.facets.insert(key.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(LoreError::ValidationFailed("entity id must be non-empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(LoreError::ValidationFailed(format!(
                "entity {} has an empty name",
                self.id
            )));
        }
        if self.kind.trim().is_empty() {
            return Err(LoreError::ValidationFailed(format!(
                "entity {} has an empty type",
                self.id
            )));
        }
        Ok(())
    }
}

/// Facet maps may carry explicit nulls; those entries are treated as absent.
fn drop_null_facets<'de, D>(deserializer: D) -> std::result::Result<Facets, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<FacetValue>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(key, value)| value.map(|value| (key, value)))
        .collect())
}
