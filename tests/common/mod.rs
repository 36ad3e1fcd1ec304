//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// A temporary project with an entity directory.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("entities")).expect("create entities dir");
        Self { dir }
    }

    /// A project holding the small film catalogue used across tests.
    pub fn catalogue() -> Self {
        let fixture = Self::new();
        for entity in catalogue_entities() {
            fixture.write_entity(&entity);
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn entities_dir(&self) -> PathBuf {
        self.root().join("entities")
    }

    pub fn index_dir(&self) -> PathBuf {
        self.root().join("index")
    }

    pub fn write_entity(&self, entity: &Value) {
        let id = entity["id"].as_str().expect("fixture entity has an id");
        self.write_raw(&format!("{id}.json"), &entity.to_string());
    }

    pub fn write_raw(&self, file_name: &str, contents: &str) {
        std::fs::write(self.entities_dir().join(file_name), contents).expect("write fixture");
    }
}

pub fn catalogue_entities() -> Vec<Value> {
    vec![
        json!({
            "id": "inception",
            "type": "movie",
            "name": "Inception",
            "description": "A thief who steals secrets through dream-sharing.",
            "content": [
                { "title": "Plot", "body": "Cobb leads a team into layered dreams." }
            ],
            "aliases": ["Origen"],
            "tags": ["sci-fi", "heist"],
            "facets": { "genre": ["sci-fi", "heist"], "era": "2010s", "mindBending": true },
            "relationships": [
                { "type": "directed-by", "target": "nolan" }
            ]
        }),
        json!({
            "id": "cobb",
            "type": "character",
            "name": "Dom Cobb",
            "tags": ["protagonist"],
            "facets": { "genre": ["drama"], "era": "1990s" },
            "relationships": [
                { "type": "appears-in", "target": "inception" }
            ]
        }),
        json!({
            "id": "nolan",
            "type": "person",
            "name": "Christopher Nolan",
            "relationships": [
                { "type": "born-in", "target": "london" }
            ]
        }),
        json!({
            "id": "london",
            "type": "location",
            "name": "London",
            "tags": ["city"],
            "relationships": [
                { "type": "located-in", "target": "england" }
            ]
        }),
        json!({
            "id": "england",
            "type": "location",
            "name": "England"
        }),
        json!({
            "id": "batmobile",
            "type": "vehicle",
            "name": "Batmobile",
            "tags": ["batman"],
            "relationships": [
                { "type": "appears-in", "target": "dark-knight" },
                { "type": "features", "target": "missing-entity" }
            ]
        }),
        json!({
            "id": "dark-knight",
            "type": "movie",
            "name": "The Dark Knight",
            "tags": ["batman", "noir"],
            "facets": { "genre": ["action", "crime"], "franchise": "batman" }
        }),
    ]
}
