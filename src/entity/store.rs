use std::collections::HashMap;

use tracing::debug;

use super::types::Entity;

/// In-memory arena of entities addressed by id.
///
/// Built once per build run and never mutated afterwards. Relationship
/// targets are plain ids, so lookups of unknown ids simply return `None`.
#[derive(Debug, Default, Clone)]
pub struct EntityStore {
    entities: Vec<Entity>,
    by_id: HashMap<String, usize>,
}

impl EntityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records in load order. A repeated id replaces the
    /// earlier record in place, so the later one wins without error.
    pub fn from_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let mut store = Self::new();
        for entity in entities {
            store.insert(entity);
        }
        store
    }

    pub fn insert(&mut self, entity: Entity) {
        if let Some(&slot) = self.by_id.get(&entity.id) {
            debug!(target: "store", id = %entity.id, "duplicate entity id; later record wins");
            self.entities[slot] = entity;
            return;
        }
        self.by_id.insert(entity.id.clone(), self.entities.len());
        self.entities.push(entity);
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.by_id.get(id).map(|&slot| &self.entities[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl FromIterator<Entity> for EntityStore {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        Self::from_entities(iter)
    }
}
