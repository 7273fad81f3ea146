use std::collections::HashMap;

use crate::domain::{Entity, Identifier};

/// Session-lifetime memo of fetched entities. Unbounded, no expiry.
#[derive(Debug, Default, Clone)]
pub struct EntityCache {
    entries: HashMap<Identifier, Entity>,
}

impl EntityCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &Identifier) -> Option<&Entity> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.entries.contains_key(id)
    }

    pub fn put(&mut self, id: Identifier, entity: Entity) {
        self.entries.insert(id, entity);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(id: u32, name: &str) -> Entity {
        Entity {
            id,
            name: name.to_string(),
            sprite_url: None,
            categories: Vec::new(),
        }
    }

    #[test]
    fn presence_does_not_depend_on_value() {
        let mut cache = EntityCache::new();
        let zero = Identifier::from(0);
        assert!(!cache.contains(&zero));
        cache.put(zero.clone(), entity(0, ""));
        assert!(cache.contains(&zero));
        assert_eq!(cache.get(&zero).map(|e| e.id), Some(0));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let mut cache = EntityCache::new();
        cache.put("Pikachu".parse().unwrap(), entity(25, "pikachu"));
        let lookup: Identifier = "PIKACHU".parse().unwrap();
        assert!(cache.get(&lookup).is_some());
        assert_eq!(cache.len(), 1);
    }
}
