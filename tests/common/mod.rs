#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use pokedex_browser::app::{ProgressEvent, ProgressSink};
use pokedex_browser::domain::{CategoryTag, Entity, Identifier};
use pokedex_browser::error::DexError;
use pokedex_browser::pokeapi::{CatalogClient, category_icon_url};

/// In-memory catalog that records every upstream call it receives.
#[derive(Default)]
pub struct MockCatalog {
    entities: HashMap<String, Entity>,
    regions: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    region_calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    /// Entities `1..=upper` named `mon-{id}`, typed by `categories`.
    pub fn numbered(upper: u32, categories: impl Fn(u32) -> Vec<&'static str>) -> Self {
        let mut catalog = Self::default();
        for id in 1..=upper {
            let entity = entity(id, &format!("mon-{id}"), &categories(id));
            catalog.entities.insert(id.to_string(), entity);
        }
        catalog
    }

    /// Registers `entity` under both its number and its name.
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.insert(entity.id.to_string(), entity.clone());
        self.entities.insert(entity.name.clone(), entity);
        self
    }

    pub fn with_region(mut self, key: &str, members: &[&str]) -> Self {
        self.regions.insert(
            key.to_string(),
            members.iter().map(|name| name.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn region_calls(&self) -> Vec<String> {
        self.region_calls.lock().unwrap().clone()
    }
}

impl CatalogClient for MockCatalog {
    fn fetch_entity(&self, id: &Identifier) -> Result<Entity, DexError> {
        self.calls.lock().unwrap().push(id.to_string());
        if self.failing.contains(id.as_str()) {
            return Err(DexError::Http(format!("connection reset fetching {id}")));
        }
        self.entities
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| DexError::NotFound { id: id.to_string() })
    }

    fn fetch_region(&self, key: &str) -> Result<Vec<String>, DexError> {
        self.region_calls.lock().unwrap().push(key.to_string());
        self.regions
            .get(key)
            .cloned()
            .ok_or_else(|| DexError::RegionNotFound {
                region: key.to_string(),
            })
    }
}

#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn event(&self, event: ProgressEvent) {
        self.messages.lock().unwrap().push(event.message);
    }
}

pub fn entity(id: u32, name: &str, categories: &[&str]) -> Entity {
    Entity {
        id,
        name: name.to_string(),
        sprite_url: Some(format!("https://sprites.test/{id}.png")),
        categories: categories
            .iter()
            .enumerate()
            .map(|(slot, category)| {
                let id = (slot + 1).to_string();
                CategoryTag {
                    name: category.to_string(),
                    icon_url: category_icon_url(&id),
                    id,
                }
            })
            .collect(),
    }
}

/// Even numbers are fire, odd numbers are water.
pub fn fire_on_even(id: u32) -> Vec<&'static str> {
    if id % 2 == 0 { vec!["fire"] } else { vec!["water"] }
}

pub fn ids(entities: &[Entity]) -> Vec<u32> {
    entities.iter().map(|entity| entity.id).collect()
}
