use serde::Serialize;

use crate::cache::EntityCache;
use crate::domain::{Entity, Identifier, Region, RegionFilter};
use crate::error::DexError;
use crate::pokeapi::CatalogClient;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FetchStats {
    pub network_fetches: u64,
    pub cache_hits: u64,
    pub region_fetches: u64,
}

/// Resolves identifiers through the session cache, falling back to one upstream call.
pub struct EntityFetcher<C: CatalogClient> {
    client: C,
    cache: EntityCache,
    stats: FetchStats,
}

impl<C: CatalogClient> EntityFetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            cache: EntityCache::new(),
            stats: FetchStats::default(),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn cache(&self) -> &EntityCache {
        &self.cache
    }

    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    pub fn fetch(&mut self, id: &Identifier) -> Result<Entity, DexError> {
        if let Some(entity) = self.cache.get(id) {
            self.stats.cache_hits += 1;
            tracing::debug!(id = %id, "cache hit");
            return Ok(entity.clone());
        }

        self.stats.network_fetches += 1;
        tracing::debug!(id = %id, "fetching entity");
        let entity = self.client.fetch_entity(id)?;
        self.cache.put(id.clone(), entity.clone());
        Ok(entity)
    }

    pub fn fetch_term(&mut self, term: &str) -> Result<Entity, DexError> {
        let id: Identifier = term.parse()?;
        self.fetch(&id)
    }

    /// Member species of a region, upstream order, not cached.
    pub fn list_members(&mut self, region: Region) -> Result<Vec<String>, DexError> {
        self.stats.region_fetches += 1;
        tracing::debug!(region = region.pokedex_key(), "fetching region members");
        let members = self.client.fetch_region(region.pokedex_key())?;
        tracing::info!(
            region = region.display_name(),
            members = members.len(),
            "region resolved"
        );
        Ok(members)
    }

    /// Region membership for a mapped region, otherwise the synthetic range `1..=default_range`.
    pub fn resolve_candidates(
        &mut self,
        filter: RegionFilter,
        default_range: u32,
    ) -> Result<Vec<Identifier>, DexError> {
        match filter {
            RegionFilter::Only(region) => self
                .list_members(region)?
                .iter()
                .map(|name| name.parse())
                .collect(),
            RegionFilter::Any => Ok(id_range(default_range)),
        }
    }
}

pub fn id_range(upper: u32) -> Vec<Identifier> {
    (1..=upper).map(Identifier::from).collect()
}
