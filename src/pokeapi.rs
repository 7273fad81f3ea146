use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;

use crate::domain::{CategoryTag, Entity, Identifier};
use crate::error::DexError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

const CATEGORY_ICON_BASE: &str = "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/types/generation-viii/sword-shield";

static CATEGORY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([^/]+)/[^/]*$").expect("category id pattern"));

pub trait CatalogClient: Send + Sync {
    fn fetch_entity(&self, id: &Identifier) -> Result<Entity, DexError>;
    fn fetch_region(&self, key: &str) -> Result<Vec<String>, DexError>;
}

#[derive(Clone)]
pub struct PokeApiHttpClient {
    client: Client,
    base_url: String,
}

impl PokeApiHttpClient {
    pub fn new() -> Result<Self, DexError> {
        Self::with_settings(DEFAULT_BASE_URL, Duration::from_secs(30))
    }

    pub fn with_settings(base_url: &str, timeout: Duration) -> Result<Self, DexError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("pokedex-browser/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| DexError::Http(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| DexError::Http(err.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn entity_url(&self, id: &Identifier) -> String {
        format!("{}/pokemon/{}", self.base_url, id.as_str())
    }

    pub fn region_url(&self, key: &str) -> String {
        format!("{}/pokedex/{}", self.base_url, key)
    }

    fn get_json(&self, url: &str) -> Result<Option<Value>, DexError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| DexError::Http(err.to_string()))?;
        if !response.status().is_success() {
            tracing::debug!(url, status = response.status().as_u16(), "upstream refused");
            return Ok(None);
        }
        let body = response
            .json::<Value>()
            .map_err(|err| DexError::Decode(err.to_string()))?;
        Ok(Some(body))
    }
}

impl CatalogClient for PokeApiHttpClient {
    fn fetch_entity(&self, id: &Identifier) -> Result<Entity, DexError> {
        let url = self.entity_url(id);
        let body = self.get_json(&url)?.ok_or_else(|| DexError::NotFound {
            id: id.to_string(),
        })?;
        decode_entity(&body)
    }

    fn fetch_region(&self, key: &str) -> Result<Vec<String>, DexError> {
        let url = self.region_url(key);
        let body = self
            .get_json(&url)?
            .ok_or_else(|| DexError::RegionNotFound {
                region: key.to_string(),
            })?;
        decode_region_members(&body)
    }
}

/// Decodes a `/pokemon/{id}` body. Only `id` and `name` are required.
pub fn decode_entity(raw: &Value) -> Result<Entity, DexError> {
    let id = raw
        .get("id")
        .and_then(|value| value.as_u64())
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| *value > 0)
        .ok_or_else(|| DexError::Decode("missing or invalid `id`".to_string()))?;
    let name = raw
        .get("name")
        .and_then(|value| value.as_str())
        .map(|value| value.to_string())
        .ok_or_else(|| DexError::Decode("missing `name`".to_string()))?;
    let sprite_url = raw
        .get("sprites")
        .and_then(|value| value.get("front_default"))
        .and_then(|value| value.as_str())
        .map(|value| value.to_string());

    let categories = raw
        .get("types")
        .and_then(|value| value.as_array())
        .map(|array| array.iter().filter_map(decode_category).collect())
        .unwrap_or_default();

    Ok(Entity {
        id,
        name,
        sprite_url,
        categories,
    })
}

fn decode_category(slot: &Value) -> Option<CategoryTag> {
    let kind = slot.get("type")?;
    let name = kind.get("name")?.as_str()?.to_string();
    let url = kind.get("url")?.as_str()?;
    let id = category_id_from_url(url)?;
    Some(CategoryTag {
        name,
        icon_url: category_icon_url(&id),
        id,
    })
}

/// Decodes a `/pokedex/{key}` body into species names, in upstream order.
pub fn decode_region_members(raw: &Value) -> Result<Vec<String>, DexError> {
    let entries = raw
        .get("pokemon_entries")
        .and_then(|value| value.as_array())
        .ok_or_else(|| DexError::Decode("missing `pokemon_entries`".to_string()))?;
    entries
        .iter()
        .map(|entry| {
            entry
                .get("pokemon_species")
                .and_then(|value| value.get("name"))
                .and_then(|value| value.as_str())
                .map(|value| value.to_string())
                .ok_or_else(|| DexError::Decode("entry without species name".to_string()))
        })
        .collect()
}

/// Second-to-last path segment of a type URL such as `.../type/10/`.
pub fn category_id_from_url(url: &str) -> Option<String> {
    CATEGORY_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|value| value.as_str().to_string())
}

pub fn category_icon_url(id: &str) -> String {
    format!("{CATEGORY_ICON_BASE}/{id}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_is_second_to_last_segment() {
        assert_eq!(
            category_id_from_url("https://pokeapi.co/api/v2/type/13/").as_deref(),
            Some("13")
        );
        assert_eq!(
            category_id_from_url("https://pokeapi.co/api/v2/type/4").as_deref(),
            Some("type")
        );
        assert_eq!(category_id_from_url("13"), None);
    }

    #[test]
    fn entity_url_uses_normalized_identifier() {
        let client =
            PokeApiHttpClient::with_settings("https://example.test/api/", Duration::from_secs(1))
                .unwrap();
        let id: Identifier = "Pikachu".parse().unwrap();
        assert_eq!(client.entity_url(&id), "https://example.test/api/pokemon/pikachu");
        assert_eq!(client.region_url("kanto"), "https://example.test/api/pokedex/kanto");
    }
}
