use assert_matches::assert_matches;
use serde_json::json;

use pokedex_browser::error::DexError;
use pokedex_browser::pokeapi::{decode_entity, decode_region_members};

fn fixture(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap()
}

#[test]
fn decodes_single_category_entity() {
    let raw = fixture(include_str!("fixtures/pokemon_25.json"));
    let entity = decode_entity(&raw).unwrap();

    assert_eq!(entity.id, 25);
    assert_eq!(entity.name, "pikachu");
    assert_eq!(
        entity.sprite_url.as_deref(),
        Some("https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png")
    );
    assert_eq!(entity.categories.len(), 1);
    let tag = &entity.categories[0];
    assert_eq!(tag.name, "electric");
    assert_eq!(tag.id, "13");
    assert!(tag.icon_url.ends_with("/types/generation-viii/sword-shield/13.png"));
}

#[test]
fn keeps_upstream_category_order() {
    let raw = fixture(include_str!("fixtures/pokemon_6.json"));
    let entity = decode_entity(&raw).unwrap();

    let names: Vec<_> = entity.categories.iter().map(|tag| tag.name.as_str()).collect();
    assert_eq!(names, ["fire", "flying"]);
    assert!(entity.has_category("FIRE"));
    assert!(!entity.has_category("water"));
}

#[test]
fn optional_fields_may_be_missing() {
    let entity = decode_entity(&json!({ "id": 132, "name": "ditto" })).unwrap();
    assert_eq!(entity.sprite_url, None);
    assert!(entity.categories.is_empty());
}

#[test]
fn entity_without_id_is_a_decode_error() {
    let err = decode_entity(&json!({ "name": "missingno" })).unwrap_err();
    assert_matches!(err, DexError::Decode(_));
}

#[test]
fn region_members_keep_pokedex_order() {
    let raw = fixture(include_str!("fixtures/pokedex_kanto.json"));
    let members = decode_region_members(&raw).unwrap();
    assert_eq!(
        members,
        ["bulbasaur", "ivysaur", "venusaur", "charmander", "charmeleon", "charizard"]
    );
}

#[test]
fn region_without_entries_is_a_decode_error() {
    let err = decode_region_members(&json!({ "name": "kanto" })).unwrap_err();
    assert_matches!(err, DexError::Decode(_));
}
