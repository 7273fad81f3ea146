use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::DexError;

/// Normalized cache and request key: trimmed, lowercased, numeric ids in decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identifier {
    type Err = DexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        if normalized.is_empty() || normalized.contains(['/', '?', '#']) {
            return Err(DexError::InvalidIdentifier(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

impl From<u32> for Identifier {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl Category {
    pub const ALL: [Category; 18] = [
        Category::Normal,
        Category::Fire,
        Category::Water,
        Category::Electric,
        Category::Grass,
        Category::Ice,
        Category::Fighting,
        Category::Poison,
        Category::Ground,
        Category::Flying,
        Category::Psychic,
        Category::Bug,
        Category::Rock,
        Category::Ghost,
        Category::Dragon,
        Category::Dark,
        Category::Steel,
        Category::Fairy,
    ];

    /// Upstream type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Normal => "normal",
            Category::Fire => "fire",
            Category::Water => "water",
            Category::Electric => "electric",
            Category::Grass => "grass",
            Category::Ice => "ice",
            Category::Fighting => "fighting",
            Category::Poison => "poison",
            Category::Ground => "ground",
            Category::Flying => "flying",
            Category::Psychic => "psychic",
            Category::Bug => "bug",
            Category::Rock => "rock",
            Category::Ghost => "ghost",
            Category::Dragon => "dragon",
            Category::Dark => "dark",
            Category::Steel => "steel",
            Category::Fairy => "fairy",
        }
    }

    pub fn display_name(self) -> String {
        capitalize(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Category {
    type Err = DexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DexError::InvalidCategory(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    Any,
    Only(Category),
}

impl CategoryFilter {
    /// The 19 select options, `Any` first.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::Any)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    pub fn matches(&self, entity: &Entity) -> bool {
        match self {
            CategoryFilter::Any => true,
            CategoryFilter::Only(category) => entity.has_category(category.as_str()),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::Any => write!(f, "Any"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for CategoryFilter {
    type Err = DexError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("any") {
            return Ok(CategoryFilter::Any);
        }
        Ok(CategoryFilter::Only(value.parse()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Kanto,
    Johto,
    Hoenn,
    Sinnoh,
    Unova,
    Kalos,
    Alola,
    Galar,
    Hisui,
    Paldea,
}

impl Region {
    pub const ALL: [Region; 10] = [
        Region::Kanto,
        Region::Johto,
        Region::Hoenn,
        Region::Sinnoh,
        Region::Unova,
        Region::Kalos,
        Region::Alola,
        Region::Galar,
        Region::Hisui,
        Region::Paldea,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Region::Kanto => "Kanto",
            Region::Johto => "Johto",
            Region::Hoenn => "Hoenn",
            Region::Sinnoh => "Sinnoh",
            Region::Unova => "Unova",
            Region::Kalos => "Kalos",
            Region::Alola => "Alola",
            Region::Galar => "Galar",
            Region::Hisui => "Hisui",
            Region::Paldea => "Paldea",
        }
    }

    /// Key of the regional pokedex on the upstream `/pokedex/{key}` endpoint.
    pub fn pokedex_key(self) -> &'static str {
        match self {
            Region::Kanto => "kanto",
            Region::Johto => "original-johto",
            Region::Hoenn => "hoenn",
            Region::Sinnoh => "original-sinnoh",
            Region::Unova => "original-unova",
            Region::Kalos => "kalos-central",
            Region::Alola => "original-alola",
            Region::Galar => "galar",
            Region::Hisui => "hisui",
            Region::Paldea => "paldea",
        }
    }

    pub fn from_name(value: &str) -> Option<Region> {
        let needle = value.trim();
        Region::ALL
            .into_iter()
            .find(|region| region.display_name().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    Any,
    Only(Region),
}

impl RegionFilter {
    /// The 11 select options, `Any` first.
    pub fn options() -> Vec<RegionFilter> {
        std::iter::once(RegionFilter::Any)
            .chain(Region::ALL.into_iter().map(RegionFilter::Only))
            .collect()
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::Any => write!(f, "Any"),
            RegionFilter::Only(region) => write!(f, "{region}"),
        }
    }
}

impl Serialize for RegionFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Names outside the region table mean "no region filter".
impl FromStr for RegionFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(Region::from_name(value)
            .map(RegionFilter::Only)
            .unwrap_or(RegionFilter::Any))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTag {
    pub name: String,
    pub id: String,
    pub icon_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub name: String,
    pub sprite_url: Option<String>,
    pub categories: Vec<CategoryTag>,
}

impl Entity {
    pub fn has_category(&self, name: &str) -> bool {
        self.categories
            .iter()
            .any(|tag| tag.name.eq_ignore_ascii_case(name))
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn identifier_is_normalized() {
        let id: Identifier = "  Pikachu ".parse().unwrap();
        assert_eq!(id.as_str(), "pikachu");
        assert_eq!(Identifier::from(25), "25".parse::<Identifier>().unwrap());
    }

    #[test]
    fn identifier_rejects_empty() {
        let err = "   ".parse::<Identifier>().unwrap_err();
        assert_matches!(err, DexError::InvalidIdentifier(_));
    }

    #[test]
    fn identifier_rejects_url_delimiters() {
        for term in ["mr/mime", "pikachu?x", "25#a"] {
            assert_matches!(
                term.parse::<Identifier>(),
                Err(DexError::InvalidIdentifier(_))
            );
        }
    }

    #[test]
    fn category_filter_options() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 19);
        assert_eq!(options[0], CategoryFilter::Any);
        assert_eq!(
            "FIRE".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Fire)
        );
        assert_eq!("Any".parse::<CategoryFilter>().unwrap(), CategoryFilter::Any);
    }

    #[test]
    fn unknown_region_means_no_filter() {
        assert_eq!(RegionFilter::options().len(), 11);
        assert_eq!(
            "kanto".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Kanto)
        );
        assert_eq!("Atlantis".parse::<RegionFilter>().unwrap(), RegionFilter::Any);
        assert_eq!(Region::Kalos.pokedex_key(), "kalos-central");
    }
}
