use std::io::{self, Write};

use serde::Serialize;

use crate::app::PageResult;
use crate::domain::{Category, Region};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Interactive,
    NonInteractive,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryListing {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegionListing {
    pub name: String,
    pub pokedex: String,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_page(result: &PageResult) -> io::Result<()> {
        Self::print_json(result)
    }

    pub fn print_categories() -> io::Result<()> {
        let listing: Vec<_> = Category::ALL
            .into_iter()
            .map(|category| CategoryListing {
                name: category.as_str().to_string(),
                display_name: category.display_name(),
            })
            .collect();
        Self::print_json(&listing)
    }

    pub fn print_regions() -> io::Result<()> {
        let listing: Vec<_> = Region::ALL
            .into_iter()
            .map(|region| RegionListing {
                name: region.display_name().to_string(),
                pokedex: region.pokedex_key().to_string(),
            })
            .collect();
        Self::print_json(&listing)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

impl crate::app::ProgressSink for JsonOutput {
    fn event(&self, _event: crate::app::ProgressEvent) {}
}
