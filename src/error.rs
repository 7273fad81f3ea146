use camino::Utf8PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum DexError {
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("invalid category: {0}")]
    InvalidCategory(String),

    #[error("unknown command: {0}")]
    InvalidCommand(String),

    #[error("entity not found: {id}")]
    NotFound { id: String },

    #[error("region not found: {region}")]
    RegionNotFound { region: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("PokeAPI request failed: {0}")]
    Http(String),

    #[error("config file not found: {0}")]
    MissingConfig(Utf8PathBuf),

    #[error("failed to read config file at {0}")]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("invalid config value: {0}")]
    InvalidConfig(String),
}
