pub mod app;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod output;
pub mod pager;
pub mod pipeline;
pub mod pokeapi;
pub mod tui;
