use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::ResolvedConfig;
use crate::domain::{CategoryFilter, Entity, RegionFilter};
use crate::error::DexError;
use crate::fetcher::{EntityFetcher, FetchStats, id_range};
use crate::pager::{BATCH_SIZE, Card, Pager, SEARCH_FAILED};
use crate::pipeline::{self, FailurePolicy};
use crate::pokeapi::CatalogClient;

#[derive(Debug, Clone, Copy)]
pub enum ProgressSinkKind {
    Browse,
    Search,
    Filter,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ViewState {
    Idle,
    Loading,
    ShowingResults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub filter_range: u32,
    pub reset_range: u32,
    pub cap: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            filter_range: 200,
            reset_range: 100,
            cap: BATCH_SIZE * 4,
            failure_policy: FailurePolicy::Abort,
        }
    }
}

impl From<&ResolvedConfig> for SearchSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            filter_range: config.filter_range,
            reset_range: config.reset_range,
            cap: config.cap,
            failure_policy: config.failure_policy,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchInputs {
    pub term: String,
    pub category: CategoryFilter,
    pub region: RegionFilter,
}

/// Handle for one search; results carrying an outdated generation are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageResult {
    pub generation: u64,
    pub state: ViewState,
    pub inputs: SearchInputs,
    pub total: usize,
    pub shown: usize,
    pub has_more: bool,
    pub placeholder: Option<String>,
    pub cards: Vec<Card>,
    pub stats: FetchStats,
}

pub struct App<C: CatalogClient> {
    fetcher: EntityFetcher<C>,
    pager: Pager,
    settings: SearchSettings,
    inputs: SearchInputs,
    state: ViewState,
    generation: u64,
}

impl<C: CatalogClient> App<C> {
    pub fn new(client: C, settings: SearchSettings) -> Self {
        Self {
            fetcher: EntityFetcher::new(client),
            pager: Pager::new(),
            settings,
            inputs: SearchInputs::default(),
            state: ViewState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn inputs(&self) -> &SearchInputs {
        &self.inputs
    }

    pub fn settings(&self) -> SearchSettings {
        self.settings
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn fetcher(&self) -> &EntityFetcher<C> {
        &self.fetcher
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Single-identifier search. Failures show as an empty result set.
    pub fn search(&mut self, term: &str, sink: &dyn ProgressSink) {
        let term = term.trim();
        if term.is_empty() {
            return;
        }
        self.inputs.term = term.to_string();

        let ticket = self.begin_search();
        sink.event(ProgressEvent {
            message: format!("phase=Fetch; looking up {term}"),
            elapsed: None,
        });
        let start = Instant::now();
        let results = match self.fetcher.fetch_term(term) {
            Ok(entity) => vec![entity],
            Err(err) => {
                tracing::debug!(term, error = %err, "search returned nothing");
                Vec::new()
            }
        };
        sink.event(ProgressEvent {
            message: format!("phase=Render; {} result(s)", results.len()),
            elapsed: Some(start.elapsed()),
        });
        self.apply_results(ticket, results);
    }

    /// Category/region scan capped at `settings.cap`.
    pub fn filtered_search(
        &mut self,
        category: CategoryFilter,
        region: RegionFilter,
        sink: &dyn ProgressSink,
    ) -> Result<(), DexError> {
        self.inputs.category = category;
        self.inputs.region = region;

        let ticket = self.begin_search();
        sink.event(ProgressEvent {
            message: format!("phase=Resolve; region {region}"),
            elapsed: None,
        });
        let start = Instant::now();
        let outcome = self
            .fetcher
            .resolve_candidates(region, self.settings.filter_range)
            .and_then(|candidates| {
                pipeline::run(
                    &mut self.fetcher,
                    &candidates,
                    category,
                    self.settings.cap,
                    self.settings.failure_policy,
                    sink,
                )
            });
        self.finish(ticket, outcome.map(|outcome| outcome.results), start, sink)
    }

    /// Clears the inputs and re-runs the unfiltered default search.
    pub fn reset(&mut self, sink: &dyn ProgressSink) -> Result<(), DexError> {
        self.inputs = SearchInputs::default();
        self.browse(sink)
    }

    /// Unfiltered scan over `1..=settings.reset_range`.
    pub fn browse(&mut self, sink: &dyn ProgressSink) -> Result<(), DexError> {
        let ticket = self.begin_search();
        let candidates = id_range(self.settings.reset_range);
        let start = Instant::now();
        let outcome = pipeline::run(
            &mut self.fetcher,
            &candidates,
            CategoryFilter::Any,
            candidates.len(),
            self.settings.failure_policy,
            sink,
        );
        self.finish(ticket, outcome.map(|outcome| outcome.results), start, sink)
    }

    pub fn load_more(&mut self) -> &[Card] {
        self.pager.render_next()
    }

    pub fn begin_search(&mut self) -> SearchTicket {
        self.generation += 1;
        self.state = ViewState::Loading;
        self.pager.show_loading();
        SearchTicket {
            generation: self.generation,
        }
    }

    /// Returns `false` when a newer search has started since `ticket` was issued.
    pub fn apply_results(&mut self, ticket: SearchTicket, results: Vec<Entity>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale results"
            );
            return false;
        }
        self.pager.set_results(results);
        self.state = ViewState::ShowingResults;
        true
    }

    pub fn page(&self) -> PageResult {
        PageResult {
            generation: self.generation,
            state: self.state,
            inputs: self.inputs.clone(),
            total: self.pager.total(),
            shown: self.pager.displayed().len(),
            has_more: self.pager.has_more(),
            placeholder: self.pager.placeholder().map(|text| text.to_string()),
            cards: self.pager.displayed().to_vec(),
            stats: self.fetcher.stats(),
        }
    }

    fn finish(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<Entity>, DexError>,
        start: Instant,
        sink: &dyn ProgressSink,
    ) -> Result<(), DexError> {
        match outcome {
            Ok(results) => {
                sink.event(ProgressEvent {
                    message: format!("phase=Render; {} result(s)", results.len()),
                    elapsed: Some(start.elapsed()),
                });
                self.apply_results(ticket, results);
                Ok(())
            }
            Err(err) => {
                if ticket.generation == self.generation {
                    self.pager.show_placeholder(SEARCH_FAILED);
                    self.state = ViewState::Idle;
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Identifier;
    use crate::output::JsonOutput;

    struct Offline;

    impl CatalogClient for Offline {
        fn fetch_entity(&self, id: &Identifier) -> Result<Entity, DexError> {
            Err(DexError::NotFound { id: id.to_string() })
        }

        fn fetch_region(&self, key: &str) -> Result<Vec<String>, DexError> {
            Err(DexError::RegionNotFound {
                region: key.to_string(),
            })
        }
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut app = App::new(Offline, SearchSettings::default());
        let first = app.begin_search();
        let second = app.begin_search();
        assert!(!app.apply_results(first, Vec::new()));
        assert_eq!(app.state(), ViewState::Loading);
        assert!(app.apply_results(second, Vec::new()));
        assert_eq!(app.state(), ViewState::ShowingResults);
    }

    #[test]
    fn blank_search_is_ignored() {
        let mut app = App::new(Offline, SearchSettings::default());
        app.search("   ", &JsonOutput);
        assert_eq!(app.state(), ViewState::Idle);
        assert_eq!(app.generation(), 0);
    }
}
