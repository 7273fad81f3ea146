use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::app::{ProgressEvent, ProgressSink};
use crate::domain::{CategoryFilter, Entity, Identifier};
use crate::error::DexError;
use crate::fetcher::EntityFetcher;
use crate::pokeapi::CatalogClient;

/// What a filtered scan does when a single candidate cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub results: Vec<Entity>,
    pub scanned: usize,
    pub skipped: Vec<String>,
}

/// Sequential scan over `candidates`, keeping matches until `cap` is reached.
pub fn run<C: CatalogClient>(
    fetcher: &mut EntityFetcher<C>,
    candidates: &[Identifier],
    filter: CategoryFilter,
    cap: usize,
    policy: FailurePolicy,
    sink: &dyn ProgressSink,
) -> Result<PipelineOutcome, DexError> {
    let mut results = Vec::new();
    let mut skipped = Vec::new();
    let mut scanned = 0usize;

    sink.event(ProgressEvent {
        message: format!(
            "phase=Scan; {} candidates, filter {filter}, cap {cap}",
            candidates.len()
        ),
        elapsed: None,
    });

    for candidate in candidates {
        if results.len() >= cap {
            break;
        }
        scanned += 1;
        let entity = match fetcher.fetch(candidate) {
            Ok(entity) => entity,
            Err(err) => match policy {
                FailurePolicy::Abort => {
                    tracing::warn!(id = %candidate, error = %err, "scan aborted");
                    return Err(err);
                }
                FailurePolicy::Skip => {
                    tracing::warn!(id = %candidate, error = %err, "skipping candidate");
                    sink.event(ProgressEvent {
                        message: format!("skip {candidate}: {err}"),
                        elapsed: None,
                    });
                    skipped.push(candidate.to_string());
                    continue;
                }
            },
        };

        if filter.matches(&entity) {
            sink.event(ProgressEvent {
                message: format!("match #{} {}", entity.id, entity.name),
                elapsed: None,
            });
            results.push(entity);
        }
    }

    tracing::info!(
        scanned,
        retained = results.len(),
        skipped = skipped.len(),
        "filter scan finished"
    );
    sink.event(ProgressEvent {
        message: format!("phase=Render; scanned {scanned}, kept {}", results.len()),
        elapsed: None,
    });

    Ok(PipelineOutcome {
        results,
        scanned,
        skipped,
    })
}
