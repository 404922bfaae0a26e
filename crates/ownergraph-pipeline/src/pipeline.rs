//! Fusion pipeline orchestrator

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::summary::{FusionReport, FusionSummary};
use chrono::{DateTime, Utc};
use ownergraph_domain::{GraphStore, Observation, Relationship};
use ownergraph_extractor::{ExtractionStats, ObservationExtractor};
use ownergraph_resolver::{ConflictResolver, Resolution};
use ownergraph_scorer::ConfidenceScorer;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Result of the three pure stages, before persistence
#[derive(Debug, Clone, PartialEq)]
pub struct Fusion {
    /// One relationship per `(to, type)`
    pub resolution: Resolution,

    /// What the Extractor read and skipped
    pub stats: ExtractionStats,
}

/// Runs Extract → Score → Resolve → persist over one batch
///
/// Stateless between runs: the same batch and "now" always resolve to the
/// same edges, so a failed run can be retried end to end.
///
/// # Examples
///
/// ```no_run
/// use ownergraph_pipeline::{FusionPipeline, PipelineConfig};
/// use ownergraph_store::MemoryGraphStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pipeline = FusionPipeline::new(PipelineConfig::default(), MemoryGraphStore::new())?;
/// let summary = pipeline.run(&[]).await;
/// assert!(summary.is_success());
/// # Ok(())
/// # }
/// ```
pub struct FusionPipeline<S> {
    extractor: ObservationExtractor,
    scorer: ConfidenceScorer,
    resolver: ConflictResolver,
    store: Arc<S>,
    persist_timeout: Duration,
}

impl<S> FusionPipeline<S>
where
    S: GraphStore + Send + Sync + 'static,
    S::Error: std::fmt::Display,
{
    /// Create a pipeline that owns its store
    pub fn new(config: PipelineConfig, store: S) -> Result<Self, PipelineError> {
        Self::with_shared_store(config, Arc::new(store))
    }

    /// Create a pipeline over a store shared with the caller
    pub fn with_shared_store(config: PipelineConfig, store: Arc<S>) -> Result<Self, PipelineError> {
        config.validate()?;

        Ok(Self {
            persist_timeout: config.persist_timeout(),
            extractor: ObservationExtractor::new(config.extractor),
            scorer: ConfidenceScorer::new(config.scoring),
            resolver: ConflictResolver::new(config.conflict),
            store,
        })
    }

    /// The graph store edges are written to
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Extract, score and resolve without persisting
    pub fn fuse(&self, batch: &[Observation], now: DateTime<Utc>) -> Fusion {
        let extraction = self.extractor.extract_with_stats(batch);
        let scored = self.scorer.score(&extraction.relationships, now);
        let resolution = self.resolver.resolve(&scored);

        Fusion {
            resolution,
            stats: extraction.stats,
        }
    }

    /// Run over a batch using the current time as "now"
    pub async fn run(&self, batch: &[Observation]) -> FusionSummary {
        self.run_at(batch, Utc::now()).await
    }

    /// Run over a batch with an injected "now"
    pub async fn run_at(&self, batch: &[Observation], now: DateTime<Utc>) -> FusionSummary {
        self.execute_at(batch, now, &CancellationToken::new())
            .await
            .summary
    }

    /// Run over a batch and return the full report
    ///
    /// Cancelling `cancel` abandons the store write; the report then carries
    /// an error summary. Never returns an error itself.
    pub async fn execute_at(
        &self,
        batch: &[Observation],
        now: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> FusionReport {
        let run_id = Uuid::now_v7();
        let span = info_span!("fusion_run", %run_id, observations = batch.len());

        async move {
            let Fusion { resolution, stats } = self.fuse(batch, now);

            let summary = match self.persist(resolution.relationships.clone(), cancel).await {
                Ok(()) => {
                    let summary = FusionSummary::success(&resolution, now);
                    info!("{}", summary.message);
                    summary
                }
                Err(e) => {
                    let summary = FusionSummary::failure(&resolution, now, &e);
                    warn!("{}", summary.message);
                    summary
                }
            };

            FusionReport {
                run_id,
                summary,
                relationships: resolution.relationships,
                stats,
            }
        }
        .instrument(span)
        .await
    }

    /// Write resolved edges on a blocking worker under the deadline
    ///
    /// No lock is held here while the store runs. A write abandoned by
    /// timeout or cancellation may still complete in the background.
    async fn persist(
        &self,
        edges: Vec<Relationship>,
        cancel: &CancellationToken,
    ) -> Result<(), PipelineError> {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        debug!("Persisting {} edges", edges.len());
        let store = Arc::clone(&self.store);
        let write = tokio::task::spawn_blocking(move || {
            store.upsert_edges(&edges).map_err(|e| e.to_string())
        });

        tokio::select! {
            biased;

            _ = cancel.cancelled() => Err(PipelineError::Cancelled),
            outcome = tokio::time::timeout(self.persist_timeout, write) => match outcome {
                Err(_) => Err(PipelineError::Timeout(self.persist_timeout.as_secs())),
                Ok(Err(join_error)) => Err(PipelineError::Worker(join_error.to_string())),
                Ok(Ok(Err(message))) => Err(PipelineError::Persistence(message)),
                Ok(Ok(Ok(()))) => Ok(()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use std::sync::Mutex;

    // Mock store for testing
    #[derive(Default)]
    struct RecordingStore {
        batches: Mutex<Vec<Vec<Relationship>>>,
    }

    impl GraphStore for RecordingStore {
        type Error = String;

        fn upsert_edge(&self, edge: &Relationship) -> Result<(), Self::Error> {
            self.upsert_edges(std::slice::from_ref(edge))
        }

        fn upsert_edges(&self, edges: &[Relationship]) -> Result<(), Self::Error> {
            self.batches
                .lock()
                .map_err(|_| "poisoned".to_string())?
                .push(edges.to_vec());
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_persists_whole_resolution_once() {
        let pipeline =
            FusionPipeline::new(PipelineConfig::default(), RecordingStore::default()).unwrap();
        let batch = vec![Observation::new(
            "codeowners",
            json!([{"path": "/src/main", "owners": ["@user1", "@team/backend"]}]),
            0.8,
            "2024-05-01T12:00:00Z",
        )];

        let report = pipeline.execute_at(&batch, now(), &CancellationToken::new()).await;

        assert!(report.summary.is_success());
        let batches = pipeline.store().batches.lock().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], report.relationships);
    }

    #[tokio::test]
    async fn test_cancelled_before_persist() {
        let pipeline =
            FusionPipeline::new(PipelineConfig::default(), RecordingStore::default()).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = pipeline.execute_at(&[], now(), &cancel).await;

        assert!(!report.summary.is_success());
        assert!(report.summary.message.contains("cancelled"));
        assert!(pipeline.store().batches.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            persist_timeout_secs: 0,
            ..Default::default()
        };
        let result = FusionPipeline::new(config, RecordingStore::default());
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_fuse_does_not_persist() {
        let pipeline =
            FusionPipeline::new(PipelineConfig::default(), RecordingStore::default()).unwrap();
        let batch = vec![Observation::new(
            "kubernetes",
            json!({"resourceName": "deploy/api", "owner": "team-api"}),
            0.7,
            "2024-05-01",
        )];

        let fusion = pipeline.fuse(&batch, now());
        assert_eq!(fusion.resolution.len(), 1);
        assert_eq!(fusion.stats.observations_seen, 1);
        assert!(pipeline.store().batches.lock().unwrap().is_empty());
    }
}
