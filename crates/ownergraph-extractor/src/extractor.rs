//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::payload::{DecodedPayload, SourcePayload};
use crate::stats::ExtractionStats;
use ownergraph_domain::{clamp_confidence, Observation, Relationship};
use tracing::{debug, info, warn};

/// Output of one extraction pass
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Canonical facts in observation order, then payload order
    pub relationships: Vec<Relationship>,

    /// What was read, skipped and emitted
    pub stats: ExtractionStats,
}

/// Turns raw observations into canonical ownership facts
///
/// Total: every input produces an output, possibly empty. Unknown sources,
/// malformed entries and unusable observations are skipped and counted.
#[derive(Debug, Clone, Default)]
pub struct ObservationExtractor {
    config: ExtractorConfig,
}

impl ObservationExtractor {
    /// Create a new Extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Create an Extractor with default configuration
    pub fn default_config() -> Self {
        Self::new(ExtractorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract relationships from a batch of observations
    pub fn extract(&self, observations: &[Observation]) -> Vec<Relationship> {
        self.extract_with_stats(observations).relationships
    }

    /// Extract relationships and report what happened along the way
    pub fn extract_with_stats(&self, observations: &[Observation]) -> Extraction {
        let mut stats = ExtractionStats::new();
        let mut relationships = Vec::new();

        for (idx, observation) in observations.iter().enumerate() {
            stats.record_observation();
            relationships.extend(self.extract_observation(idx, observation, &mut stats));
        }

        info!("Extraction complete: {}", stats.summary());

        Extraction {
            relationships,
            stats,
        }
    }

    /// Extract relationships from a single observation
    fn extract_observation(
        &self,
        idx: usize,
        observation: &Observation,
        stats: &mut ExtractionStats,
    ) -> Vec<Relationship> {
        let source = observation.source.trim();
        if source.is_empty() || observation.timestamp.is_empty() {
            debug!("Observation {} has no source or timestamp, skipping", idx);
            stats.record_rejected();
            return Vec::new();
        }

        let DecodedPayload { payload, skipped } =
            SourcePayload::decode(source, &observation.payload, &self.config);

        for e in &skipped {
            debug!("Observation {} ({}): skipped {}", idx, source, e);
        }
        stats.record_skipped(skipped.len());

        let Some(kind) = payload.kind() else {
            warn!("Observation {} has unrecognized source '{}', skipping", idx, source);
            stats.record_unrecognized();
            return Vec::new();
        };

        let confidence = clamp_confidence(observation.confidence);
        let relationships: Vec<Relationship> = payload
            .ownership_pairs()
            .into_iter()
            .map(|(owner, resource)| {
                Relationship::owns(
                    owner,
                    resource,
                    confidence,
                    source,
                    observation.timestamp.clone(),
                )
            })
            .collect();

        stats.record_emitted(kind, relationships.len());
        relationships
    }
}
