//! Statistics collected during extraction

use ownergraph_domain::SourceKind;
use std::collections::BTreeMap;

/// Counters for one extraction pass
///
/// Nothing here is an error condition. These numbers exist so operators can
/// see how much of a batch was usable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionStats {
    /// Observations received
    pub observations_seen: usize,

    /// Observations from sources without a decoder
    pub observations_unrecognized: usize,

    /// Observations dropped for an empty source or timestamp
    pub observations_rejected: usize,

    /// Entries (or single owners) skipped while decoding
    pub entries_skipped: usize,

    /// Relationships emitted per source kind
    pub emitted: BTreeMap<SourceKind, usize>,
}

impl ExtractionStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observation entering the extractor
    pub fn record_observation(&mut self) {
        self.observations_seen += 1;
    }

    /// Record an observation from an unknown source
    pub fn record_unrecognized(&mut self) {
        self.observations_unrecognized += 1;
    }

    /// Record an observation that failed the edge invariants
    pub fn record_rejected(&mut self) {
        self.observations_rejected += 1;
    }

    /// Record skipped entries
    pub fn record_skipped(&mut self, count: usize) {
        self.entries_skipped += count;
    }

    /// Record emitted relationships for a source kind
    pub fn record_emitted(&mut self, kind: SourceKind, count: usize) {
        if count > 0 {
            *self.emitted.entry(kind).or_insert(0) += count;
        }
    }

    /// Total relationships emitted across all sources
    pub fn total_emitted(&self) -> usize {
        self.emitted.values().sum()
    }

    /// Generate a one-line summary
    pub fn summary(&self) -> String {
        let per_source: Vec<String> = self
            .emitted
            .iter()
            .map(|(kind, count)| format!("{}={}", kind, count))
            .collect();

        format!(
            "{} observations ({} unrecognized, {} rejected), {} entries skipped, {} relationships [{}]",
            self.observations_seen,
            self.observations_unrecognized,
            self.observations_rejected,
            self.entries_skipped,
            self.total_emitted(),
            per_source.join(", ")
        )
    }
}
