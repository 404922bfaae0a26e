//! Outward summary and report types

use crate::error::PipelineError;
use chrono::{DateTime, SecondsFormat, Utc};
use ownergraph_domain::Relationship;
use ownergraph_extractor::ExtractionStats;
use ownergraph_resolver::Resolution;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Outcome of a run as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FusionStatus {
    /// Resolved edges were persisted
    Success,
    /// Resolution was computed but could not be persisted
    Error,
}

impl fmt::Display for FusionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FusionStatus::Success => f.write_str("success"),
            FusionStatus::Error => f.write_str("error"),
        }
    }
}

/// The structured response of a run
///
/// Always well formed. Success and failure differ only in `status` and
/// `message`; the counts describe the computed resolution either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionSummary {
    /// `success` or `error`
    pub status: FusionStatus,

    /// Human-readable outcome
    pub message: String,

    /// Number of resolved relationships
    pub relationship_count: usize,

    /// Number of resolved relationships flagged `hasConflict`
    pub conflict_count: usize,

    /// The run's "now", RFC 3339
    pub processed_at: String,
}

impl FusionSummary {
    /// Summary of a persisted resolution
    pub fn success(resolution: &Resolution, now: DateTime<Utc>) -> Self {
        Self {
            status: FusionStatus::Success,
            message: format!(
                "Processed {} relationships ({} conflicts)",
                resolution.len(),
                resolution.conflict_count
            ),
            relationship_count: resolution.len(),
            conflict_count: resolution.conflict_count,
            processed_at: format_instant(now),
        }
    }

    /// Summary of a resolution that failed to persist
    pub fn failure(resolution: &Resolution, now: DateTime<Utc>, error: &PipelineError) -> Self {
        Self {
            status: FusionStatus::Error,
            message: format!(
                "Failed to persist {} relationships: {}",
                resolution.len(),
                error
            ),
            relationship_count: resolution.len(),
            conflict_count: resolution.conflict_count,
            processed_at: format_instant(now),
        }
    }

    /// Whether the run succeeded
    pub fn is_success(&self) -> bool {
        self.status == FusionStatus::Success
    }
}

fn format_instant(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Everything a run produced, for callers that need more than the summary
#[derive(Debug, Clone)]
pub struct FusionReport {
    /// Identifier used in this run's log span
    pub run_id: Uuid,

    /// The structured response
    pub summary: FusionSummary,

    /// Resolved relationships (persisted only if the summary says success)
    pub relationships: Vec<Relationship>,

    /// What the Extractor read and skipped
    pub stats: ExtractionStats,
}
