//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use ownergraph_domain::Relationship;
use ownergraph_pipeline::{FusionReport, PipelineConfig};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a fusion run.
    pub fn format_report(&self, report: &FusionReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_report_json(report),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(serde_json::to_string(&report.summary)?),
        }
    }

    fn format_report_json(&self, report: &FusionReport) -> Result<String> {
        let stats = &report.stats;
        let emitted: serde_json::Map<String, serde_json::Value> = stats
            .emitted
            .iter()
            .map(|(kind, count)| (kind.to_string(), (*count).into()))
            .collect();

        let value = serde_json::json!({
            "runId": report.run_id.to_string(),
            "summary": &report.summary,
            "relationships": &report.relationships,
            "extraction": {
                "observationsSeen": stats.observations_seen,
                "observationsUnrecognized": stats.observations_unrecognized,
                "observationsRejected": stats.observations_rejected,
                "entriesSkipped": stats.entries_skipped,
                "emitted": emitted,
            },
        });

        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_report_table(&self, report: &FusionReport) -> String {
        let mut out = String::new();

        if report.relationships.is_empty() {
            out.push_str(&self.colorize("No relationships resolved.", "yellow"));
        } else {
            out.push_str(&self.relationships_table(&report.relationships));
        }
        out.push('\n');

        let summary = &report.summary;
        let line = format!("{} (processed at {})", summary.message, summary.processed_at);
        if summary.is_success() {
            out.push_str(&self.success(&line));
        } else {
            out.push_str(&self.error(&line));
        }
        out.push('\n');
        out.push_str(&self.info(&report.stats.summary()));

        if summary.conflict_count > 0 {
            out.push('\n');
            out.push_str(&self.warning(&format!(
                "{} resource(s) have disagreeing owners",
                summary.conflict_count
            )));
        }

        out
    }

    /// Render relationships as a table.
    pub fn relationships_table(&self, relationships: &[Relationship]) -> String {
        let mut builder = Builder::default();
        builder.push_record([
            "Owner",
            "Resource",
            "Type",
            "Confidence",
            "Source",
            "Observed",
            "Conflict",
        ]);

        for rel in relationships {
            let confidence = format!("{:.3}", rel.confidence);
            let conflict = if rel.has_conflict {
                self.colorize("yes", "red")
            } else {
                "no".to_string()
            };
            builder.push_record([
                rel.from.as_str(),
                rel.to.as_str(),
                rel.relationship_type.as_str(),
                confidence.as_str(),
                rel.source.as_str(),
                rel.timestamp.as_str(),
                conflict.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Describe a validated pipeline configuration.
    pub fn format_pipeline_config(&self, config: &PipelineConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
            OutputFormat::Quiet => Ok(String::new()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Source", "Weight", "Priority"]);

                let mut sources: Vec<&String> = config
                    .scoring
                    .source_weights
                    .keys()
                    .chain(config.conflict.source_priority.keys())
                    .collect();
                sources.sort();
                sources.dedup();

                for source in sources {
                    builder.push_record([
                        source.clone(),
                        format!("{:.2}", config.scoring.weight_for(source)),
                        config.conflict.rank_for(source).to_string(),
                    ]);
                }
                builder.push_record([
                    "(other)".to_string(),
                    format!("{:.2}", config.scoring.default_weight),
                    config.conflict.unranked_priority.to_string(),
                ]);

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}",
                    table,
                    self.info(&format!(
                        "agreement bonus {}, decay {} per {:?}, persist timeout {}s",
                        config.scoring.agreement_bonus,
                        config.scoring.freshness_decay_rate,
                        config.scoring.decay_unit,
                        config.persist_timeout_secs
                    ))
                ))
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
