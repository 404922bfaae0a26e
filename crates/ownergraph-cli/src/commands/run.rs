//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use chrono::{DateTime, Utc};
use ownergraph_domain::Observation;
use ownergraph_pipeline::{CancellationToken, FusionPipeline, FusionStatus};
use ownergraph_store::SqliteGraphStore;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Execute the run command.
///
/// Returns the run's status; a failed store write is reported, not raised.
pub async fn execute_run(
    args: RunArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<FusionStatus> {
    let pipeline_config = config.pipeline_config(args.config.as_deref())?;
    let batch = read_batch(&args.input)?;
    let now = parse_now(args.now.as_deref())?;

    let db = args
        .db
        .or_else(|| config.settings.database.clone())
        .unwrap_or_else(|| PathBuf::from(":memory:"));
    info!("Fusing {} observations into {}", batch.len(), db.display());

    let store = SqliteGraphStore::new(&db)?;
    let pipeline = FusionPipeline::new(pipeline_config, store)?;

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, abandoning the store write");
                cancel.cancel();
            }
        })
    };

    let report = pipeline.execute_at(&batch, now, &cancel).await;
    interrupt.abort();

    if args.prune && report.summary.is_success() {
        let removed = pipeline.store().prune_superseded(&report.relationships)?;
        info!("Pruned {} edges superseded by this run", removed);
    }

    println!("{}", formatter.format_report(&report)?);
    Ok(report.summary.status)
}

/// Read a JSON array of observations from a file, or stdin for `-`.
pub fn read_batch(input: &Path) -> Result<Vec<Observation>> {
    let contents = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };

    parse_batch(&contents)
}

fn parse_batch(contents: &str) -> Result<Vec<Observation>> {
    serde_json::from_str(contents).map_err(|e| {
        CliError::InvalidInput(format!("expected a JSON array of observations: {}", e))
    })
}

/// Parse `--now`, defaulting to the current time.
pub fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| CliError::InvalidInput(format!("--now '{}' is not RFC 3339: {}", raw, e))),
    }
}
