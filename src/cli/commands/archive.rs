//! Archive command implementation.
//!
//! Selects the run mode from the flags: `-a` updates an existing archive,
//! `-o` writes a full archive to a file, otherwise the full archive goes to
//! stdout. Summaries go to stderr so stdout stays pure JSONL.

use std::io::{self, BufWriter};
use std::path::Path;

use colored::Colorize;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::config::load_config;
use crate::error::{Error, Result};
use crate::sync::{Archiver, SyncStats, count_lines};
use crate::timeline::{BlockingTimeline, FetchWindow};

/// Execute an archive run.
pub fn execute(cli: &Cli) -> Result<()> {
    let user = cli.user.trim();
    if user.is_empty() {
        return Err(Error::InvalidArgument("User argument required".to_string()));
    }

    let window = FetchWindow::new(cli.nort, cli.noat).with_page_size(cli.count)?;
    let config = load_config(&cli.config)?;
    let client = BlockingTimeline::connect(&config)?;
    let archiver = Archiver::new(client, user, window);

    let (stats, destination) = match (&cli.archive, &cli.output) {
        (Some(path), _) => (archiver.merge_update(path)?, Some(path.as_path())),
        (None, Some(path)) => (archiver.archive_to_file(path)?, Some(path.as_path())),
        (None, None) => {
            let stdout = io::stdout().lock();
            (archiver.archive_all(BufWriter::new(stdout))?, None)
        }
    };

    report(user, &stats, destination, cli.json, cli.quiet)
}

/// Line count of a committed archive. The run has already succeeded, so a
/// failure here only loses the figure.
fn archive_total(path: &Path) -> Option<usize> {
    count_lines(path)
        .inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "Cannot count archive records");
        })
        .ok()
}

fn report(
    user: &str,
    stats: &SyncStats,
    destination: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let total = destination.and_then(archive_total);
    debug!(?stats, ?total, "Run finished");

    if json {
        let output = serde_json::json!({
            "success": true,
            "user": user,
            "path": destination.map(|p| p.display().to_string()),
            "total_records": total,
            "stats": stats,
        });
        eprintln!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if quiet {
        return Ok(());
    }

    if stats.is_empty() {
        eprintln!("{} No new posts for @{user}.", "✓".green());
    } else {
        eprintln!(
            "{} Archived {} posts for @{user} ({} mode, {} pages).",
            "✓".green(),
            stats.records,
            stats.mode,
            stats.pages
        );
        if let (Some(newest), Some(oldest)) = (stats.newest_id, stats.oldest_id) {
            eprintln!("  {}", format!("ids {oldest}..={newest}").dimmed());
        }
    }
    if let (Some(path), Some(total)) = (destination, total) {
        eprintln!("  {} now holds {total} posts", path.display().to_string().cyan());
    }
    Ok(())
}
