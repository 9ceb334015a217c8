//! CLI definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_FILE;
use crate::timeline::DEFAULT_PAGE_SIZE;

pub mod commands;

/// tua - archive a user's timeline as newline-delimited JSON
///
/// Without `-a`, the full available history is written to stdout (or
/// `--output`). With `-a`, posts newer than the archive's first record are
/// fetched and the archive is rewritten atomically with them on top.
#[derive(Parser, Debug)]
#[command(name = "tua", author, version, about, long_about = None)]
pub struct Cli {
    /// Screen name of the account to archive
    pub user: String,

    /// Existing archive to update with newer posts
    #[arg(short, long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Write the full archive to this file instead of stdout
    #[arg(short, long, value_name = "PATH", conflicts_with = "archive")]
    pub output: Option<PathBuf>,

    /// Exclude retweets
    #[arg(long)]
    pub nort: bool,

    /// Exclude replies
    #[arg(long)]
    pub noat: bool,

    /// Location of tua JSON configuration
    #[arg(
        short,
        long,
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_FILE,
        env = "TUA_CONFIG"
    )]
    pub config: PathBuf,

    /// Posts requested per page (1-200)
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub count: u32,

    /// Print the run summary and errors as JSON on stderr
    #[arg(long)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["tua", "someone"]).unwrap();
        assert_eq!(cli.user, "someone");
        assert_eq!(cli.count, 200);
        assert!(cli.archive.is_none());
        assert!(!cli.nort && !cli.noat);
    }

    #[test]
    fn test_update_flags() {
        let cli =
            Cli::try_parse_from(["tua", "-a", "someone.jsonl", "--nort", "--noat", "someone"])
                .unwrap();
        assert_eq!(cli.archive, Some(PathBuf::from("someone.jsonl")));
        assert!(cli.nort && cli.noat);
    }

    #[test]
    fn test_user_required() {
        assert!(Cli::try_parse_from(["tua"]).is_err());
    }

    #[test]
    fn test_archive_conflicts_with_output() {
        assert!(Cli::try_parse_from(["tua", "-a", "a.jsonl", "-o", "b.jsonl", "someone"]).is_err());
    }
}
