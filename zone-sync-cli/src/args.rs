//! Command-line argument definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Check that every nameserver of a zone serves the same SOA record.
///
/// Prints one `STATUS: message` line and exits with the matching monitoring
/// plugin code: 0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN.
#[derive(Parser, Debug)]
#[command(name = "check_zone_sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The domain to check
    #[arg(short, long)]
    pub domain: Option<String>,

    /// Warn if fewer nameservers are advertised [default: 2]
    #[arg(short, long, value_name = "COUNT", value_parser = parse_positive)]
    pub warning: Option<usize>,

    /// Critical if fewer nameservers are advertised [default: 1]
    #[arg(short, long, value_name = "COUNT", value_parser = parse_positive)]
    pub critical: Option<usize>,

    /// Primary nameserver not listed in the zone's NS records (repeatable)
    #[arg(long = "hidden-primary", value_name = "NAMESERVER", num_args = 1..)]
    pub hidden_primaries: Vec<String>,

    /// Per-query timeout in seconds [default: 5]
    #[arg(short, long, value_name = "SECONDS", value_parser = parse_positive_secs)]
    pub timeout: Option<u64>,

    /// Read settings from a TOML file; command-line values take precedence
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log lookups to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_positive_secs(value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
