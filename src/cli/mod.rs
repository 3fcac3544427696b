//! CLI module for bgpeepr-rs
//!
//! This module handles command line argument parsing and the lookup flow.

use crate::config::AppConfig;
use crate::database::{DatabaseSource, LoadStats};
use crate::download::Downloader;
use crate::engine::{Aggregator, MatchResult};
use crate::error::Result;
use crate::export::{ExportTargets, format_console};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bgpeepr-rs")]
#[command(version, about = "Search the IPtoASN database for ASNs by company name")]
#[command(long_about = "Search the IPtoASN database for ASNs by company name\n\n\
    The company name is matched case-insensitively as a substring of the\n\
    registered organization. Matching ASNs are listed together with the\n\
    IP prefixes they announce.\n\n\
    Examples:\n  \
    $ bgpeepr-rs microsoft\n  \
    $ bgpeepr-rs oracle -p\n  \
    $ bgpeepr-rs amazon -p -6 -oJ amazon.json -oC amazon.csv\n  \
    $ bgpeepr-rs cloudflare -l ip2asn-combined.tsv.gz")]
pub struct Cli {
    /// Company or organization name (case-insensitive substring match)
    #[arg(value_name = "COMPANY")]
    pub company: String,

    /// Display associated IP prefix ranges in CIDR format
    #[arg(short = 'p', long)]
    pub prefixes: bool,

    /// Use a local IPtoASN file (plain or gzip) instead of downloading
    #[arg(short = 'l', long, value_name = "FILE")]
    pub local: Option<String>,

    /// Include IPv6 prefixes
    #[arg(short = '6', long)]
    pub ipv6: bool,

    /// Write results to a JSON file (also -oJ FILE)
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Write results to a CSV file (also -oC FILE)
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Rewrite the two-letter short options `-oJ` / `-oC` into `--json` / `--csv`
///
/// Accepts `-oJ FILE`, `-oJ=FILE` and `-oJFILE`. Arguments after `--` are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut passthrough = false;

    for arg in args {
        let arg: OsString = arg.into();
        if passthrough {
            out.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let rewritten = [("-oJ", "--json"), ("-oC", "--csv")]
            .iter()
            .find_map(|(short, long)| {
                let rest = text.strip_prefix(short)?;
                Some(match rest {
                    "" => long.to_string(),
                    _ => format!("{}={}", long, rest.strip_prefix('=').unwrap_or(rest)),
                })
            });

        match rewritten {
            Some(long) => out.push(OsString::from(long)),
            None => out.push(arg),
        }
    }

    out
}

/// Outcome of one lookup
#[derive(Debug)]
pub struct Lookup {
    pub results: Vec<MatchResult>,
    pub stats: LoadStats,
}

impl Cli {
    /// Parse the process arguments, including the `-oJ` / `-oC` forms
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    pub async fn run(&self, config: AppConfig) -> Result<()> {
        let lookup = self.lookup(&config).await?;

        let use_color =
            config.output.enable_colors && !self.no_color && atty::is(atty::Stream::Stdout);
        print!(
            "{}",
            format_console(&lookup.results, &self.company, self.prefixes, use_color)
        );

        let targets = ExportTargets {
            json: self.json.clone(),
            csv: self.csv.clone(),
        };
        if targets.is_empty() {
            return Ok(());
        }

        let report = targets.write_all(&lookup.results, &config.output.prefix_separator);
        for path in &report.written {
            println!("\nOutput saved to {}", path.display());
        }
        report.into_result()?;

        Ok(())
    }

    /// Load every source and aggregate matches; nothing is printed to stdout
    pub async fn lookup(&self, config: &AppConfig) -> Result<Lookup> {
        let sources = DatabaseSource::plan(self.local.as_deref(), self.ipv6, &config.source);

        let downloader = if sources.iter().any(DatabaseSource::is_remote) {
            Some(Downloader::new(&config.source)?)
        } else {
            None
        };
        let show_progress = atty::is(atty::Stream::Stderr);

        let mut aggregator = Aggregator::new(&self.company, self.ipv6);
        let mut total = LoadStats::default();

        for source in &sources {
            log::info!("Reading database: {}", source);
            let prepared = source.prepare(downloader.as_ref(), show_progress).await?;

            let mut reader = prepared.records()?;
            for record in reader.by_ref() {
                aggregator.ingest(&record?);
            }

            let stats = reader.stats();
            log::info!(
                "{}: {} lines, {} records, {} malformed lines skipped",
                source,
                stats.lines,
                stats.records,
                stats.skipped
            );
            total.lines += stats.lines;
            total.records += stats.records;
            total.skipped += stats.skipped;
        }

        if aggregator.rejected() > 0 {
            log::info!("{} matching ranges could not be decomposed", aggregator.rejected());
        }

        Ok(Lookup {
            results: aggregator.into_results(),
            stats: total,
        })
    }
}
