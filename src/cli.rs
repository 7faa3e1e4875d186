// src/cli.rs - Command line surface
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::Config;
use crate::core::TargetKind;
use crate::engine::{Options, MAX_CONCURRENCY};
use crate::error::{LeakerError, LeakerResult};
use crate::logger::Level;
use crate::reporting::OutputFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Email,
    Domain,
}

impl From<TypeArg> for TargetKind {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Email => TargetKind::Email,
            TypeArg::Domain => TargetKind::Domain,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "leaker")]
#[command(version, about = "Check email addresses and domains against public data-leak sources")]
pub struct Args {
    #[arg(short, long = "target", conflicts_with = "list", help = "Target to check (repeatable)")]
    pub targets: Vec<String>,

    #[arg(short, long, help = "File with one target per line (default: stdin)")]
    pub list: Option<PathBuf>,

    #[arg(short, long, value_delimiter = ',', help = "Sources to query, comma-separated, or \"all\"")]
    pub sources: Vec<String>,

    #[arg(long = "type", value_enum, help = "Only scan targets of this type")]
    pub target_type: Option<TypeArg>,

    #[arg(long, help = "Scan every target regardless of --type")]
    pub no_filter: bool,

    #[arg(long, help = "Per-query timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(
        short,
        long,
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..=MAX_CONCURRENCY as u64),
        help = "Maximum number of targets queried at once"
    )]
    pub concurrency: Option<usize>,

    #[arg(short, long, help = "Write results as JSON lines")]
    pub json: bool,

    #[arg(short, long, help = "Also write results to this file")]
    pub output: Option<PathBuf>,

    #[arg(short, long, help = "Prefix results with the source name and show verbose diagnostics")]
    pub verbose: bool,

    #[arg(long, help = "Show debug diagnostics")]
    pub debug: bool,

    #[arg(long, conflicts_with_all = ["verbose", "debug"], help = "Only show errors")]
    pub silent: bool,

    #[arg(long, help = "List available sources and exit")]
    pub list_sources: bool,

    #[arg(long, help = "Path to a configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Write a default configuration file and exit")]
    pub init_config: bool,

    #[arg(long, requires = "init_config", help = "Overwrite an existing configuration file")]
    pub force: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        if self.silent {
            Level::Error
        } else if self.debug {
            Level::Debug
        } else if self.verbose {
            Level::Verbose
        } else {
            Level::Info
        }
    }

    /// Merge flags over the loaded configuration into run options.
    ///
    /// Fails when neither the flags nor the configuration name a source.
    pub fn options(&self, config: &Config) -> LeakerResult<Options> {
        let requested = if self.sources.is_empty() { &config.sources } else { &self.sources };
        let sources: Vec<String> = requested
            .iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if sources.is_empty() {
            return Err(LeakerError::ConfigError("No sources selected".to_string()));
        }

        Ok(Options {
            sources,
            target_kind: self.target_type.map(TargetKind::from),
            no_filter: self.no_filter,
            timeout: match self.timeout {
                Some(seconds) => std::time::Duration::from_secs(seconds.max(1)),
                None => config.timeout(),
            },
            concurrency: self.concurrency.unwrap_or_else(|| config.concurrency()),
            verbose: self.verbose,
            format: if self.json { OutputFormat::Json } else { OutputFormat::Plain },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("leaker").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_come_from_config() {
        let config = Config {
            sources: vec!["proxynova".to_string()],
            timeout_seconds: 7,
            concurrency: 3,
            ..Config::default()
        };
        let options = parse(&[]).options(&config).unwrap();
        assert_eq!(options.sources, vec!["proxynova"]);
        assert_eq!(options.timeout, Duration::from_secs(7));
        assert_eq!(options.concurrency, 3);
        assert_eq!(options.format, OutputFormat::Plain);
        assert_eq!(options.target_kind, None);
    }

    #[test]
    fn test_flags_override_config() {
        let args = parse(&[
            "-s", "leakcheck,proxynova", "--type", "email", "--timeout", "2", "-c", "8", "-j", "-v",
        ]);
        let options = args.options(&Config::default()).unwrap();
        assert_eq!(options.sources, vec!["leakcheck", "proxynova"]);
        assert_eq!(options.target_kind, Some(TargetKind::Email));
        assert_eq!(options.timeout, Duration::from_secs(2));
        assert_eq!(options.concurrency, 8);
        assert_eq!(options.format, OutputFormat::Json);
        assert!(options.verbose);
        assert_eq!(args.log_level(), Level::Verbose);
    }

    #[test]
    fn test_repeated_targets() {
        let args = parse(&["-t", "a@example.com", "--target", "example.com"]);
        assert_eq!(args.targets, vec!["a@example.com", "example.com"]);
    }

    #[test]
    fn test_silent_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["leaker", "--silent", "-v"]).is_err());
        assert_eq!(parse(&["--silent"]).log_level(), Level::Error);
        assert_eq!(parse(&["--debug"]).log_level(), Level::Debug);
    }

    #[test]
    fn test_concurrency_flag_is_bounded() {
        assert!(Args::try_parse_from(["leaker", "-c", "0"]).is_err());
        assert!(Args::try_parse_from(["leaker", "-c", "18446744073709551615"]).is_err());
        assert_eq!(parse(&["-c", "1024"]).concurrency, Some(MAX_CONCURRENCY));
    }

    #[test]
    fn test_targets_conflict_with_list() {
        assert!(Args::try_parse_from(["leaker", "-t", "a@example.com", "-l", "targets.txt"]).is_err());
    }

    #[test]
    fn test_empty_source_selection_rejected() {
        let result = parse(&["-s", ","]).options(&Config::default());
        assert!(matches!(result, Err(LeakerError::ConfigError(_))));

        let config = Config {
            sources: Vec::new(),
            ..Config::default()
        };
        assert!(parse(&[]).options(&config).is_err());
    }
}
