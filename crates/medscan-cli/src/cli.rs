//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MedScan - find coded clinical concepts in free text.
#[derive(Debug, Parser)]
#[command(name = "medscan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MEDSCAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Terminology CSV file (overrides the configured one)
    #[arg(short, long, global = true, env = "MEDSCAN_TERMINOLOGY")]
    pub terminology: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (codes only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract coded entities from text
    Analyze(AnalyzeArgs),

    /// Look up terminology entries matching a query
    Search(SearchArgs),

    /// Speak the engine protocol as JSON lines over stdin/stdout
    Serve,

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Text to analyze
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short = 'i', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long, conflicts_with_all = ["text", "file"])]
    pub stdin: bool,

    /// Do not print progress to stderr
    #[arg(long)]
    pub no_progress: bool,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Query text (code or description fragment)
    pub query: String,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_text() {
        let cli = Cli::try_parse_from(["medscan", "analyze", "Patient has diabetes"]).unwrap();
        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(args.text.as_deref(), Some("Patient has diabetes"));
                assert!(!args.stdin);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "medscan", "search", "asthma", "--limit", "3", "--format", "json", "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(CliFormat::Json));
        assert!(cli.no_color);
        match cli.command {
            Command::Search(args) => {
                assert_eq!(args.query, "asthma");
                assert_eq!(args.limit, Some(3));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_text_and_stdin_conflict() {
        assert!(Cli::try_parse_from(["medscan", "analyze", "cough", "--stdin"]).is_err());
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::try_parse_from(["medscan", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["medscan"]).is_err());
    }
}
