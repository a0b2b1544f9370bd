//! CLI argument parsing for marketgen.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Marketgen: turn parameterized prediction-market templates into concrete
/// markets.
///
/// A generated market carries the question text, the resolution definition,
/// and ready-to-dispatch data-source queries for attestation providers.
#[derive(Parser, Debug)]
#[command(name = "marketgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the config file (defaults to ./marketgen.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Deployment environment (development, staging, production).
    ///
    /// Overrides both the config file and MARKETGEN_ENV.
    #[arg(long, global = true, value_name = "ENV")]
    pub env: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for marketgen.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List available templates.
    ///
    /// Prints id, category and name for every template in catalog order.
    List(ListArgs),

    /// Show a template's public details and variable schema.
    Show(ShowArgs),

    /// Generate a market from a template.
    ///
    /// Variables come from --vars-file, then --vars-json, then --var
    /// (later sources win). The market is printed as JSON.
    Generate(GenerateArgs),

    /// Run the catalog consistency check.
    ///
    /// Reports unknown placeholders, out-of-range outcome indices and
    /// malformed defaults. Exits with code 4 when any issue is found.
    Check,
}

/// Arguments for the `list` command.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Print the summaries as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command.
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Template ID to show (e.g., flr-price).
    pub template_id: String,

    /// Print the template summary as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Template ID to generate from.
    pub template_id: String,

    /// Variable as KEY=VALUE. Repeatable.
    ///
    /// Values that parse as JSON numbers or booleans are passed as such.
    #[arg(long = "var", value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub vars: Vec<String>,

    /// Variables as a JSON object.
    #[arg(long, value_name = "JSON")]
    pub vars_json: Option<String>,

    /// Read variables from a JSON file containing an object.
    #[arg(long, value_name = "PATH")]
    pub vars_file: Option<PathBuf>,

    /// Fail on placeholders that no binding resolves.
    #[arg(long)]
    pub strict: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_command() {
        let cli = Cli::try_parse_from(["marketgen", "list"]).unwrap();
        match cli.command {
            Command::List(args) => assert!(!args.json),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_list_json() {
        let cli = Cli::try_parse_from(["marketgen", "list", "--json"]).unwrap();
        match cli.command {
            Command::List(args) => assert!(args.json),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_show_command() {
        let cli = Cli::try_parse_from(["marketgen", "show", "flr-price"]).unwrap();
        match cli.command {
            Command::Show(args) => {
                assert_eq!(args.template_id, "flr-price");
                assert!(!args.json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_show_requires_template_id() {
        assert!(Cli::try_parse_from(["marketgen", "show"]).is_err());
    }

    #[test]
    fn test_generate_with_vars() {
        let cli = Cli::try_parse_from([
            "marketgen",
            "generate",
            "flr-price",
            "--var",
            "price=0.02",
            "--var",
            "attestationTime=2025-02-20T12:00:00Z",
            "--strict",
        ])
        .unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.template_id, "flr-price");
                assert_eq!(
                    args.vars,
                    vec!["price=0.02", "attestationTime=2025-02-20T12:00:00Z"]
                );
                assert!(args.strict);
                assert!(args.vars_json.is_none());
                assert!(args.vars_file.is_none());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_with_json_sources() {
        let cli = Cli::try_parse_from([
            "marketgen",
            "generate",
            "tvl-goal",
            "--vars-json",
            r#"{"goal": 1000}"#,
            "--vars-file",
            "vars.json",
        ])
        .unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.vars_json.as_deref(), Some(r#"{"goal": 1000}"#));
                assert_eq!(args.vars_file, Some(PathBuf::from("vars.json")));
                assert!(!args.strict);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_check_command() {
        let cli = Cli::try_parse_from(["marketgen", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "marketgen",
            "check",
            "--env",
            "staging",
            "--config",
            "alt.yaml",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.env.as_deref(), Some("staging"));
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_unknown_command_fails() {
        assert!(Cli::try_parse_from(["marketgen", "publish"]).is_err());
    }
}
