//! Command implementations for marketgen.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, and the shared context (effective config plus catalog)
//! every command runs against.

mod check;
mod generate;
mod list;
mod show;

use crate::catalog::Catalog;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::error::Result;
use std::path::Path;


/// Effective configuration and the catalog built from it.
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub catalog: Catalog,
}

impl CommandContext {
    /// Resolve the config (file, then `MARKETGEN_ENV`, then `--env`) and build the catalog.
    pub fn load(config_path: Option<&Path>, env: Option<&str>) -> Result<Self> {
        let mut config = Config::discover(config_path)?;
        config.apply_environment_override(env)?;
        let catalog = config.build_catalog()?;
        Ok(Self { config, catalog })
    }
}

/// Dispatch a command to its implementation.
///
/// This is the main entry point for command execution. The context is
/// loaded once, then each command is routed to its handler function.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = CommandContext::load(cli.config.as_deref(), cli.env.as_deref())?;

    match cli.command {
        Command::List(args) => list::cmd_list(&ctx, args),
        Command::Show(args) => show::cmd_show(&ctx, args),
        Command::Generate(args) => generate::cmd_generate(&ctx, args),
        Command::Check => check::cmd_check(&ctx),
    }
}
