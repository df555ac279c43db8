//! CLI definitions and execution
//!
//! Two front ends share one copy pipeline: `h3cp` addresses the store through
//! a configuration file, `h3cp-uri` through a storage URI.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser};
use h3cp_core::{StoreTarget, resolve_config_path};
use h3cp_store::H3Store;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

pub mod cp;

/// Flags shared by both binaries
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Output format: human-readable or JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Disable colored output
    #[arg(long, default_value = "false")]
    pub no_color: bool,

    /// Suppress non-error output
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

impl GlobalArgs {
    pub fn output_config(&self) -> OutputConfig {
        OutputConfig {
            json: self.json,
            no_color: self.no_color,
            quiet: self.quiet,
        }
    }
}

/// h3cp - copy a single object between the local filesystem and H3
///
/// Exactly one of <SRC> and <DST> must be an H3 path (h3://bucket/key).
#[derive(Parser, Debug)]
#[command(name = "h3cp")]
#[command(author, version, about, long_about = None)]
pub struct ConfigCli {
    /// H3 configuration file [default: $H3_CONFIG, ./config.ini or ~/.h3/config.ini]
    #[arg(short = 'c', long = "config", value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// Source and destination: local paths or h3://bucket/key
    #[arg(value_name = "PATH", num_args = 0..)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// h3cp-uri - copy a single object between the local filesystem and H3
///
/// Exactly one of <SRC> and <DST> must be an H3 path (h3://bucket/key).
#[derive(Parser, Debug)]
#[command(name = "h3cp-uri")]
#[command(author, version, about, long_about = None)]
pub struct UriCli {
    /// H3 storage URI, passed to the store as given (e.g. file:///tmp/h3, plainfs:///srv/h3cp)
    #[arg(short = 's', long = "storage", value_name = "URI", required = true)]
    pub storage: String,

    /// Source and destination: local paths or h3://bucket/key
    #[arg(value_name = "PATH", num_args = 0..)]
    pub paths: Vec<String>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Execute the configuration-file variant and return an exit code
pub fn execute_config(cli: ConfigCli) -> ExitCode {
    let formatter = Formatter::new(cli.global.output_config());
    let usage = ConfigCli::command().render_usage().to_string();

    let config = cli.config.unwrap_or_else(resolve_config_path);
    cp::execute(
        &H3Store::new(),
        StoreTarget::ConfigFile(config),
        &cli.paths,
        &formatter,
        &usage,
    )
}

/// Execute the storage-URI variant and return an exit code
pub fn execute_uri(cli: UriCli) -> ExitCode {
    let formatter = Formatter::new(cli.global.output_config());
    let usage = UriCli::command().render_usage().to_string();

    let target = match StoreTarget::uri(cli.storage) {
        Ok(t) => t,
        Err(e) => {
            formatter.error(&e.to_string());
            formatter.usage(&usage);
            return ExitCode::from_error(&e);
        }
    };
    cp::execute(&H3Store::new(), target, &cli.paths, &formatter, &usage)
}
