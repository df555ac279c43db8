//! h3cp - copy a single object between the local filesystem and an H3 store
//!
//! The store is addressed through an INI configuration file, taken from `-c`,
//! `$H3_CONFIG`, `./config.ini` or `~/.h3/config.ini`.

use clap::Parser;

use h3cp::commands::{self, ConfigCli};

fn main() {
    let cli = ConfigCli::parse();
    h3cp::logging::init(cli.global.debug);

    let exit_code = commands::execute_config(cli);

    std::process::exit(exit_code.as_i32());
}
