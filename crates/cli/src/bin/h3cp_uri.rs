//! h3cp-uri - copy a single object between the local filesystem and an H3 store
//!
//! The store is addressed by the storage URI given with `-s`.

use clap::Parser;

use h3cp::commands::{self, UriCli};

fn main() {
    let cli = UriCli::parse();
    h3cp::logging::init(cli.global.debug);

    let exit_code = commands::execute_uri(cli);

    std::process::exit(exit_code.as_i32());
}
