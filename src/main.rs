//! fslistener CLI - run a command every time a path changes
//!
//! Usage: fslistener [OPTIONS] <PATH> <CALLBACK> [ARGS]...

mod cli;
mod commands;
mod logging;
mod ui;

use anyhow::Result;

fn main() -> Result<()> {
    let cli = cli::parse_or_exit();
    logging::init(cli.verbose);

    commands::cmd_listen(cli)
}
