use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

/// One-line usage printed when the path or callback is missing
pub const USAGE: &str =
    "usage: fslistener <path to scan> <callback script> [ callback script arguments ]";

/// fslistener - run a command every time a path changes
#[derive(Parser, Debug)]
#[command(name = "fslistener")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Options must come before <PATH>; everything from <CALLBACK> on is passed through untouched.")]
pub struct Cli {
    /// Output lifecycle events as NDJSON
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Coalescing window for change notifications, in milliseconds
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Stop a callback that runs longer than this (0 disables)
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Time between SIGTERM and SIGKILL when a callback must be stopped
    #[arg(long, value_name = "MS")]
    pub kill_grace_ms: Option<u64>,

    /// Config file (defaults to ~/.config/fslistener/config.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to watch
    pub path: PathBuf,

    /// Executable to run for every batch of changes, followed by the
    /// arguments forwarded to it verbatim
    #[arg(
        value_name = "CALLBACK",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<OsString>,
}

impl Cli {
    /// Split the trailing command into the callback and its arguments.
    pub fn callback(&self) -> Option<(&OsString, &[OsString])> {
        self.command.split_first()
    }
}

/// Parse the process arguments.
///
/// A missing path or callback prints [`USAGE`] on stdout and exits with 1;
/// every other clap outcome (help, version, bad values) keeps clap's behaviour.
pub fn parse_or_exit() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if is_usage_error(&err) => {
            println!("{USAGE}");
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    }
}

fn is_usage_error(err: &clap::Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}
