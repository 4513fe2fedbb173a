//! Clap CLI definition: root struct, subcommands, and shared argument types.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// A CLI argument that is either a filesystem path or the stdin sentinel `"-"`.
///
/// Parsing `"-"` yields [`PathOrStdin::Stdin`]; anything else yields
/// [`PathOrStdin::Path`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathOrStdin {
    /// Read from standard input.
    Stdin,
    /// Read from the given filesystem path.
    Path(PathBuf),
}

impl std::str::FromStr for PathOrStdin {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(PathOrStdin::Stdin)
        } else {
            Ok(PathOrStdin::Path(PathBuf::from(s)))
        }
    }
}

/// Log line format written to stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines (default).
    Human,
    /// One JSON object per event.
    Json,
}

/// Arguments for `pipedag serve`.
///
/// Every flag can also be set through its `PIPEDAG_*` environment variable;
/// the flag takes precedence.
#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// IP address to bind.
    #[arg(long, env = "PIPEDAG_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to bind.
    #[arg(long, short = 'p', env = "PIPEDAG_PORT", default_value = "8000")]
    pub port: u16,

    /// Origin allowed to make cross-origin requests (repeatable).
    ///
    /// The environment variable takes a comma-separated list.
    #[arg(
        long = "allowed-origin",
        value_name = "ORIGIN",
        env = "PIPEDAG_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000"
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum request body size in bytes.
    #[arg(long, env = "PIPEDAG_MAX_BODY_SIZE", default_value = "2097152")]
    pub max_body_size: usize,
}

/// All top-level subcommands exposed by the `pipedag` binary.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service.
    Serve(ServeArgs),

    /// Check a pipeline JSON document and print its report.
    Check {
        /// Path to a pipeline JSON file, or `-` for stdin.
        #[arg(value_name = "FILE")]
        file: PathOrStdin,
        /// Pretty-print the report with 2-space indentation.
        #[arg(long)]
        pretty: bool,
        /// Maximum input size in bytes.
        ///
        /// Default: 268435456 (256 MB).
        #[arg(long, env = "PIPEDAG_MAX_FILE_SIZE", default_value = "268435456")]
        max_file_size: u64,
    },

    /// Print the pipedag-core library version.
    Version,
}

/// Root CLI struct for the `pipedag` binary.
///
/// Global flags are marked `global = true` so that clap propagates them to
/// every subcommand.
#[derive(Parser, Debug)]
#[command(
    name = "pipedag",
    version,
    about = "Pipeline graph cycle checker",
    long_about = "Checks whether a pipeline graph (nodes plus directed edges) is acyclic.\n\
                  Serves the check over HTTP or runs it once on a JSON document."
)]
pub struct Cli {
    /// Active subcommand.
    #[command(subcommand)]
    pub command: Command,

    /// Log format: human (default) or json.
    #[arg(long, global = true, env = "PIPEDAG_LOG_FORMAT", default_value = "human")]
    pub log_format: LogFormat,

    /// Only log errors (incompatible with `--verbose`).
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log debug events, including per-request graph diagnostics
    /// (incompatible with `--quiet`).
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}
