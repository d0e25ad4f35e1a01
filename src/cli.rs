// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `execzone`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "execzone",
    version,
    about = "Compile and run a source file in an isolated workspace, printing the result as JSON.",
    long_about = None
)]
pub struct CliArgs {
    /// Language tag of the submission (e.g. c, cpp, go, java, js, python).
    #[arg(
        long,
        short = 'l',
        value_name = "LANG",
        required_unless_present = "list_languages"
    )]
    pub language: Option<String>,

    /// Source file to execute, or `-` to read it from standard input.
    #[arg(long, short = 's', value_name = "PATH", default_value = "-")]
    pub source: String,

    /// One line of program input; repeat for multiple lines.
    #[arg(long = "stdin-line", value_name = "LINE")]
    pub stdin_lines: Vec<String>,

    /// Read program input lines from a file instead of `--stdin-line`.
    #[arg(long, value_name = "PATH", conflicts_with = "stdin_lines")]
    pub stdin_file: Option<String>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Execzone.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Override `[engine].execution_root` from the config.
    #[arg(long, value_name = "DIR")]
    pub execution_root: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `EXECZONE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve and print the stages for the language, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the enabled languages and exit.
    #[arg(long)]
    pub list_languages: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
