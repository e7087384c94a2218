//! # Cli
//!
//! This module contains everything needed for parsing the CLI arguments for
//! the `rpal` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Struct containing the CLI configuration for `rpal`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The path to the RPAL source file.
    #[arg(index = 1)]
    pub file: PathBuf,

    /// Echo the source file verbatim before any other output.
    #[arg(short = 'l', long = "listing")]
    pub listing: bool,

    /// Print the parsed AST in indented preorder.
    #[arg(long = "ast")]
    pub dump_ast: bool,

    /// Print the standardized tree in indented preorder.
    #[arg(long = "st")]
    pub dump_st: bool,

    /// Specify the log level of the interpreter.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    pub verbosity: LogLevel,
}

/// Enum for specifying the log level of `rpal`.
#[derive(ValueEnum, Clone, Default, Debug)]
pub enum LogLevel {
    /// The default log level. Only critical errors will be logged.
    #[default]
    #[value(alias("0"))]
    Error,

    /// Also log recoverable anomalies.
    #[value(alias("1"))]
    Warn,

    /// Also log high-level run information, e.g. which file is loaded.
    #[value(alias("2"))]
    Info,

    /// Log per-phase boundaries: token counts, tree sizes, control
    /// structure counts.
    #[value(alias("3"))]
    Debug,

    /// Log everything, including per-token and per-control-instruction
    /// detail. Note: this output can be quite verbose.
    #[value(alias("4"))]
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}
