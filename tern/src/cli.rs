// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::path::PathBuf;

use clap::builder::TypedValueParser;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tern", version, about = "Inspect and edit files through the Tern gap buffer")]
pub struct Cli {
    /// Smallest number of bytes the gap grows by. At least 1.
    #[arg(
        long,
        env = "TERN_MIN_GAP",
        default_value_t = tern_gap::MIN_GAP_EXPAND,
        value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize),
    )]
    pub min_gap: usize,

    /// Largest document, in bytes, the buffer will allocate.
    #[arg(long)]
    pub max_size: Option<usize>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log to a file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log to tern.log in the platform cache directory.
    #[arg(long, conflicts_with = "log_file")]
    pub log_to_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print a file.
    Cat { file: String },
    /// Print the line holding an offset and the number of lines.
    Stats {
        file: String,
        #[arg(long, default_value_t = 0)]
        point: usize,
    },
    /// Print the offset a line starts at.
    Line { file: String, line: usize },
    /// Read SOURCE into FILE and save the result.
    Insert {
        file: String,
        source: String,
        #[command(flatten)]
        position: Position,
        /// Save to this file instead of FILE.
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Insert TEXT into FILE and save the result.
    Put {
        file: String,
        text: String,
        #[command(flatten)]
        position: Position,
        /// Revert the edit before saving, then redo it if given twice.
        #[arg(long, action = clap::ArgAction::Count)]
        undo: u8,
        #[arg(long, short)]
        output: Option<String>,
    },
    /// Load SOURCE and save it as DESTINATION.
    Copy { source: String, destination: String },
}

/// Where an edit happens. Defaults to the start of the document.
#[derive(clap::Args, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[group(multiple = false)]
pub struct Position {
    /// Byte offset.
    #[arg(long)]
    pub at: Option<usize>,
    /// Start of a 1-indexed line.
    #[arg(long)]
    pub line: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
