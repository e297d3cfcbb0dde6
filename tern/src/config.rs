// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::path::{Path, PathBuf};

use etcetera::{choose_base_strategy, BaseStrategy};
use tern_gap::BufferConfig;

use crate::cli::Cli;

type Result<T> = std::result::Result<T, String>;

pub const LOG_FILE_NAME: &str = "tern.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub buffer: BufferConfig,
    pub log_filter: &'static str,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let defaults = BufferConfig::default();
        let buffer = BufferConfig {
            min_gap_expand: cli.min_gap,
            max_size: cli.max_size.unwrap_or(defaults.max_size),
        };

        let log_file = match &cli.log_file {
            Some(path) => Some(expand_path(&path.to_string_lossy())?.into()),
            None if cli.log_to_cache => Some(default_log_file()?),
            None => None,
        };

        Ok(Self {
            buffer,
            log_filter: cli.log_level.as_filter(),
            log_file,
        })
    }
}

pub fn default_log_file() -> Result<PathBuf> {
    let strategy = choose_base_strategy()
        .map_err(|e| format!("Failed to find home directory for log file: {}", e))?;

    Ok(strategy.cache_dir().join("tern").join(LOG_FILE_NAME))
}

/// Expands `~` and environment variables in a path given on the command line.
pub fn expand_path(path: &str) -> Result<String> {
    shellexpand::full(path)
        .map(|expanded| expanded.into_owned())
        .map_err(|e| format!("Failed to expand path \"{}\": {}", path, e))
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory {}: {}", parent.display(), e)),
        _ => Ok(()),
    }
}
