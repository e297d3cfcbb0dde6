// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::{fs::OpenOptions, sync::Mutex};

use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use crate::config::{ensure_parent_dir, Config};

/// Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over `--log-level`.
pub fn init_logging(config: &Config) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter))
        .map_err(|e| format!("Invalid log filter: {}", e))?;

    let writer = match &config.log_file {
        Some(path) => {
            ensure_parent_dir(path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(config.log_file.is_none())
        .with_target(false)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))
}
