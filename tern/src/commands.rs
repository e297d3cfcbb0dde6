// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::io::Write;

use tern_gap::{Buffer, BufferConfig, DiskFs, LogMessenger};

use crate::{
    cli::{Command, Position},
    config::expand_path,
};

type Result<T> = std::result::Result<T, String>;

/// Runs one command against a fresh buffer, writing any output to `out`.
pub fn run(command: &Command, config: BufferConfig, out: &mut impl Write) -> Result<()> {
    tracing::debug!(?command, ?config, "Running command");
    let mut buffer = Buffer::with_messenger(LogMessenger, config);

    match command {
        Command::Cat { file } => {
            load(&mut buffer, file)?;
            let (before, after) = buffer.segments();
            out.write_all(before)
                .and_then(|_| out.write_all(after))
                .map_err(|e| format!("Failed to write output: {}", e))?;
        }
        Command::Stats { file, point } => {
            load(&mut buffer, file)?;
            buffer.set_point(*point);
            let stats = buffer.line_stats();
            writeln!(out, "line {}/{}", stats.current_line, stats.last_line)
                .map_err(|e| format!("Failed to write output: {}", e))?;
        }
        Command::Line { file, line } => {
            load(&mut buffer, file)?;
            let offset = buffer
                .line_start_offset(*line)
                .ok_or_else(|| format!("Line {} not found", line))?;
            writeln!(out, "{}", offset).map_err(|e| format!("Failed to write output: {}", e))?;
        }
        Command::Insert {
            file,
            source,
            position,
            output,
        } => {
            load(&mut buffer, file)?;
            place_point(&mut buffer, position)?;
            buffer
                .insert_file(&mut DiskFs, &expand_path(source)?, true)
                .map_err(|e| e.to_string())?;
            save(&mut buffer, output.as_ref().unwrap_or(file))?;
        }
        Command::Put {
            file,
            text,
            position,
            undo,
            output,
        } => {
            load(&mut buffer, file)?;
            place_point(&mut buffer, position)?;
            buffer.insert(text.as_bytes()).map_err(|e| e.to_string())?;
            for _ in 0..*undo {
                buffer.undo().map_err(|e| e.to_string())?;
            }
            save(&mut buffer, output.as_ref().unwrap_or(file))?;
        }
        Command::Copy {
            source,
            destination,
        } => {
            load(&mut buffer, source)?;
            save(&mut buffer, destination)?;
        }
    }

    Ok(())
}

fn load(buffer: &mut Buffer, file: &str) -> Result<usize> {
    buffer
        .load_file(&mut DiskFs, &expand_path(file)?)
        .map_err(|e| e.to_string())
}

fn save(buffer: &mut Buffer, file: &str) -> Result<usize> {
    buffer
        .save(&mut DiskFs, &expand_path(file)?)
        .map_err(|e| e.to_string())
}

fn place_point(buffer: &mut Buffer, position: &Position) -> Result<()> {
    let offset = match (position.at, position.line) {
        (Some(at), _) if at > buffer.len() => {
            return Err(format!(
                "Offset {} is past the end of the document ({} bytes)",
                at,
                buffer.len()
            ))
        }
        (Some(at), _) => at,
        (None, Some(line)) => buffer
            .line_start_offset(line)
            .ok_or_else(|| format!("Line {} not found", line))?,
        (None, None) => 0,
    };
    tracing::debug!(offset, "Placed point");
    buffer.set_point(offset);

    Ok(())
}
