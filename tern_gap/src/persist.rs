// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::{
    io::{self, ErrorKind, Read, Write},
    path::Path,
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    buffer::Buffer,
    error::PersistError,
    fs::Filesystem,
    messages::Messenger,
};

static PORTABLE_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._/-]+$").expect("valid portable filename pattern"));

/// Checks that `name` only uses the POSIX portable filename characters plus `/`, and does not
/// start with an underscore.
///
/// ### Examples
/// ```
/// use tern_gap::is_portable_filename;
///
/// assert!(is_portable_filename("notes/todo-list_2.txt"));
/// assert!(!is_portable_filename("_draft.txt"));
/// assert!(!is_portable_filename("my notes.txt"));
/// assert!(!is_portable_filename(""));
/// ```
pub fn is_portable_filename(name: &str) -> bool {
    !name.starts_with('_') && PORTABLE_FILENAME.is_match(name)
}

impl<M: Messenger> Buffer<M> {
    /// Writes the document to `name`, verbatim, and clears the modified flag. Returns the number
    /// of bytes written.
    ///
    /// The two runs on either side of the gap are written in order, so the layout, the point and
    /// the undo checkpoint are the same after the call, whether it succeeds or fails.
    pub fn save<F: Filesystem>(&mut self, fs: &mut F, name: &str) -> Result<usize, PersistError> {
        let result = self.write_to(fs, name);
        self.report(result)
    }

    fn write_to<F: Filesystem>(&mut self, fs: &mut F, name: &str) -> Result<usize, PersistError> {
        if !is_portable_filename(name) {
            return Err(PersistError::NotPortable {
                name: name.to_string(),
            });
        }

        let path = Path::new(name);
        let mut file = fs.open_write(path).map_err(|source| PersistError::Open {
            name: name.to_string(),
            source,
        })?;

        let (before, after) = self.segments();
        let length = before.len() + after.len();
        file.write_all(before)
            .and_then(|()| file.write_all(after))
            .map_err(|source| PersistError::Write {
                name: name.to_string(),
                source,
            })?;
        fs.close_write(file).map_err(|source| PersistError::Close {
            name: name.to_string(),
            source,
        })?;

        self.modified = false;
        self.messenger
            .report_info(&format!("File \"{}\" {} bytes saved.", name, length));

        Ok(length)
    }

    /// Replaces the document with the contents of `name` and moves the point to the start.
    ///
    /// The document is emptied before the file is read, so a failure leaves an empty buffer.
    pub fn load_file<F: Filesystem>(
        &mut self,
        fs: &mut F,
        name: &str,
    ) -> Result<usize, PersistError> {
        self.gap_start = 0;
        self.gap_end = self.data.len();
        self.point = 0;
        self.generation += 1;

        self.insert_file(fs, name, false)
    }

    /// Reads `name` into the document at the point. The point stays in front of the inserted
    /// text. Returns the number of bytes read.
    ///
    /// A read that fails part way keeps whatever was read before the failure.
    pub fn insert_file<F: Filesystem>(
        &mut self,
        fs: &mut F,
        name: &str,
        mark_modified: bool,
    ) -> Result<usize, PersistError> {
        let result = self.read_from(fs, name, mark_modified);
        self.report(result)
    }

    fn read_from<F: Filesystem>(
        &mut self,
        fs: &mut F,
        name: &str,
        mark_modified: bool,
    ) -> Result<usize, PersistError> {
        let path = Path::new(name);
        let size = fs.stat(path).map_err(|source| PersistError::Stat {
            name: name.to_string(),
            source,
        })?;
        let size = usize::try_from(size)
            .ok()
            .filter(|size| *size <= self.config().max_size)
            .ok_or_else(|| PersistError::TooBig {
                name: name.to_string(),
                size,
            })?;

        // Growth failures are reported by grow_gap itself.
        self.reserve(size)?;

        let mut file = fs.open_read(path).map_err(|source| PersistError::Open {
            name: name.to_string(),
            source,
        })?;

        self.move_gap(self.point);
        self.checkpoint();

        let gap = &mut self.data[self.gap_start..self.gap_start + size];
        let (bytes_read, failure) = match read_into(&mut file, gap) {
            Ok(bytes_read) => (bytes_read, None),
            Err((bytes_read, source)) => (bytes_read, Some(source)),
        };
        drop(file);

        self.gap_start += bytes_read;
        self.modified = mark_modified;
        self.debug_assert_invariants();

        if let Some(source) = failure {
            return Err(PersistError::Read {
                name: name.to_string(),
                bytes_read,
                source,
            });
        }

        self.messenger
            .report_info(&format!("File \"{}\" {} bytes read.", name, bytes_read));

        Ok(bytes_read)
    }

    fn report(&mut self, result: Result<usize, PersistError>) -> Result<usize, PersistError> {
        result.map_err(|e| {
            if !matches!(e, PersistError::Gap(_)) {
                self.messenger.report_error(&e.to_string());
            }
            e
        })
    }
}

/// Fills `buf` from `reader` until it is full or the reader reaches its end. On failure, returns
/// the number of bytes read before it alongside the error.
fn read_into(reader: &mut impl Read, buf: &mut [u8]) -> Result<usize, (usize, io::Error)> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err((filled, e)),
        }
    }

    Ok(filled)
}
