// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::{collections::TryReserveError, io};

use thiserror::Error;

/// Failure to widen the gap of a [Buffer](crate::Buffer).
#[derive(Debug, Error)]
pub enum GapError {
    /// The grown allocation would overflow or exceed the configured maximum size.
    #[error("Failed to allocate required memory ({requested} more bytes past {current})")]
    TooLarge {
        /// Current allocation size.
        current: usize,
        /// Number of bytes the gap was asked to grow by, after the minimum expansion.
        requested: usize,
    },
    /// The allocator refused the request.
    #[error("Failed to allocate required memory")]
    Allocation(#[from] TryReserveError),
}

/// Failure while loading, inserting or saving a file.
///
/// Every variant carries the file `name` as it was given.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The name uses characters outside the portable set or starts with an underscore.
    #[error("Not a portable POSIX file name.")]
    NotPortable {
        /// Rejected file name.
        name: String,
    },
    /// The file could not be found or its size could not be read.
    #[error("Failed to find file \"{name}\".")]
    Stat {
        /// File that was looked up.
        name: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The file is larger than the configured maximum size of a buffer.
    #[error("File \"{name}\" is too big to load.")]
    TooBig {
        /// File that was refused.
        name: String,
        /// Its size in bytes.
        size: u64,
    },
    /// The file could not be opened.
    #[error("Failed to open file \"{name}\".")]
    Open {
        /// File that was opened.
        name: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// Reading stopped early. The `bytes_read` bytes before the failure stay in the buffer.
    #[error("Failed to read file \"{name}\" after {bytes_read} bytes.")]
    Read {
        /// File being read.
        name: String,
        /// Bytes inserted before the failure.
        bytes_read: usize,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// Writing the content failed part way.
    #[error("Failed to write file \"{name}\".")]
    Write {
        /// File being written.
        name: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The written file could not be flushed and closed.
    #[error("Failed to close file \"{name}\".")]
    Close {
        /// File being closed.
        name: String,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },
    /// The gap could not grow to fit the file.
    #[error(transparent)]
    Gap(#[from] GapError),
}

/// Reasons an [undo](crate::Buffer::undo) was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    /// No checkpoint was taken yet.
    #[error("Nothing to undo.")]
    Empty,
    /// The gap moved or the allocation grew since the last checkpoint.
    #[error("Undo information is out of date.")]
    Stale,
}
