// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Write},
    path::Path,
};

/// The storage a [Buffer](crate::Buffer) loads from and saves to.
pub trait Filesystem {
    /// Handle returned by [open_read](Filesystem::open_read).
    type Reader: Read;
    /// Handle returned by [open_write](Filesystem::open_write).
    type Writer: Write;

    /// Size of the file in bytes.
    fn stat(&mut self, path: &Path) -> io::Result<u64>;
    /// Opens an existing file for reading.
    fn open_read(&mut self, path: &Path) -> io::Result<Self::Reader>;
    /// Opens for writing, creating the file or truncating it.
    fn open_write(&mut self, path: &Path) -> io::Result<Self::Writer>;
    /// Flushes and releases a handle from [open_write](Filesystem::open_write). An error means
    /// the written content may not have reached storage.
    fn close_write(&mut self, writer: Self::Writer) -> io::Result<()>;
}

/// The local disk through `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFs;

impl Filesystem for DiskFs {
    type Reader = File;
    type Writer = File;

    fn stat(&mut self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn open_read(&mut self, path: &Path) -> io::Result<File> {
        File::open(path)
    }

    fn open_write(&mut self, path: &Path) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
    }

    fn close_write(&mut self, mut writer: File) -> io::Result<()> {
        writer.flush()?;
        writer.sync_all()
    }
}
