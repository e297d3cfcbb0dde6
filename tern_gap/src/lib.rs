// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

//! The text storage engine of the Tern editor.
//!
//! A [Buffer] keeps a whole document in one allocation with a movable gap. Edits happen at the
//! gap, so typing repeatedly at one place in the document costs amortized O(1) per unit, while
//! moving the gap costs time proportional to the distance moved. Around that storage the crate
//! provides:
//!
//! - translation between logical offsets and physical locations ([Buffer::pointer_for],
//!   [Buffer::offset_for]),
//! - gap growth and relocation ([Buffer::grow_gap], [Buffer::move_gap]),
//! - a single undo checkpoint that toggles between two states ([Buffer::checkpoint],
//!   [Buffer::undo]),
//! - loading and saving files verbatim ([Buffer::load_file], [Buffer::insert_file],
//!   [Buffer::save]),
//! - line statistics for status display ([Buffer::line_start_offset], [Buffer::line_stats]).
//!
//! User-facing notices go through a [Messenger] and file access through a [Filesystem], so the
//! engine can be driven by any front end.
//!
//! ```
//! use tern_gap::{Buffer, LineStats};
//!
//! let mut buffer = Buffer::from("first\nthird\n");
//! buffer.set_point(6);
//! buffer.insert(b"second\n").unwrap();
//!
//! assert_eq!(buffer.contents(), b"first\nsecond\nthird\n");
//! assert_eq!(buffer.line_start_offset(3), Some(13));
//! assert_eq!(
//!     buffer.line_stats(),
//!     LineStats {
//!         current_line: 3,
//!         last_line: 3,
//!     }
//! );
//! ```

#![warn(missing_docs)]

pub use buffer::*;
pub use error::*;
pub use fs::*;
pub use lines::*;
pub use messages::*;
pub use persist::*;
pub use undo::*;

mod address;
mod buffer;
mod error;
mod fs;
mod lines;
mod messages;
mod persist;
mod undo;
