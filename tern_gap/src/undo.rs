// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use crate::{buffer::Buffer, error::UndoError, messages::Messenger};

/// The single saved state an [undo](Buffer::undo) returns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoSnapshot {
    /// Logical offset of the point when the checkpoint was taken.
    pub point: usize,
    /// Physical start of the gap.
    pub gap_start: usize,
    /// Physical end of the gap.
    pub gap_end: usize,
    generation: u64,
}

impl<M: Messenger> Buffer<M> {
    /// Records the current point and gap bounds, replacing whatever was recorded before.
    ///
    /// Edits call this right before changing content, so the snapshot is always the state just
    /// before the most recent edit.
    pub fn checkpoint(&mut self) {
        self.undo = Some(UndoSnapshot {
            point: self.point,
            gap_start: self.gap_start,
            gap_end: self.gap_end,
            generation: self.generation,
        });
    }

    /// The state the next [undo](Buffer::undo) would return to, if any checkpoint was taken.
    pub fn undo_snapshot(&self) -> Option<UndoSnapshot> {
        self.undo
    }

    /// Swaps the current state with the last checkpoint.
    ///
    /// There is one snapshot, not a history: undoing twice in a row returns to the state before
    /// the first undo. Restoring only moves gap bounds, so it is refused once the gap has moved
    /// or the allocation has grown since the checkpoint.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::Buffer;
    ///
    /// let mut buffer = Buffer::from("abc");
    /// buffer.set_point(3);
    /// buffer.insert(b"d").unwrap();
    ///
    /// buffer.undo().unwrap();
    /// assert_eq!(buffer.contents(), b"abc");
    ///
    /// buffer.undo().unwrap();
    /// assert_eq!(buffer.contents(), b"abcd");
    /// ```
    pub fn undo(&mut self) -> Result<(), UndoError> {
        let snapshot = match self.undo {
            None => Err(UndoError::Empty),
            Some(snapshot) if snapshot.generation != self.generation => Err(UndoError::Stale),
            Some(snapshot) => Ok(snapshot),
        }
        .map_err(|e| {
            self.messenger.report_error(&e.to_string());
            e
        })?;

        self.checkpoint();
        self.point = snapshot.point;
        self.gap_start = snapshot.gap_start;
        self.gap_end = snapshot.gap_end;
        self.modified = true;
        self.debug_assert_invariants();

        Ok(())
    }
}
