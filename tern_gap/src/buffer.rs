// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use crate::{
    error::GapError,
    messages::{LogMessenger, Messenger},
    undo::UndoSnapshot,
};

/// Smallest number of units the gap grows by, whatever the request.
pub const MIN_GAP_EXPAND: usize = 512;

/// Largest allocation a [Buffer] will attempt.
pub const MAX_SIZE: usize = isize::MAX as usize;

/// Growth policy of a [Buffer].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Smallest growth of the gap. Values below 1 are treated as 1.
    pub min_gap_expand: usize,
    /// Largest allocation, in units, the buffer may reach.
    pub max_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            min_gap_expand: MIN_GAP_EXPAND,
            max_size: MAX_SIZE,
        }
    }
}

/// The text of one document, stored as a single allocation with a movable gap.
///
/// Physical locations are indices into the allocation, which runs from `0` to
/// [capacity](Buffer::capacity). The gap occupies `gap_start..gap_end` and the logical content is
/// everything outside it. The point is a logical offset in `0..=len()`.
///
/// ```text
///      gap_start  gap_end
///          |         |
///          v         v
/// [h e l l _ _ _ _ _ o]
///  ^                   ^
///  0               capacity
/// ```
///
/// # Edits
///
/// Every edit happens at the gap. [insert](Buffer::insert), [delete_forward](Buffer::delete_forward)
/// and [delete_backward](Buffer::delete_backward) move the gap to the point first, record an undo
/// checkpoint and then change the gap bounds. Moving the gap costs time proportional to the
/// distance moved, so edits clustered around one location are cheap.
///
/// ### Examples
/// ```
/// use tern_gap::Buffer;
///
/// let mut buffer = Buffer::from("hello");
/// buffer.set_point(5);
/// buffer.insert(b" world").unwrap();
/// assert_eq!(buffer.contents(), b"hello world");
///
/// buffer.set_point(0);
/// assert_eq!(buffer.delete_forward(6), 6);
/// assert_eq!(buffer.contents(), b"world");
/// assert!(buffer.is_modified());
/// ```
///
/// # Views
///
/// [segments](Buffer::segments), [bytes](Buffer::bytes) and the physical indices returned by
/// [move_gap](Buffer::move_gap) describe the buffer as it is right now. Any call that moves or
/// grows the gap invalidates them; the borrow checker enforces this for the slice views, while
/// physical indices have to be recomputed by the caller.
#[derive(Debug)]
pub struct Buffer<M = LogMessenger> {
    pub(crate) data: Vec<u8>,
    pub(crate) gap_start: usize,
    pub(crate) gap_end: usize,
    pub(crate) point: usize,
    pub(crate) modified: bool,
    pub(crate) undo: Option<UndoSnapshot>,
    /// Bumped whenever bytes change physical location.
    pub(crate) generation: u64,
    config: BufferConfig,
    pub(crate) messenger: M,
}

impl Buffer<LogMessenger> {
    /// Creates an empty buffer with no allocation. The first insertion allocates.
    pub fn new() -> Self {
        Self::with_messenger(LogMessenger, BufferConfig::default())
    }
}

impl Default for Buffer<LogMessenger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Messenger> Buffer<M> {
    /// Creates an empty buffer that reports through `messenger` and grows according to `config`.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::{Buffer, BufferConfig, RecordingMessenger};
    ///
    /// let mut buffer = Buffer::with_messenger(RecordingMessenger::default(), BufferConfig::default());
    /// buffer.insert(b"abc").unwrap();
    ///
    /// assert_eq!(buffer.len(), 3);
    /// assert!(buffer.messenger().messages.is_empty());
    /// ```
    pub fn with_messenger(messenger: M, config: BufferConfig) -> Self {
        Self {
            data: Vec::new(),
            gap_start: 0,
            gap_end: 0,
            point: 0,
            modified: false,
            undo: None,
            generation: 0,
            config,
            messenger,
        }
    }

    /// The collaborator receiving this buffer's notices.
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Mutable access to the messenger, e.g. to clear recorded messages.
    pub fn messenger_mut(&mut self) -> &mut M {
        &mut self.messenger
    }

    /// The growth policy this buffer was created with.
    pub fn config(&self) -> BufferConfig {
        self.config
    }

    /// Number of logical units in the document.
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    /// Returns true if the document holds no units. The allocation may still be non-empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the allocation, gap included.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of units that can be inserted before the buffer has to grow.
    pub fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Physical bounds of the gap as `(gap_start, gap_end)`.
    pub fn gap_bounds(&self) -> (usize, usize) {
        (self.gap_start, self.gap_end)
    }

    /// Logical offset of the cursor, in `0..=len()`.
    pub fn point(&self) -> usize {
        self.point
    }

    /// Moves the point, clamping it to the end of the document. Does not move the gap.
    pub fn set_point(&mut self, offset: usize) {
        self.point = offset.min(self.len());
    }

    /// Returns true if the document changed since it was last loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Overrides the modified flag.
    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// The logical content as the two physical runs around the gap.
    pub fn segments(&self) -> (&[u8], &[u8]) {
        (&self.data[..self.gap_start], &self.data[self.gap_end..])
    }

    /// Iterates over the logical content in order, skipping the gap.
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let (before, after) = self.segments();
        before.iter().chain(after.iter()).copied()
    }

    /// Copies the logical content out of the buffer.
    pub fn contents(&self) -> Vec<u8> {
        let (before, after) = self.segments();
        [before, after].concat()
    }

    /// Returns the unit at a logical offset, or `None` past the end of the document.
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        if offset >= self.len() {
            None
        } else {
            Some(self.data[self.pointer_for(offset)])
        }
    }

    /// Widens the gap by at least `n` units, never by less than the configured minimum expansion.
    ///
    /// Content before the gap stays where it is and content after it moves to the end of the
    /// new allocation, so logical content and the point are unchanged.
    ///
    /// Failing to allocate the very first storage of a buffer is fatal and goes through
    /// [Messenger::report_fatal]. Once the buffer holds storage, a failure is reported with
    /// [Messenger::report_error] and leaves the buffer untouched.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::{Buffer, MIN_GAP_EXPAND};
    ///
    /// let mut buffer = Buffer::new();
    /// buffer.grow_gap(1).unwrap();
    ///
    /// assert_eq!(buffer.gap_len(), MIN_GAP_EXPAND);
    /// assert!(buffer.is_empty());
    /// ```
    pub fn grow_gap(&mut self, n: usize) -> Result<(), GapError> {
        let n = n.max(self.config.min_gap_expand).max(1);
        let old_len = self.data.len();
        let max_size = self.config.max_size;

        let reserved = old_len
            .checked_add(n)
            .filter(|new_len| *new_len <= max_size)
            .ok_or(GapError::TooLarge {
                current: old_len,
                requested: n,
            })
            .and_then(|new_len| {
                self.data.try_reserve_exact(n)?;
                Ok(new_len)
            });

        let new_len = match reserved {
            Ok(new_len) => new_len,
            // Nothing to edit without a buffer.
            Err(e) if old_len == 0 => self.messenger.report_fatal(&e.to_string()),
            Err(e) => {
                self.messenger.report_error(&e.to_string());
                return Err(e);
            }
        };

        self.data.resize(new_len, 0);
        let tail_len = old_len - self.gap_end;
        let new_gap_end = new_len - tail_len;
        self.data.copy_within(self.gap_end..old_len, new_gap_end);
        self.gap_end = new_gap_end;
        self.generation += 1;

        tracing::debug!(old_len, new_len, gap = self.gap_len(), "Grew gap");
        self.debug_assert_invariants();

        Ok(())
    }

    /// Ensures the gap can take `n` more units, growing it only when it is too small.
    pub fn reserve(&mut self, n: usize) -> Result<(), GapError> {
        if self.gap_len() < n {
            self.grow_gap(n)
        } else {
            Ok(())
        }
    }

    /// Slides the gap so that it starts exactly at the logical `offset`. Returns the physical
    /// location of the new gap end, the first unit after the gap.
    ///
    /// Runs in time proportional to the distance between the current gap and `offset`.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::Buffer;
    ///
    /// let mut buffer = Buffer::from("abcdef");
    /// buffer.grow_gap(4).unwrap();
    ///
    /// let gap_end = buffer.move_gap(2);
    /// let (before, after) = buffer.segments();
    /// assert_eq!(before, b"ab");
    /// assert_eq!(after, b"cdef");
    /// assert_eq!(buffer.gap_bounds().1, gap_end);
    /// ```
    pub fn move_gap(&mut self, offset: usize) -> usize {
        debug_assert!(
            offset <= self.len(),
            "Expected gap offset ({}) to be within the document (len: {})",
            offset,
            self.len()
        );
        let target = self.pointer_for(offset.min(self.len()));

        if target < self.gap_start {
            // Units just before the gap become units just after it.
            let count = self.gap_start - target;
            self.data.copy_within(target..self.gap_start, self.gap_end - count);
            self.gap_start = target;
            self.gap_end -= count;
            self.generation += 1;
        } else if target > self.gap_end {
            let count = target - self.gap_end;
            self.data.copy_within(self.gap_end..target, self.gap_start);
            self.gap_start += count;
            self.gap_end = target;
            self.generation += 1;
        }

        tracing::trace!(offset, gap_start = self.gap_start, gap_end = self.gap_end, "Moved gap");
        self.debug_assert_invariants();

        self.gap_end
    }

    /// Inserts `content` at the point and leaves the point after it.
    pub fn insert(&mut self, content: &[u8]) -> Result<(), GapError> {
        self.reserve(content.len())?;
        self.move_gap(self.point);
        self.checkpoint();

        let end = self.gap_start + content.len();
        self.data[self.gap_start..end].copy_from_slice(content);
        self.gap_start = end;
        self.point += content.len();
        self.modified = true;

        Ok(())
    }

    /// Removes up to `count` units after the point. Returns how many were removed.
    pub fn delete_forward(&mut self, count: usize) -> usize {
        self.move_gap(self.point);
        self.checkpoint();

        let removed = count.min(self.data.len() - self.gap_end);
        self.gap_end += removed;
        if removed > 0 {
            self.modified = true;
        }

        removed
    }

    /// Removes up to `count` units before the point, moving the point back over them. Returns
    /// how many were removed.
    pub fn delete_backward(&mut self, count: usize) -> usize {
        self.move_gap(self.point);
        self.checkpoint();

        let removed = count.min(self.gap_start);
        self.gap_start -= removed;
        self.point -= removed;
        if removed > 0 {
            self.modified = true;
        }

        removed
    }

    pub(crate) fn debug_assert_invariants(&self) {
        debug_assert!(self.gap_start <= self.gap_end);
        debug_assert!(self.gap_end <= self.data.len());
        debug_assert!(self.point <= self.len());
    }
}

impl From<Vec<u8>> for Buffer<LogMessenger> {
    fn from(value: Vec<u8>) -> Self {
        let len = value.len();
        let mut buffer = Self::new();
        buffer.data = value;
        buffer.gap_start = len;
        buffer.gap_end = len;
        buffer
    }
}

impl From<&[u8]> for Buffer<LogMessenger> {
    fn from(value: &[u8]) -> Self {
        Self::from(Vec::from(value))
    }
}

impl From<&str> for Buffer<LogMessenger> {
    fn from(value: &str) -> Self {
        Self::from(value.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::messages::{RecordingMessenger, Severity};

    fn recording(config: BufferConfig) -> Buffer<RecordingMessenger> {
        Buffer::with_messenger(RecordingMessenger::default(), config)
    }

    #[test]
    fn grow_gap_floors_request_at_minimum_expansion() {
        let mut buffer = recording(BufferConfig::default());
        buffer.grow_gap(1).unwrap();

        assert!(buffer.capacity() >= MIN_GAP_EXPAND);
        assert_eq!(buffer.gap_bounds(), (0, MIN_GAP_EXPAND));
    }

    #[test]
    fn grow_gap_always_grows_with_zero_minimum() {
        let mut buffer = recording(BufferConfig {
            min_gap_expand: 0,
            max_size: MAX_SIZE,
        });
        buffer.grow_gap(0).unwrap();
        assert_eq!(buffer.gap_len(), 1);

        buffer.grow_gap(0).unwrap();
        assert_eq!(buffer.gap_len(), 2);
    }

    #[test]
    fn grow_gap_moves_tail_to_end_of_allocation() {
        let mut buffer = Buffer::from("abcdef");
        buffer.move_gap(2);
        buffer.grow_gap(10).unwrap();

        assert_eq!(buffer.capacity(), 6 + MIN_GAP_EXPAND);
        assert_eq!(buffer.gap_bounds(), (2, 2 + MIN_GAP_EXPAND));
        assert_eq!(buffer.contents(), b"abcdef");
    }

    #[test]
    fn grow_gap_keeps_point() {
        let mut buffer = Buffer::from("hello\nworld");
        buffer.set_point(7);
        buffer.grow_gap(2000).unwrap();

        assert_eq!(buffer.point(), 7);
        assert_eq!(buffer.byte_at(7), Some(b'o'));
        assert_eq!(buffer.gap_len(), 2000);
    }

    #[test]
    #[should_panic(expected = "Failed to allocate required memory")]
    fn grow_gap_on_unallocated_buffer_is_fatal() {
        let mut buffer = recording(BufferConfig {
            min_gap_expand: 8,
            max_size: 4,
        });
        let _ = buffer.grow_gap(1);
    }

    #[test]
    fn grow_gap_failure_on_filled_buffer_is_recoverable() {
        let mut buffer = recording(BufferConfig {
            min_gap_expand: 8,
            max_size: 16,
        });
        buffer.insert(b"hello").unwrap();
        let before = (buffer.gap_bounds(), buffer.capacity(), buffer.point());

        let result = buffer.grow_gap(100);

        assert!(matches!(result, Err(GapError::TooLarge { current: 8, requested: 100 })));
        assert_eq!(buffer.contents(), b"hello");
        assert_eq!((buffer.gap_bounds(), buffer.capacity(), buffer.point()), before);
        assert_eq!(buffer.messenger().last().unwrap().severity, Severity::Error);
    }

    #[test]
    fn grow_gap_rejects_overflow() {
        let mut buffer = recording(BufferConfig::default());
        buffer.insert(b"x").unwrap();

        assert!(matches!(
            buffer.grow_gap(usize::MAX),
            Err(GapError::TooLarge { .. })
        ));
        assert_eq!(buffer.contents(), b"x");
    }

    #[test]
    fn move_gap_left_and_right() {
        let mut buffer = Buffer::from("0123456789");
        buffer.grow_gap(4).unwrap();
        let gap = buffer.gap_len();

        assert_eq!(buffer.move_gap(3), 3 + gap);
        assert_eq!(buffer.segments(), (&b"012"[..], &b"3456789"[..]));

        assert_eq!(buffer.move_gap(8), 8 + gap);
        assert_eq!(buffer.segments(), (&b"01234567"[..], &b"89"[..]));

        assert_eq!(buffer.move_gap(0), gap);
        assert_eq!(buffer.segments(), (&b""[..], &b"0123456789"[..]));

        assert_eq!(buffer.move_gap(10), 10 + gap);
        assert_eq!(buffer.contents(), b"0123456789");
    }

    #[test]
    fn move_gap_to_current_position_does_not_move() {
        let mut buffer = Buffer::from("abc");
        buffer.grow_gap(1).unwrap();
        let generation = buffer.generation;

        buffer.move_gap(3);
        assert_eq!(buffer.generation, generation);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut buffer = Buffer::from("held");
        buffer.set_point(3);
        buffer.insert(b"lo worl").unwrap();

        assert_eq!(buffer.contents(), b"hello world");
        assert_eq!(buffer.point(), 10);
        assert!(buffer.is_modified());
    }

    #[test]
    fn insert_larger_than_minimum_expansion() {
        let mut buffer = recording(BufferConfig {
            min_gap_expand: 4,
            max_size: MAX_SIZE,
        });
        let content = vec![b'z'; 100];
        buffer.insert(&content).unwrap();

        assert_eq!(buffer.len(), 100);
        assert_eq!(buffer.contents(), content);
    }

    #[test]
    fn delete_is_bounded_by_content() {
        let mut buffer = Buffer::from("abc");
        buffer.set_point(1);

        assert_eq!(buffer.delete_backward(5), 1);
        assert_eq!(buffer.point(), 0);
        assert_eq!(buffer.delete_forward(5), 2);
        assert!(buffer.is_empty());
    }

    #[test]
    fn byte_at_reads_across_the_gap() {
        let mut buffer = Buffer::from("abcd");
        buffer.grow_gap(1).unwrap();
        buffer.move_gap(2);

        let read: Vec<_> = (0..5).map(|i| buffer.byte_at(i)).collect();
        assert_eq!(read, [Some(b'a'), Some(b'b'), Some(b'c'), Some(b'd'), None]);
    }
}
