// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use crate::{buffer::Buffer, messages::Messenger};

impl<M: Messenger> Buffer<M> {
    /// Maps a logical offset to its physical location in the allocation.
    ///
    /// Content after the gap is stored `gap_len()` units further along than its offset. The
    /// offset one past the end of the document maps to the end of the allocation.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::Buffer;
    ///
    /// let mut buffer = Buffer::from("abcd");
    /// buffer.grow_gap(1).unwrap();
    /// buffer.move_gap(1);
    ///
    /// let gap = buffer.gap_len();
    /// assert_eq!(buffer.pointer_for(0), 0);
    /// assert_eq!(buffer.pointer_for(1), 1 + gap);
    /// assert_eq!(buffer.pointer_for(4), buffer.capacity());
    /// ```
    pub fn pointer_for(&self, offset: usize) -> usize {
        if offset < self.gap_start {
            offset
        } else {
            offset + self.gap_len()
        }
    }

    /// Maps a physical location back to its logical offset.
    ///
    /// Panics in debug builds if `pointer` lies past the end of the allocation.
    pub fn offset_for(&self, pointer: usize) -> usize {
        debug_assert!(
            pointer <= self.data.len(),
            "Expected pointer ({}) to be within the allocation (capacity: {})",
            pointer,
            self.data.len()
        );

        if pointer < self.gap_end {
            pointer
        } else {
            pointer - self.gap_len()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Buffer;

    #[test]
    fn round_trip_at_every_offset() {
        let mut buffer = Buffer::from("the quick brown fox");
        buffer.grow_gap(3).unwrap();

        for gap_offset in 0..=buffer.len() {
            buffer.move_gap(gap_offset);
            for offset in 0..=buffer.len() {
                assert_eq!(buffer.offset_for(buffer.pointer_for(offset)), offset);
            }
        }
    }

    #[test]
    fn pointers_skip_the_gap() {
        let mut buffer = Buffer::from("abcdef");
        buffer.grow_gap(1).unwrap();
        buffer.move_gap(3);
        let (gap_start, gap_end) = buffer.gap_bounds();

        assert_eq!(buffer.pointer_for(2), gap_start - 1);
        assert_eq!(buffer.pointer_for(3), gap_end);
        assert_eq!(buffer.offset_for(gap_end), 3);
    }

    #[test]
    fn without_a_gap_pointers_are_offsets() {
        let buffer = Buffer::from("abc");

        assert_eq!(buffer.pointer_for(2), 2);
        assert_eq!(buffer.offset_for(3), 3);
    }
}
