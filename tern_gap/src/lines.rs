// This file is part of Tern.

// Tern is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
//
// Tern is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.

use crate::{buffer::Buffer, messages::Messenger};

/// Line position of the point, as shown on a status line. Both lines are 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStats {
    /// Line holding the point.
    pub current_line: usize,
    /// Number of lines in the document.
    pub last_line: usize,
}

impl<M: Messenger> Buffer<M> {
    /// Returns the offset of the first unit of line `line` (1-indexed), or `None` when the
    /// document has fewer lines.
    ///
    /// A trailing newline ends the last line rather than opening an empty one after it.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::Buffer;
    ///
    /// let buffer = Buffer::from("ab\ncd\n");
    ///
    /// assert_eq!(buffer.line_start_offset(1), Some(0));
    /// assert_eq!(buffer.line_start_offset(2), Some(3));
    /// assert_eq!(buffer.line_start_offset(3), None);
    /// ```
    pub fn line_start_offset(&self, line: usize) -> Option<usize> {
        if line == 0 {
            return None;
        } else if line == 1 {
            return Some(0);
        }

        let len = self.len();
        let mut newlines_left = line - 1;
        for (offset, byte) in self.bytes().enumerate() {
            if byte != b'\n' {
                continue;
            }

            newlines_left -= 1;
            if newlines_left == 0 {
                let start = offset + 1;
                return (start < len).then_some(start);
            }
        }

        None
    }

    /// Scans the whole document for the line holding the point and the number of lines.
    ///
    /// A point sitting on a newline belongs to the line that newline ends. A point at the end of
    /// a document ending in a newline is one line past the last line.
    ///
    /// The final trailing newline is not counted as opening a line, so `"ab\ncd\n"` has two
    /// lines. Counting it as a line of its own would report three.
    ///
    /// ### Examples
    /// ```
    /// use tern_gap::{Buffer, LineStats};
    ///
    /// let mut buffer = Buffer::from("ab\ncd\n");
    /// buffer.set_point(3);
    ///
    /// assert_eq!(
    ///     buffer.line_stats(),
    ///     LineStats {
    ///         current_line: 2,
    ///         last_line: 2,
    ///     }
    /// );
    /// ```
    pub fn line_stats(&self) -> LineStats {
        let mut newlines = 0;
        let mut newlines_before_point = 0;
        let mut last_byte = None;

        for (offset, byte) in self.bytes().enumerate() {
            if offset == self.point {
                newlines_before_point = newlines;
            }
            if byte == b'\n' {
                newlines += 1;
            }
            last_byte = Some(byte);
        }

        if self.point >= self.len() {
            newlines_before_point = newlines;
        }

        let last_line = match last_byte {
            Some(b'\n') => newlines,
            _ => newlines + 1,
        };

        LineStats {
            current_line: newlines_before_point + 1,
            last_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LineStats;
    use crate::Buffer;

    fn stats(content: &str, point: usize) -> (usize, usize) {
        let mut buffer = Buffer::from(content);
        buffer.set_point(point);
        let LineStats {
            current_line,
            last_line,
        } = buffer.line_stats();

        (current_line, last_line)
    }

    #[test]
    fn empty_document_has_one_line() {
        assert_eq!(stats("", 0), (1, 1));
        assert_eq!(Buffer::from("").line_start_offset(1), Some(0));
        assert_eq!(Buffer::from("").line_start_offset(2), None);
    }

    #[test]
    fn point_on_newline_belongs_to_the_line_it_ends() {
        assert_eq!(stats("ab\ncd\n", 2), (1, 2));
        assert_eq!(stats("ab\ncd\n", 5), (2, 2));
    }

    #[test]
    fn point_at_end() {
        assert_eq!(stats("ab\ncd\n", 6), (3, 2));
        assert_eq!(stats("ab\ncd", 5), (2, 2));
    }

    #[test]
    fn unterminated_last_line_has_a_start() {
        let buffer = Buffer::from("ab\ncd");

        assert_eq!(buffer.line_start_offset(2), Some(3));
        assert_eq!(buffer.line_start_offset(3), None);
    }

    #[test]
    fn line_zero_is_not_a_line() {
        assert_eq!(Buffer::from("a\nb").line_start_offset(0), None);
    }

    #[test]
    fn blank_lines_count() {
        let buffer = Buffer::from("\n\nx");

        assert_eq!(buffer.line_start_offset(2), Some(1));
        assert_eq!(buffer.line_start_offset(3), Some(2));
        assert_eq!(stats("\n\nx", 1), (2, 3));
    }

    #[test]
    fn scans_across_the_gap() {
        let mut buffer = Buffer::from("one\ntwo\nthree");
        buffer.grow_gap(1).unwrap();
        buffer.move_gap(6);
        buffer.set_point(9);

        assert_eq!(buffer.line_start_offset(3), Some(8));
        assert_eq!(
            buffer.line_stats(),
            LineStats {
                current_line: 3,
                last_line: 3,
            }
        );
    }
}
