// This file is part of the chesscore library.
// Copyright (C) 2024 The chesscore developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use core::{error::Error, fmt, str::FromStr};

/// A coordinate on the board, as `(row, column)` with both counted from 1.
///
/// Row 1 is white's backrank, column 1 is the a-file. Coordinates outside
/// of `1..=8` can be constructed, but every [`Board`](crate::Board) query
/// rejects them.
///
/// # Examples
///
/// ```
/// use chesscore::Position;
///
/// let e4: Position = "e4".parse()?;
/// assert_eq!(e4, Position::new(4, 5));
/// assert_eq!(e4.to_string(), "e4");
///
/// assert!(!Position::new(0, 3).is_valid());
/// # Ok::<_, chesscore::ParsePositionError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Position {
    row: i32,
    col: i32,
}

impl Position {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Position {
        Position { row, col }
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.col
    }

    /// Tests if both coordinates are in `1..=8`.
    #[inline]
    pub const fn is_valid(self) -> bool {
        1 <= self.row && self.row <= 8 && 1 <= self.col && self.col <= 8
    }

    /// Steps by the given deltas. Returns `None` if the result is not on
    /// the board.
    ///
    /// ```
    /// use chesscore::Position;
    ///
    /// assert_eq!(Position::new(1, 1).offset(1, 2), Some(Position::new(2, 3)));
    /// assert_eq!(Position::new(1, 1).offset(-1, 0), None);
    /// ```
    pub const fn offset(self, drow: i32, dcol: i32) -> Option<Position> {
        let (Some(row), Some(col)) = (self.row.checked_add(drow), self.col.checked_add(dcol)) else {
            return None;
        };
        let target = Position::new(row, col);
        if target.is_valid() {
            Some(target)
        } else {
            None
        }
    }

    #[inline]
    const fn from_index(index: usize) -> Position {
        debug_assert!(index < 64);
        Position::new((index / 8) as i32 + 1, (index % 8) as i32 + 1)
    }

    /// All 64 valid positions, row by row starting at `(1, 1)`.
    pub fn all() -> impl DoubleEndedIterator<Item = Position> + ExactSizeIterator {
        (0..64).map(Position::from_index)
    }

    /// Chebyshev distance, the number of king steps between two squares.
    pub fn distance(self, other: Position) -> u32 {
        self.row
            .abs_diff(other.row)
            .max(self.col.abs_diff(other.col))
    }

    /// Parses algebraic notation such as `e4`.
    pub fn from_ascii(s: &[u8]) -> Result<Position, ParsePositionError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Position::new(
                i32::from(rank - b'1') + 1,
                i32::from(file - b'a') + 1,
            )),
            _ => Err(ParsePositionError),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(
                f,
                "{}{}",
                char::from(b'a' + (self.col - 1) as u8),
                char::from(b'1' + (self.row - 1) as u8)
            )
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// Error when parsing an invalid position name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParsePositionError;

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid position name")
    }
}

impl Error for ParsePositionError {}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Position, ParsePositionError> {
        Position::from_ascii(s.as_bytes())
    }
}
