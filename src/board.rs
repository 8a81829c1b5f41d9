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

//! Piece placement.

use core::{
    error::Error,
    fmt::{self, Write as _},
};

use crate::{color::Color, position::Position, role::Role, types::Piece};

/// Error when addressing a square outside of the 8×8 grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct OutOfBounds {
    pub position: Position,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "position {} is out of bounds", self.position)
    }
}

impl Error for OutOfBounds {}

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// [`Piece`] positions on an 8×8 board.
///
/// Pieces live in a dense table addressed by [`Position`]. Cloning a board
/// yields a fully independent copy, which is how legality checks probe
/// moves without touching the board in play.
///
/// # Examples
///
/// ```
/// use chesscore::{Board, Color, Position};
///
/// let board = Board::default();
/// assert_eq!(board.piece_at(Position::new(1, 5)), Ok(Some(Color::White.king())));
///
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        let mut board = Board::empty();
        board.reset();
        board
    }

    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Clears the board and places the standard 32 pieces.
    pub fn reset(&mut self) {
        *self = Board::empty();
        for color in Color::ALL {
            for (file, role) in BACKRANK.into_iter().enumerate() {
                self.squares[color.backrank() as usize - 1][file] = Some(role.of(color));
            }
            self.squares[color.pawn_row() as usize - 1] = [Some(color.pawn()); 8];
        }
    }

    /// Tests if `p` addresses a square of this board.
    #[inline]
    pub const fn is_position_valid(&self, p: Position) -> bool {
        p.is_valid()
    }

    #[inline]
    fn check(p: Position) -> Result<Position, OutOfBounds> {
        if p.is_valid() {
            Ok(p)
        } else {
            Err(OutOfBounds { position: p })
        }
    }

    /// Unchecked lookup for positions already known to be valid.
    #[inline]
    pub(crate) fn get(&self, p: Position) -> Option<Piece> {
        debug_assert!(p.is_valid());
        self.squares[p.row() as usize - 1][p.col() as usize - 1]
    }

    #[inline]
    pub(crate) fn set(&mut self, p: Position, piece: Option<Piece>) -> Option<Piece> {
        debug_assert!(p.is_valid());
        core::mem::replace(
            &mut self.squares[p.row() as usize - 1][p.col() as usize - 1],
            piece,
        )
    }

    /// Gets the piece on `p`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `p` is not on the board.
    pub fn piece_at(&self, p: Position) -> Result<Option<Piece>, OutOfBounds> {
        Board::check(p).map(|p| self.get(p))
    }

    /// Tests if a piece stands on `p`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `p` is not on the board.
    pub fn is_occupied(&self, p: Position) -> Result<bool, OutOfBounds> {
        self.piece_at(p).map(|piece| piece.is_some())
    }

    /// Overwrites the square `p`. Placing `None` empties the square. Returns
    /// whatever stood there before.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] and leaves the board untouched if `p` is not
    /// on the board.
    pub fn place(&mut self, p: Position, piece: Option<Piece>) -> Result<Option<Piece>, OutOfBounds> {
        Board::check(p).map(|p| self.set(p, piece))
    }

    /// Shorthand for placing `Some(piece)`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `p` is not on the board.
    pub fn set_piece_at(&mut self, p: Position, piece: Piece) -> Result<(), OutOfBounds> {
        self.place(p, Some(piece)).map(|_| ())
    }

    /// Empties `p` and returns the piece that stood there.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `p` is not on the board.
    pub fn remove_piece_at(&mut self, p: Position) -> Result<Option<Piece>, OutOfBounds> {
        self.place(p, None)
    }

    /// Iterates over all pieces together with where they stand, row by row
    /// starting at `(1, 1)`.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(move |p| self.get(p).map(|piece| (p, piece)))
    }

    /// Like [`Board::pieces()`], restricted to one side.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Finds the king of the given side. If there are several, the first
    /// one in row order is returned.
    pub fn king_of(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.role == Role::King)
            .map(|(p, _)| p)
    }

    /// Number of pieces on the board.
    pub fn count(&self) -> usize {
        self.pieces().count()
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=8).rev() {
            for col in 1..=8 {
                f.write_char(self.get(Position::new(row, col)).map_or('.', Piece::char))?;
                f.write_char(if col < 8 { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use core::fmt::Write as _;
    use std::string::String;

    use super::*;

    #[test]
    fn test_piece_at() {
        let board = Board::new();
        assert_eq!(board.piece_at(Position::new(2, 1)), Ok(Some(Color::White.pawn())));
        assert_eq!(board.piece_at(Position::new(1, 2)), Ok(Some(Color::White.knight())));
        assert_eq!(board.piece_at(Position::new(8, 4)), Ok(Some(Color::Black.queen())));
        assert_eq!(board.piece_at(Position::new(4, 4)), Ok(None));
        assert_eq!(board.count(), 32);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::empty();
        let outside = Position::new(9, 1);
        assert_eq!(board.piece_at(outside), Err(OutOfBounds { position: outside }));
        assert!(board.is_occupied(Position::new(0, 0)).is_err());
        assert!(board.set_piece_at(outside, Color::White.rook()).is_err());
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::empty();
        let d4 = Position::new(4, 4);
        assert_eq!(board.place(d4, Some(Color::Black.bishop())), Ok(None));
        assert_eq!(board.is_occupied(d4), Ok(true));
        assert_eq!(board.place(d4, Some(Color::White.rook())), Ok(Some(Color::Black.bishop())));
        assert_eq!(board.remove_piece_at(d4), Ok(Some(Color::White.rook())));
        assert_eq!(board.is_occupied(d4), Ok(false));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::new();
        let mut copy = board.clone();
        assert_eq!(copy, board);

        copy.remove_piece_at(Position::new(1, 5)).unwrap();
        assert_ne!(copy, board);
        assert_eq!(board.king_of(Color::White), Some(Position::new(1, 5)));
        assert_eq!(copy.king_of(Color::White), None);
    }

    #[test]
    fn test_reset() {
        let mut board = Board::empty();
        board.set_piece_at(Position::new(5, 5), Color::White.queen()).unwrap();
        board.reset();
        assert_eq!(board, Board::default());
        assert_eq!(board.king_of(Color::Black), Some(Position::new(8, 5)));
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
    }

    #[test]
    fn test_display() {
        let board = Board::new();
        let mut lines = String::new();
        write!(lines, "{board}").unwrap();
        assert_eq!(lines.lines().next(), Some("r n b q k b n r"));
        assert_eq!(lines.lines().last(), Some("R N B Q K B N R"));
        assert_eq!(lines.lines().nth(3), Some(". . . . . . . ."));
    }
}
