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

//! Pseudo-legal move generation.
//!
//! Generators follow piece geometry and blocking, but do not care whether
//! the mover's own king is left attacked. [`Game`](crate::Game) filters
//! that.
//!
//! # Example
//!
//! ```
//! use chesscore::{movegen, Board, Color, MoveList, Position};
//!
//! let mut board = Board::empty();
//! let d4 = Position::new(4, 4);
//! board.set_piece_at(d4, Color::White.rook())?;
//!
//! let mut moves = MoveList::new();
//! movegen::rook_moves(&board, d4, Color::White, &mut moves);
//! assert_eq!(moves.len(), 14);
//! # Ok::<_, chesscore::OutOfBounds>(())
//! ```

use crate::{
    board::{Board, OutOfBounds},
    color::Color,
    m::{Move, MoveList},
    position::Position,
    role::Role,
    types::Piece,
};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const QUEEN_DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];
const KING_DELTAS: [(i32, i32); 8] = QUEEN_DIRECTIONS;
const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
];

trait Stepper {
    const DELTAS: &'static [(i32, i32)];

    fn gen_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
        for &(drow, dcol) in Self::DELTAS {
            if let Some(to) = from.offset(drow, dcol) {
                if board.get(to).is_none_or(|piece| piece.color != color) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }
}

trait Slider {
    const DIRECTIONS: &'static [(i32, i32)];

    fn gen_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
        for &(drow, dcol) in Self::DIRECTIONS {
            let mut to = from;
            while let Some(next) = to.offset(drow, dcol) {
                to = next;
                match board.get(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(piece) => {
                        if piece.color != color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
            }
        }
    }
}

struct KingTag;
struct KnightTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

impl Stepper for KingTag {
    const DELTAS: &'static [(i32, i32)] = &KING_DELTAS;
}

impl Stepper for KnightTag {
    const DELTAS: &'static [(i32, i32)] = &KNIGHT_DELTAS;
}

impl Slider for BishopTag {
    const DIRECTIONS: &'static [(i32, i32)] = &BISHOP_DIRECTIONS;
}

impl Slider for RookTag {
    const DIRECTIONS: &'static [(i32, i32)] = &ROOK_DIRECTIONS;
}

impl Slider for QueenTag {
    const DIRECTIONS: &'static [(i32, i32)] = &QUEEN_DIRECTIONS;
}

/// One step in any of the 8 directions onto a square not held by `color`.
pub fn king_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
    KingTag::gen_moves(board, from, color, moves);
}

/// Jumps to the 8 knight squares not held by `color`.
pub fn knight_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
    KnightTag::gen_moves(board, from, color, moves);
}

/// Diagonal rays, stopping at the first occupied square.
pub fn bishop_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
    BishopTag::gen_moves(board, from, color, moves);
}

/// Orthogonal rays, stopping at the first occupied square.
pub fn rook_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
    RookTag::gen_moves(board, from, color, moves);
}

/// Union of rook and bishop rays.
pub fn queen_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
    QueenTag::gen_moves(board, from, color, moves);
}

fn push_pawn_moves(moves: &mut MoveList, from: Position, to: Position, color: Color) {
    if to.row() == color.promotion_row() {
        for role in Role::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, role));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Pushes, double pushes from the start row, and diagonal captures. Moves
/// onto the promotion row come in four variants, one per
/// [`Role::PROMOTIONS`] entry.
pub fn pawn_moves(board: &Board, from: Position, color: Color, moves: &mut MoveList) {
    let forward = color.forward();

    if let Some(single) = from.offset(forward, 0) {
        if board.get(single).is_none() {
            push_pawn_moves(moves, from, single, color);

            if from.row() == color.pawn_row() {
                if let Some(double) = single.offset(forward, 0) {
                    if board.get(double).is_none() {
                        push_pawn_moves(moves, from, double, color);
                    }
                }
            }
        }
    }

    for dcol in [-1, 1] {
        if let Some(to) = from.offset(forward, dcol) {
            if board.get(to).is_some_and(|piece| piece.color != color) {
                push_pawn_moves(moves, from, to, color);
            }
        }
    }
}

pub(crate) fn gen_pseudo_legal(board: &Board, from: Position, piece: Piece, moves: &mut MoveList) {
    let Piece { color, role } = piece;
    match role {
        Role::King => king_moves(board, from, color, moves),
        Role::Queen => queen_moves(board, from, color, moves),
        Role::Rook => rook_moves(board, from, color, moves),
        Role::Bishop => bishop_moves(board, from, color, moves),
        Role::Knight => knight_moves(board, from, color, moves),
        Role::Pawn => pawn_moves(board, from, color, moves),
    }
}

impl Piece {
    /// Pseudo-legal moves of this piece as if it stood on `from`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `from` is not on the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use chesscore::{Board, Color, Position};
    ///
    /// let board = Board::new();
    /// let moves = Color::White.pawn().pseudo_legal_moves(&board, Position::new(2, 5))?;
    /// assert_eq!(moves.len(), 2);
    /// # Ok::<_, chesscore::OutOfBounds>(())
    /// ```
    pub fn pseudo_legal_moves(self, board: &Board, from: Position) -> Result<MoveList, OutOfBounds> {
        if !from.is_valid() {
            return Err(OutOfBounds { position: from });
        }
        let mut moves = MoveList::new();
        gen_pseudo_legal(board, from, self, &mut moves);
        Ok(moves)
    }
}

/// Tests if any piece of `attacker` could capture on `target`. Squares held
/// by `attacker` itself are never attacked.
pub fn is_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    match board.piece_at(target) {
        Err(OutOfBounds { .. }) => return false,
        Ok(Some(piece)) if piece.color == attacker => return false,
        Ok(_) => (),
    }

    board.pieces_of(attacker).any(|(from, piece)| {
        if piece.role == Role::Pawn {
            target.row() - from.row() == attacker.forward() && target.col().abs_diff(from.col()) == 1
        } else {
            let mut moves = MoveList::new();
            gen_pseudo_legal(board, from, piece, &mut moves);
            moves.iter().any(|m| m.to == target)
        }
    })
}

/// Tests if a slider of kind `role` could travel from `from` to `to` on an
/// empty board.
pub(crate) fn is_on_ray(role: Role, from: Position, to: Position) -> bool {
    let drow = to.row() - from.row();
    let dcol = to.col() - from.col();
    let straight = (drow == 0) != (dcol == 0);
    let diagonal = drow != 0 && drow.abs() == dcol.abs();
    match role {
        Role::Rook => straight,
        Role::Bishop => diagonal,
        Role::Queen => straight || diagonal,
        Role::Pawn | Role::Knight | Role::King => false,
    }
}

/// Tests if every square strictly between `from` and `to` is empty. Only
/// meaningful for squares on a common line; knight jumps are never
/// blocked.
pub(crate) fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    let drow = (to.row() - from.row()).signum();
    let dcol = (to.col() - from.col()).signum();

    let mut sq = from;
    for _ in 1..from.distance(to) {
        match sq.offset(drow, dcol) {
            Some(next) if board.get(next).is_none() => sq = next,
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().expect("valid position")
    }

    fn targets(moves: &MoveList) -> HashSet<Position> {
        moves.iter().map(|m| m.to).collect()
    }

    fn moves_from(board: &Board, from: Position) -> MoveList {
        let piece = board.piece_at(from).unwrap().expect("piece on origin");
        piece.pseudo_legal_moves(board, from).unwrap()
    }

    #[test]
    fn test_rook_on_empty_board() {
        let mut board = Board::empty();
        board.set_piece_at(Position::new(4, 4), Color::White.rook()).unwrap();
        let moves = moves_from(&board, Position::new(4, 4));
        assert_eq!(moves.len(), 14);
        assert!(moves.iter().all(|m| m.to.row() == 4 || m.to.col() == 4));
    }

    #[test]
    fn test_bishop_and_queen_on_empty_board() {
        let mut board = Board::empty();
        board.set_piece_at(pos("e4"), Color::Black.bishop()).unwrap();
        assert_eq!(moves_from(&board, pos("e4")).len(), 13);

        let mut board = Board::empty();
        board.set_piece_at(pos("a8"), Color::White.queen()).unwrap();
        assert_eq!(moves_from(&board, pos("a8")).len(), 21);
    }

    #[test]
    fn test_queen_stops_at_capture() {
        // Q . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . b . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        let mut board = Board::empty();
        board.set_piece_at(pos("e4"), Color::Black.bishop()).unwrap();
        board.set_piece_at(pos("a8"), Color::White.queen()).unwrap();

        let moves = targets(&moves_from(&board, pos("a8")));
        assert_eq!(moves.len(), 18);
        assert!(moves.contains(&pos("e4")));
        assert!(!moves.contains(&pos("f3")));
    }

    #[test]
    fn test_slider_blocking() {
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // p . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // R . . N . . . .
        let mut board = Board::empty();
        board.set_piece_at(pos("a1"), Color::White.rook()).unwrap();
        board.set_piece_at(pos("a4"), Color::Black.pawn()).unwrap();
        board.set_piece_at(pos("d1"), Color::White.knight()).unwrap();

        let moves = targets(&moves_from(&board, pos("a1")));
        let expected: HashSet<Position> = ["a2", "a3", "a4", "b1", "c1"].into_iter().map(pos).collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn test_knight_jumps() {
        let board = Board::new();
        let moves = targets(&moves_from(&board, pos("b1")));
        let expected: HashSet<Position> = ["a3", "c3"].into_iter().map(pos).collect();
        assert_eq!(moves, expected);

        let mut board = Board::empty();
        board.set_piece_at(pos("a1"), Color::Black.knight()).unwrap();
        assert_eq!(moves_from(&board, pos("a1")).len(), 2);
        board.set_piece_at(pos("e4"), Color::Black.knight()).unwrap();
        assert_eq!(moves_from(&board, pos("e4")).len(), 8);
    }

    #[test]
    fn test_king_steps() {
        let mut board = Board::empty();
        board.set_piece_at(pos("e4"), Color::White.king()).unwrap();
        board.set_piece_at(pos("e5"), Color::White.pawn()).unwrap();
        board.set_piece_at(pos("d3"), Color::Black.pawn()).unwrap();
        let moves = targets(&moves_from(&board, pos("e4")));
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&pos("e5")));
        assert!(moves.contains(&pos("d3")));

        board.set_piece_at(pos("h1"), Color::White.king()).unwrap();
        assert_eq!(moves_from(&board, pos("h1")).len(), 3);
    }

    #[test]
    fn test_pawn_start_moves() {
        let board = Board::new();
        assert_eq!(
            targets(&moves_from(&board, Position::new(2, 5))),
            [Position::new(3, 5), Position::new(4, 5)].into_iter().collect()
        );
        assert_eq!(
            targets(&moves_from(&board, Position::new(7, 5))),
            [Position::new(6, 5), Position::new(5, 5)].into_iter().collect()
        );
    }

    #[test]
    fn test_pawn_blocked() {
        let mut board = Board::new();
        board.set_piece_at(pos("e3"), Color::Black.knight()).unwrap();
        assert!(moves_from(&board, pos("e2")).is_empty());

        let mut board = Board::new();
        board.set_piece_at(pos("d4"), Color::Black.knight()).unwrap();
        assert_eq!(targets(&moves_from(&board, pos("d2"))), [pos("d3")].into_iter().collect());
    }

    #[test]
    fn test_pawn_captures() {
        let mut board = Board::empty();
        board.set_piece_at(pos("e4"), Color::White.pawn()).unwrap();
        board.set_piece_at(pos("d5"), Color::Black.rook()).unwrap();
        board.set_piece_at(pos("f5"), Color::White.rook()).unwrap();
        board.set_piece_at(pos("e5"), Color::Black.pawn()).unwrap();
        assert_eq!(targets(&moves_from(&board, pos("e4"))), [pos("d5")].into_iter().collect());
    }

    #[test]
    fn test_pawn_promotions() {
        let mut board = Board::empty();
        board.set_piece_at(pos("b2"), Color::Black.pawn()).unwrap();
        board.set_piece_at(pos("a1"), Color::White.rook()).unwrap();
        board.set_piece_at(pos("c1"), Color::Black.rook()).unwrap();

        let moves = moves_from(&board, pos("b2"));
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|m| m.promotion.is_some() && m.to.row() == 1));

        let roles: MoveList = moves.iter().filter(|m| m.to == pos("b1")).copied().collect();
        assert_eq!(
            roles.iter().map(|m| m.promotion).collect::<std::vec::Vec<_>>(),
            Role::PROMOTIONS.map(Some).to_vec()
        );
    }

    #[test]
    fn test_is_attacked() {
        let board = Board::new();
        assert!(is_attacked(&board, pos("f3"), Color::White));
        assert!(is_attacked(&board, pos("e3"), Color::White));
        assert!(!is_attacked(&board, pos("e4"), Color::White));
        assert!(!is_attacked(&board, pos("e2"), Color::White));
        assert!(is_attacked(&board, pos("f6"), Color::Black));
        assert!(!is_attacked(&board, pos("a5"), Color::Black));
    }

    #[test]
    fn test_path_clear() {
        let board = Board::new();
        assert!(!is_path_clear(&board, pos("a1"), pos("a3")));
        assert!(is_path_clear(&board, pos("a2"), pos("a7")));
        assert!(is_path_clear(&board, pos("e2"), pos("e3")));
    }

    #[test]
    fn test_is_on_ray() {
        assert!(is_on_ray(Role::Rook, pos("a1"), pos("a8")));
        assert!(!is_on_ray(Role::Rook, pos("a1"), pos("b2")));
        assert!(is_on_ray(Role::Bishop, pos("c1"), pos("h6")));
        assert!(!is_on_ray(Role::Bishop, pos("c1"), pos("c3")));
        assert!(is_on_ray(Role::Queen, pos("d1"), pos("d8")));
        assert!(is_on_ray(Role::Queen, pos("d1"), pos("a4")));
        assert!(!is_on_ray(Role::Queen, pos("d1"), pos("e3")));
        assert!(!is_on_ray(Role::Queen, pos("d1"), pos("d1")));
        assert!(!is_on_ray(Role::Knight, pos("g1"), pos("f3")));
    }

    #[test]
    fn test_out_of_bounds_origin() {
        let board = Board::new();
        assert!(Color::White.queen().pseudo_legal_moves(&board, Position::new(0, 4)).is_err());
    }
}
