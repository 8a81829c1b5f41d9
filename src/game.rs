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

//! Turn order, legality and game status.

use core::{error::Error, fmt};

use tracing::{debug, trace};

use crate::{
    board::{Board, OutOfBounds},
    color::Color,
    m::{Move, MoveList},
    movegen::{gen_pseudo_legal, is_attacked, is_on_ray, is_path_clear},
    position::Position,
    role::Role,
    types::Piece,
};

/// Classification of the side to move.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Normal,
    Check,
    Checkmate,
    Stalemate,
}

impl Status {
    /// Tests for checkmate or stalemate.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Normal => "normal",
            Status::Check => "check",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        })
    }
}

/// Outcome of a finished game.
///
/// # Display
///
/// Printed as `1-0`, `0-1` or `1/2-1/2`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// Reason why a move was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InvalidMoveKind {
    /// No piece stands on the origin square.
    EmptySquare,
    /// The piece on the origin square belongs to the side not to move.
    WrongTurn,
    /// The piece cannot reach the destination square.
    Unreachable,
    /// A piece stands between origin and destination.
    PathBlocked,
    /// A pawn reaching its promotion row must name a promotion.
    MissingPromotion,
    /// Only pawns reaching their promotion row may promote.
    UnexpectedPromotion,
    /// Pawns promote to rook, knight, bishop or queen only.
    BadPromotionRole,
    /// The move would leave the mover's own king attacked.
    LeavesKingInCheck,
}

impl fmt::Display for InvalidMoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvalidMoveKind::EmptySquare => "no piece on origin square",
            InvalidMoveKind::WrongTurn => "not this side's turn",
            InvalidMoveKind::Unreachable => "piece cannot reach destination",
            InvalidMoveKind::PathBlocked => "path is blocked",
            InvalidMoveKind::MissingPromotion => "promotion required",
            InvalidMoveKind::UnexpectedPromotion => "move cannot promote",
            InvalidMoveKind::BadPromotionRole => "invalid promotion role",
            InvalidMoveKind::LeavesKingInCheck => "king would be in check",
        })
    }
}

/// Error when trying to play an illegal move.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InvalidMove {
    pub m: Move,
    pub kind: InvalidMoveKind,
}

impl fmt::Display for InvalidMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}: {}", self.m, self.kind)
    }
}

impl Error for InvalidMove {}

/// Error returned by [`Game::make_move()`] and [`Game::play()`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    OutOfBounds(OutOfBounds),
    InvalidMove(InvalidMove),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::OutOfBounds(err) => err.fmt(f),
            PlayError::InvalidMove(err) => err.fmt(f),
        }
    }
}

impl Error for PlayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PlayError::OutOfBounds(err) => Some(err),
            PlayError::InvalidMove(err) => Some(err),
        }
    }
}

impl From<OutOfBounds> for PlayError {
    fn from(err: OutOfBounds) -> PlayError {
        PlayError::OutOfBounds(err)
    }
}

impl From<InvalidMove> for PlayError {
    fn from(err: InvalidMove) -> PlayError {
        PlayError::InvalidMove(err)
    }
}

/// A game of chess: a board and the side to move.
///
/// All legality checks run on scratch copies of the board. The only
/// operation that changes the board of a game in place is
/// [`Game::make_move()`] (and [`Game::play()`] on top of it).
///
/// # Examples
///
/// ```
/// use chesscore::{Color, Game, Status};
///
/// let mut game = Game::new();
/// for uci in ["f2f3", "e7e5", "g2g4"] {
///     game.make_move(uci.parse()?)?;
/// }
/// assert_eq!(game.play("d8h4".parse()?)?, Status::Checkmate);
/// assert!(game.is_in_checkmate(Color::White));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Game {
    board: Board,
    turn: Color,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// The standard starting position with white to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            turn: Color::White,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the board without any validation. Use
    /// [`Game::from_setup()`] to construct a checked game instead.
    pub fn set_board(&mut self, board: Board) {
        debug!(pieces = board.count(), "board replaced");
        self.board = board;
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
    }

    pub(crate) fn from_parts(board: Board, turn: Color) -> Game {
        Game { board, turn }
    }

    pub(crate) fn into_parts(self) -> (Board, Color) {
        (self.board, self.turn)
    }

    /// King-safe moves of the piece on `origin`, regardless of whose turn
    /// it is. Empty if the square is empty.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `origin` is not on the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use chesscore::{Game, Position};
    ///
    /// let game = Game::new();
    /// let moves = game.valid_moves(Position::new(7, 5))?;
    /// assert_eq!(moves.len(), 2);
    /// assert!(game.valid_moves(Position::new(4, 4))?.is_empty());
    /// # Ok::<_, chesscore::OutOfBounds>(())
    /// ```
    pub fn valid_moves(&self, origin: Position) -> Result<MoveList, OutOfBounds> {
        let mut moves = MoveList::new();
        if let Some(piece) = self.board.piece_at(origin)? {
            gen_pseudo_legal(&self.board, origin, piece, &mut moves);
            moves.retain(|m| is_safe(&self.board, piece, m));
        }
        Ok(moves)
    }

    /// All king-safe moves of the side to move, square by square.
    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.board.pieces_of(self.turn).flat_map(move |(from, piece)| {
            let mut moves = MoveList::new();
            gen_pseudo_legal(&self.board, from, piece, &mut moves);
            moves.retain(|m| is_safe(&self.board, piece, m));
            moves
        })
    }

    /// Tests if any king of `color` is attacked. A side without a king is
    /// never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_attacked(&self.board, color)
    }

    /// In check and without a king-safe move.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_safe_move(color)
    }

    /// Not in check, but without a king-safe move. Does not depend on the
    /// side to move.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_safe_move(color)
    }

    fn has_safe_move(&self, color: Color) -> bool {
        self.board.pieces_of(color).any(|(from, piece)| {
            let mut moves = MoveList::new();
            gen_pseudo_legal(&self.board, from, piece, &mut moves);
            moves.iter().any(|m| is_safe(&self.board, piece, m))
        })
    }

    /// Classifies the position for the side to move.
    pub fn status(&self) -> Status {
        let check = self.is_in_check(self.turn);
        match (check, self.has_safe_move(self.turn)) {
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check,
            (false, true) => Status::Normal,
        }
    }

    /// The outcome, if the side to move is checkmated or stalemated.
    ///
    /// ```
    /// use chesscore::{fen::Fen, Outcome};
    ///
    /// let fen: Fen = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1".parse()?;
    /// let game = fen.into_game()?;
    /// assert_eq!(game.outcome(), Some(Outcome::Draw));
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status() {
            Status::Checkmate => Some(Outcome::Decisive {
                winner: !self.turn,
            }),
            Status::Stalemate => Some(Outcome::Draw),
            Status::Normal | Status::Check => None,
        }
    }

    /// Validates `m` for the side to move and plays it.
    ///
    /// A pawn reaching its promotion row is replaced by a new piece of the
    /// promotion role. Otherwise the piece moves, capturing whatever stood
    /// on the destination. Then the turn passes to the other side.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::OutOfBounds`] if either square is off the
    /// board, or [`PlayError::InvalidMove`] if the move is illegal. The
    /// game is unchanged in both cases.
    pub fn make_move(&mut self, m: Move) -> Result<(), PlayError> {
        let piece = match self.validate(m) {
            Ok(piece) => piece,
            Err(err) => {
                debug!(%m, %err, "move rejected");
                return Err(err);
            }
        };

        do_move(&mut self.board, piece, m);
        self.turn = !self.turn;
        trace!(%m, turn = %self.turn, "move applied");
        Ok(())
    }

    /// Plays `m` like [`Game::make_move()`] and reports the status of the
    /// side now to move.
    ///
    /// # Errors
    ///
    /// Same as [`Game::make_move()`].
    pub fn play(&mut self, m: Move) -> Result<Status, PlayError> {
        self.make_move(m)?;
        let status = self.status();
        trace!(%status, "status after move");
        Ok(status)
    }

    /// Plays a move generated for this game without validating it again.
    pub(crate) fn play_unchecked(&mut self, m: Move) {
        if let Some(piece) = self.board.get(m.from) {
            do_move(&mut self.board, piece, m);
        }
        self.turn = !self.turn;
    }

    fn validate(&self, m: Move) -> Result<Piece, PlayError> {
        self.board.piece_at(m.to)?;
        let piece = self.board.piece_at(m.from)?.ok_or(InvalidMove {
            m,
            kind: InvalidMoveKind::EmptySquare,
        })?;
        let invalid = |kind| PlayError::InvalidMove(InvalidMove { m, kind });

        if piece.color != self.turn {
            return Err(invalid(InvalidMoveKind::WrongTurn));
        }

        if piece.role.is_slider()
            && is_on_ray(piece.role, m.from, m.to)
            && !is_path_clear(&self.board, m.from, m.to)
        {
            return Err(invalid(InvalidMoveKind::PathBlocked));
        }

        let mut candidates = MoveList::new();
        gen_pseudo_legal(&self.board, m.from, piece, &mut candidates);
        if !candidates.iter().any(|c| c.from == m.from && c.to == m.to) {
            return Err(invalid(InvalidMoveKind::Unreachable));
        }

        let promotes = piece.role == Role::Pawn && m.to.row() == piece.color.promotion_row();
        match m.promotion {
            None if promotes => return Err(invalid(InvalidMoveKind::MissingPromotion)),
            Some(_) if !promotes => return Err(invalid(InvalidMoveKind::UnexpectedPromotion)),
            Some(role) if !role.is_promotion_target() => {
                return Err(invalid(InvalidMoveKind::BadPromotionRole))
            }
            _ => (),
        }
        debug_assert!(candidates.contains(&m));

        if !is_safe(&self.board, piece, &m) {
            return Err(invalid(InvalidMoveKind::LeavesKingInCheck));
        }

        Ok(piece)
    }
}

fn do_move(board: &mut Board, piece: Piece, m: Move) {
    let landing = match m.promotion {
        Some(role) => role.of(piece.color),
        None => piece,
    };
    board.set(m.from, None);
    board.set(m.to, Some(landing));
}

fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .filter(|(_, piece)| piece.role == Role::King)
        .any(|(king, _)| is_attacked(board, king, !color))
}

/// Simulates `m` on a scratch copy and tests the mover's king.
fn is_safe(board: &Board, piece: Piece, m: &Move) -> bool {
    let mut scratch = board.clone();
    do_move(&mut scratch, piece, *m);
    !is_king_attacked(&scratch, piece.color)
}

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().expect("valid position")
    }

    fn mv(s: &str) -> Move {
        s.parse().expect("valid move")
    }

    fn game(pieces: &[(&str, Piece)], turn: Color) -> Game {
        let mut board = Board::empty();
        for &(sq, piece) in pieces {
            board.set_piece_at(pos(sq), piece).unwrap();
        }
        Game::from_parts(board, turn)
    }

    #[test]
    fn test_initial_moves() {
        let game = Game::new();
        assert_eq!(game.legal_moves().count(), 20);
        assert_eq!(game.status(), Status::Normal);
        assert_eq!(game.outcome(), None);
        assert!(!game.is_in_check(Color::White));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut game = Game::new();
        assert!(game.valid_moves(Position::new(9, 9)).is_err());
        let m = Move::new(Position::new(2, 5), Position::new(0, 5));
        assert_eq!(
            game.make_move(m),
            Err(PlayError::OutOfBounds(OutOfBounds {
                position: Position::new(0, 5)
            }))
        );
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_rejections() {
        let mut game = Game::new();
        let cases = [
            ("e3e4", InvalidMoveKind::EmptySquare),
            ("e7e5", InvalidMoveKind::WrongTurn),
            ("e2e5", InvalidMoveKind::Unreachable),
            ("a1a3", InvalidMoveKind::PathBlocked),
            ("a1a2", InvalidMoveKind::Unreachable),
            ("f1a6", InvalidMoveKind::PathBlocked),
            ("d1h5", InvalidMoveKind::PathBlocked),
            ("c1c3", InvalidMoveKind::Unreachable),
            ("e2e4q", InvalidMoveKind::UnexpectedPromotion),
        ];
        for (uci, kind) in cases {
            let m = mv(uci);
            assert_eq!(game.make_move(m), Err(PlayError::InvalidMove(InvalidMove { m, kind })));
        }
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_turn_alternates() {
        let mut game = Game::new();
        game.make_move(mv("e2e4")).unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().piece_at(pos("e4")), Ok(Some(Color::White.pawn())));
        assert_eq!(game.board().piece_at(pos("e2")), Ok(None));
        game.make_move(mv("e7e5")).unwrap();
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_pinned_piece() {
        // k . . . r . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . . . . .
        // . . . . B . . .
        // . . . . K . . .
        let mut game = game(
            &[
                ("e1", Color::White.king()),
                ("e2", Color::White.bishop()),
                ("e8", Color::Black.rook()),
                ("a8", Color::Black.king()),
            ],
            Color::White,
        );
        assert!(game.valid_moves(pos("e2")).unwrap().is_empty());
        let m = mv("e2d3");
        assert_eq!(
            game.make_move(m),
            Err(PlayError::InvalidMove(InvalidMove {
                m,
                kind: InvalidMoveKind::LeavesKingInCheck
            }))
        );
    }

    #[test]
    fn test_king_cannot_step_into_check() {
        let game = game(
            &[
                ("e1", Color::White.king()),
                ("d8", Color::Black.rook()),
                ("h8", Color::Black.king()),
            ],
            Color::White,
        );
        let targets: MoveList = game.valid_moves(pos("e1")).unwrap();
        assert!(targets.iter().all(|m| m.to.col() != 4));
        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn test_promotion() {
        let mut game = game(
            &[
                ("a7", Color::White.pawn()),
                ("e1", Color::White.king()),
                ("e8", Color::Black.king()),
            ],
            Color::White,
        );
        let moves = game.valid_moves(pos("a7")).unwrap();
        assert_eq!(moves.len(), 4);

        let m = mv("a7a8");
        assert_eq!(
            game.make_move(m),
            Err(PlayError::InvalidMove(InvalidMove {
                m,
                kind: InvalidMoveKind::MissingPromotion
            }))
        );

        let m = Move::with_promotion(pos("a7"), pos("a8"), Role::King);
        assert_eq!(
            game.make_move(m),
            Err(PlayError::InvalidMove(InvalidMove {
                m,
                kind: InvalidMoveKind::BadPromotionRole
            }))
        );

        game.make_move(mv("a7a8q")).unwrap();
        assert_eq!(game.board().piece_at(pos("a8")), Ok(Some(Color::White.queen())));
        assert_eq!(game.board().piece_at(pos("a7")), Ok(None));
        assert!(game.is_in_check(Color::Black));
    }

    #[test]
    fn test_underpromotion_by_capture() {
        let mut game = game(
            &[
                ("b2", Color::Black.pawn()),
                ("a1", Color::White.rook()),
                ("h1", Color::White.king()),
                ("h8", Color::Black.king()),
            ],
            Color::Black,
        );
        game.make_move(mv("b2a1n")).unwrap();
        assert_eq!(game.board().piece_at(pos("a1")), Ok(Some(Color::Black.knight())));
        assert_eq!(game.board().pieces_of(Color::White).count(), 1);
    }

    #[test]
    fn test_missing_king() {
        let game = game(&[("d4", Color::White.queen())], Color::Black);
        assert!(!game.is_in_check(Color::Black));
        assert!(game.is_in_stalemate(Color::Black));
        assert!(!game.is_in_stalemate(Color::White));
    }

    #[test]
    fn test_stalemate_query_keeps_turn() {
        let game = game(
            &[
                ("h8", Color::Black.king()),
                ("f7", Color::White.queen()),
                ("g6", Color::White.king()),
            ],
            Color::White,
        );
        assert!(game.is_in_stalemate(Color::Black));
        assert!(!game.is_in_checkmate(Color::Black));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), Status::Normal);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(
            Outcome::Decisive {
                winner: Color::Black
            }
            .to_string(),
            "0-1"
        );
        assert_eq!(Outcome::Draw.to_string(), "1/2-1/2");
    }
}
