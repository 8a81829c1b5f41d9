//! Parse and write Forsyth-Edwards-Notation.
//!
//! Only piece placement and side to move carry meaning. Castling rights and
//! en passant squares are checked for syntax and then dropped, so they are
//! always written as `-`. The move counters are kept as given.
//!
//! # Examples
//!
//! ```
//! use chesscore::{fen::Fen, Color, Position};
//!
//! let fen: Fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse()?;
//! let mut game = fen.into_game()?;
//!
//! game.make_move("a7a8q".parse()?)?;
//! assert_eq!(game.board().piece_at(Position::new(8, 1))?, Some(Color::White.queen()));
//! assert_eq!(Fen::from_game(&game).to_string(), "Q3k3/8/8/8/8/8/8/4K3 b - - 0 1");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use core::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use crate::{
    board::Board,
    color::Color,
    game::Game,
    position::Position,
    setup::{Setup, SetupError},
    types::Piece,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// Displays the board part of a FEN. See [`Board::board_fen()`].
#[derive(Debug)]
pub struct BoardFen<'b> {
    board: &'b Board,
}

impl fmt::Display for BoardFen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=8).rev() {
            let mut empty = 0u8;

            for col in 1..=8 {
                match self.board.get(Position::new(row, col)) {
                    Some(piece) => {
                        if empty > 0 {
                            f.write_char(char::from(b'0' + empty))?;
                            empty = 0;
                        }
                        f.write_char(piece.char())?;
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                f.write_char(char::from(b'0' + empty))?;
            }

            if row > 1 {
                f.write_char('/')?;
            }
        }

        Ok(())
    }
}

impl Board {
    /// Parses the board part of a FEN.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError::InvalidBoard`] unless the input describes
    /// exactly 8 rows of 8 squares each.
    pub fn from_board_fen(board_fen: &[u8]) -> Result<Board, ParseFenError> {
        let mut board = Board::empty();
        let mut row = 8;
        let mut col = 1;

        for &ch in board_fen {
            match ch {
                b'/' => {
                    if col != 9 || row == 1 {
                        return Err(ParseFenError::InvalidBoard);
                    }
                    row -= 1;
                    col = 1;
                }
                b'1'..=b'8' => {
                    col += i32::from(ch - b'0');
                    if col > 9 {
                        return Err(ParseFenError::InvalidBoard);
                    }
                }
                _ => {
                    let piece = Piece::from_char(char::from(ch)).ok_or(ParseFenError::InvalidBoard)?;
                    if col > 8 {
                        return Err(ParseFenError::InvalidBoard);
                    }
                    board.set(Position::new(row, col), Some(piece));
                    col += 1;
                }
            }
        }

        if row != 1 || col != 9 {
            return Err(ParseFenError::InvalidBoard);
        }

        Ok(board)
    }

    /// Piece placement in FEN notation.
    ///
    /// ```
    /// use chesscore::Board;
    ///
    /// assert_eq!(
    ///     Board::new().board_fen().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    pub fn board_fen(&self) -> BoardFen<'_> {
        BoardFen { board: self }
    }
}

/// A parsed FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub setup: Setup,
    /// Number of half-moves since the last capture or pawn move.
    pub halfmoves: u32,
    /// Current move number, starting at 1.
    pub fullmoves: u32,
}

impl Default for Fen {
    fn default() -> Fen {
        Fen {
            setup: Setup::default(),
            halfmoves: 0,
            fullmoves: 1,
        }
    }
}

impl Fen {
    pub fn empty() -> Fen {
        Fen {
            setup: Setup::empty(),
            ..Fen::default()
        }
    }

    /// Snapshot of a game with fresh move counters.
    pub fn from_game(game: &Game) -> Fen {
        Fen {
            setup: game.clone().into(),
            ..Fen::default()
        }
    }

    /// Validates the setup and constructs a game.
    ///
    /// # Errors
    ///
    /// See [`Game::from_setup()`].
    pub fn into_game(self) -> Result<Game, SetupError> {
        Game::from_setup(self.setup)
    }

    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());
        let mut result = Fen::empty();

        result.setup.board = Board::from_board_fen(parts.next().ok_or(ParseFenError::InvalidFen)?)?;

        result.setup.turn = match parts.next() {
            Some(&[ch]) => Color::from_char(char::from(ch)).ok_or(ParseFenError::InvalidTurn)?,
            Some(_) => return Err(ParseFenError::InvalidTurn),
            None => Color::White,
        };

        if let Some(castling_part) = parts.next() {
            if castling_part != b"-"
                && !castling_part.iter().all(|ch| b"KQkqABCDEFGHabcdefgh".contains(ch))
            {
                return Err(ParseFenError::InvalidCastling);
            }
        }

        if let Some(ep_part) = parts.next() {
            if ep_part != b"-" {
                let ep_square = Position::from_ascii(ep_part).map_err(|_| ParseFenError::InvalidEpSquare)?;
                if ep_square.row() != 3 && ep_square.row() != 6 {
                    return Err(ParseFenError::InvalidEpSquare);
                }
            }
        }

        if let Some(halfmoves_part) = parts.next() {
            result.halfmoves = btoi::btou(halfmoves_part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?;
        }

        if let Some(fullmoves_part) = parts.next() {
            result.fullmoves = btoi::btou(fullmoves_part)
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ParseFenError::InvalidFullmoves)?;
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(result)
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - - {} {}",
            self.setup.board.board_fen(),
            self.setup.turn.char(),
            self.halfmoves,
            self.fullmoves
        )
    }
}
