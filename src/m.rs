use core::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use arrayvec::ArrayVec;

use crate::{position::Position, role::Role};

/// Information about a move.
///
/// Equality includes the promotion, so the four promotion choices on the
/// same pair of squares are four distinct moves.
///
/// # Display
///
/// `Move` implements [`Display`](fmt::Display) using coordinate notation
/// such as `e2e4` or `a7a8q`.
///
/// # Examples
///
/// ```
/// use chesscore::{Move, Position, Role};
///
/// let m: Move = "a7a8q".parse()?;
/// assert_eq!(m.from, Position::new(7, 1));
/// assert_eq!(m.to, Position::new(8, 1));
/// assert_eq!(m.promotion, Some(Role::Queen));
/// # Ok::<_, chesscore::ParseMoveError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<Role>,
}

impl Move {
    /// A move without promotion.
    #[inline]
    pub const fn new(from: Position, to: Position) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Position, to: Position, promotion: Role) -> Move {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Parses coordinate notation, e.g. `g1f3` or `b2b1n`.
    pub fn from_ascii(s: &[u8]) -> Result<Move, ParseMoveError> {
        if s.len() != 4 && s.len() != 5 {
            return Err(ParseMoveError);
        }

        let from = Position::from_ascii(&s[0..2]).map_err(|_| ParseMoveError)?;
        let to = Position::from_ascii(&s[2..4]).map_err(|_| ParseMoveError)?;
        let promotion = match s.get(4) {
            Some(&ch) => Some(
                Role::from_char(char::from(ch))
                    .filter(|r| r.is_promotion_target())
                    .ok_or(ParseMoveError)?,
            ),
            None => None,
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            f.write_char(role.char())?;
        }
        Ok(())
    }
}

/// Error when parsing an invalid move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseMoveError;

impl fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid move notation")
    }
}

impl Error for ParseMoveError {}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Move, ParseMoveError> {
        Move::from_ascii(s.as_bytes())
    }
}

/// A container for moves that can be stored inline on the stack.
///
/// The capacity is enough to hold the legal moves of any reachable chess
/// position.
///
/// # Example
///
/// ```
/// use chesscore::{Game, Position};
///
/// let game = Game::new();
/// let moves = game.valid_moves(Position::new(1, 7))?;
/// assert_eq!(moves.len(), 2);
/// # Ok::<_, chesscore::OutOfBounds>(())
/// ```
pub type MoveList = ArrayVec<Move, 256>;

#[cfg(test)]
mod tests {
    use std::string::ToString;

    use super::*;

    #[test]
    fn test_display() {
        let m = Move::new(Position::new(2, 5), Position::new(4, 5));
        assert_eq!(m.to_string(), "e2e4");
        let m = Move::with_promotion(Position::new(2, 2), Position::new(1, 1), Role::Knight);
        assert_eq!(m.to_string(), "b2a1n");
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "g1f3".parse(),
            Ok(Move::new(Position::new(1, 7), Position::new(3, 6)))
        );
        assert_eq!("e7e8k".parse::<Move>(), Err(ParseMoveError));
        assert_eq!("e7e8p".parse::<Move>(), Err(ParseMoveError));
        assert_eq!("e7e".parse::<Move>(), Err(ParseMoveError));
        assert_eq!("e7e8qq".parse::<Move>(), Err(ParseMoveError));
    }

    #[test]
    fn test_promotion_is_part_of_equality() {
        let from = Position::new(7, 1);
        let to = Position::new(8, 1);
        assert_ne!(
            Move::with_promotion(from, to, Role::Queen),
            Move::with_promotion(from, to, Role::Rook)
        );
        assert_ne!(Move::new(from, to), Move::with_promotion(from, to, Role::Queen));
    }
}
