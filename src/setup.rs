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

use core::{error::Error, fmt};

use bitflags::bitflags;
use tracing::debug;

use crate::{
    board::Board,
    color::{ByColor, Color},
    game::Game,
    role::Role,
};

/// A not necessarily legal position.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setup {
    /// Piece positions on the board.
    pub board: Board,

    /// Side to move.
    pub turn: Color,
}

impl Setup {
    pub const fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            turn: Color::White,
        }
    }

    pub fn swap_turn(&mut self) {
        self.turn = !self.turn;
    }
}

impl Default for Setup {
    fn default() -> Setup {
        Setup {
            board: Board::new(),
            turn: Color::White,
        }
    }
}

impl From<Game> for Setup {
    fn from(game: Game) -> Setup {
        let (board, turn) = game.into_parts();
        Setup { board, turn }
    }
}

bitflags! {
    /// Reasons for a [`Setup`] not being a legal game.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct SetupErrorKinds: u32 {
        /// A side has no king.
        const MISSING_KING = 1 << 0;
        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 1;
        /// A side has more than 16 pieces.
        const TOO_MANY_PIECES = 1 << 2;
        /// A side has more than 8 pawns.
        const TOO_MANY_PAWNS = 1 << 3;
        /// There are pawns on row 1 or row 8.
        const PAWNS_ON_BACKRANK = 1 << 4;
        /// The player not to move is in check.
        const OPPOSITE_CHECK = 1 << 5;
    }
}

const REASONS: [(SetupErrorKinds, &str); 6] = [
    (SetupErrorKinds::MISSING_KING, "missing king"),
    (SetupErrorKinds::TOO_MANY_KINGS, "too many kings"),
    (SetupErrorKinds::TOO_MANY_PIECES, "too many pieces"),
    (SetupErrorKinds::TOO_MANY_PAWNS, "too many pawns"),
    (SetupErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank"),
    (SetupErrorKinds::OPPOSITE_CHECK, "player not to move is in check"),
];

/// Error when trying to create a [`Game`] from an illegal [`Setup`].
#[derive(Clone, Debug)]
pub struct SetupError {
    setup: Setup,
    kinds: SetupErrorKinds,
}

impl SetupError {
    pub fn kinds(&self) -> SetupErrorKinds {
        self.kinds
    }

    /// Gets the rejected setup back.
    pub fn into_setup(self) -> Setup {
        self.setup
    }
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal setup: ")?;
        let mut first = true;
        for (kind, reason) in REASONS {
            if self.kinds.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(reason)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl Error for SetupError {}

#[derive(Default)]
struct Census {
    pieces: usize,
    kings: usize,
    pawns: usize,
}

impl Game {
    /// Validates a [`Setup`] and constructs a game.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] naming every violated rule if the setup is
    /// not a legal position. Each side needs exactly one king, at most 16
    /// pieces and at most 8 pawns, no pawn may stand on row 1 or 8, and
    /// the side not to move may not be in check.
    ///
    /// # Examples
    ///
    /// ```
    /// use chesscore::{Game, Setup, SetupErrorKinds};
    ///
    /// let game = Game::from_setup(Setup::default())?;
    /// assert_eq!(game, Game::new());
    ///
    /// let err = Game::from_setup(Setup::empty()).unwrap_err();
    /// assert_eq!(err.kinds(), SetupErrorKinds::MISSING_KING);
    /// # Ok::<_, chesscore::SetupError>(())
    /// ```
    pub fn from_setup(setup: Setup) -> Result<Game, SetupError> {
        let mut census = ByColor::<Census>::default();
        let mut errors = SetupErrorKinds::empty();

        for (p, piece) in setup.board.pieces() {
            let counts = census.get_mut(piece.color);
            counts.pieces += 1;
            match piece.role {
                Role::King => counts.kings += 1,
                Role::Pawn => {
                    counts.pawns += 1;
                    if p.row() == 1 || p.row() == 8 {
                        errors |= SetupErrorKinds::PAWNS_ON_BACKRANK;
                    }
                }
                _ => (),
            }
        }

        if census.find(|c| c.kings == 0).is_some() {
            errors |= SetupErrorKinds::MISSING_KING;
        }
        if census.find(|c| c.kings > 1).is_some() {
            errors |= SetupErrorKinds::TOO_MANY_KINGS;
        }
        if census.find(|c| c.pieces > 16).is_some() {
            errors |= SetupErrorKinds::TOO_MANY_PIECES;
        }
        if census.find(|c| c.pawns > 8).is_some() {
            errors |= SetupErrorKinds::TOO_MANY_PAWNS;
        }

        let game = Game::from_parts(setup.board, setup.turn);
        if game.is_in_check(!game.turn()) {
            errors |= SetupErrorKinds::OPPOSITE_CHECK;
        }

        if errors.is_empty() {
            Ok(game)
        } else {
            debug!(?errors, "setup rejected");
            Err(SetupError {
                setup: game.into(),
                kinds: errors,
            })
        }
    }
}
