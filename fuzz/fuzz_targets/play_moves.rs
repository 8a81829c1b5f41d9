#![no_main]

use arbitrary::Arbitrary;
use chesscore::{Game, Move};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    moves: Vec<Move>,
}

fuzz_target!(|data: Data| {
    let mut game = Game::default();

    for m in data.moves {
        let before = game.clone();
        let legal = game.legal_moves().any(|l| l == m);

        match game.make_move(m) {
            Ok(()) => {
                assert!(legal, "{m} accepted but not generated");
                assert_eq!(game.turn(), !before.turn());
            }
            Err(_) => {
                assert!(!legal, "{m} generated but rejected");
                assert_eq!(game, before);
            }
        }

        if game.status().is_terminal() {
            break;
        }
    }
});
