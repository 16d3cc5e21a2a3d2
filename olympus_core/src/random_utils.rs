//! Random-playout plumbing for the fuzz tests and the fuzzer binary.

use rand::{
    Rng, SeedableRng,
    rngs::StdRng,
    seq::{IndexedRandom, IteratorRandom},
};

use crate::{board::Board, gods::GodName, moves::MoveList, player::Player, square::Square};

/// A fresh game: random god pair, four workers thrown onto distinct squares.
pub fn random_start(rng: &mut impl Rng) -> Board {
    let gray_god = *GodName::ALL.choose(rng).expect("god list is non-empty");
    let blue_god = *GodName::ALL.choose(rng).expect("god list is non-empty");

    let spots = (0..Square::COUNT).choose_multiple(rng, 4);
    let workers = [
        Square::from(spots[0]),
        Square::from(spots[1]),
        Square::from(spots[2]),
        Square::from(spots[3]),
    ];

    Board::new(
        [0; Square::COUNT],
        workers,
        Player::Gray,
        [gray_god, blue_god],
        false,
    )
}

/// Plays one uniformly random legal move in place. False when the game is
/// already decided or the mover is stuck.
pub fn random_move(board: &mut Board, rng: &mut impl Rng) -> bool {
    if board.state() != 0 {
        return false;
    }
    let mut moves = MoveList::new();
    board.generate_moves(&mut moves);
    let Some(mv) = moves.choose(rng) else {
        return false;
    };
    let mut mv = mv.clone();
    board.apply(&mut mv);
    true
}

/// Streams boards drawn from random playouts, restarting with a fresh random
/// game whenever one finishes. Seeded, so test runs are repeatable.
pub struct PlayoutFuzzer {
    rng: StdRng,
    board: Board,
    remaining: usize,
}

impl PlayoutFuzzer {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let board = random_start(&mut rng);
        PlayoutFuzzer {
            rng,
            board,
            remaining: count,
        }
    }
}

impl Iterator for PlayoutFuzzer {
    type Item = Board;

    fn next(&mut self) -> Option<Board> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if !random_move(&mut self.board, &mut self.rng) {
            self.board = random_start(&mut self.rng);
        }
        Some(self.board.clone())
    }
}
