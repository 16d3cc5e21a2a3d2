//! Random-playout consistency harness: for every position visited it applies
//! and unmakes every generated move, cross-checking the incremental hash,
//! the redundant board invariants, and the position-string round trip.

use clap::Parser;
use rand::{RngCore, rng};

use olympus_core::{
    board::Board,
    fen,
    moves::{Move, MoveList},
    random_utils::PlayoutFuzzer,
    zobrist,
};

#[derive(Debug, Parser)]
struct FuzzerArgs {
    /// Number of positions to visit.
    #[arg(short, long, default_value_t = 10_000)]
    positions: usize,

    /// RNG seed; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,
}

fn check_position(board: &Board, moves: &mut MoveList) -> usize {
    if let Some(problem) = board.validation_error() {
        board.print_to_console();
        panic!("Inconsistent position {board}: {problem}");
    }

    let before = board.clone();
    let before_text = fen::position_to_text(board);
    let reparsed = fen::parse_position(&before_text)
        .unwrap_or_else(|e| panic!("Own position text rejected ({e}): {before_text}"));
    assert_eq!(fen::position_to_text(&reparsed), before_text);

    let mut scratch = board.clone();
    scratch.generate_moves(moves);
    for mv in moves.iter() {
        if !scratch.is_legal(mv) {
            panic!("Generator emitted illegal move {mv} on {before_text}");
        }
    }

    let batch: Vec<Move> = moves.clone();
    for mut mv in batch {
        scratch.apply(&mut mv);
        if scratch.hash != zobrist::compute_hash(&scratch) {
            panic!("Hash diverged after {mv} on {before_text}");
        }
        scratch.undo(&mv);
        if scratch != before {
            panic!("Unmake mismatch after {mv} on {before_text}");
        }
    }

    moves.len()
}

fn main() {
    let args = FuzzerArgs::parse();
    let seed = args.seed.unwrap_or_else(|| rng().next_u64());
    eprintln!("fuzzing {} positions with seed {seed:#x}", args.positions);

    let mut moves = MoveList::new();
    let mut total_moves = 0usize;
    for (index, board) in PlayoutFuzzer::new(args.positions, seed).enumerate() {
        total_moves += check_position(&board, &mut moves);
        if (index + 1) % 1000 == 0 {
            eprintln!("{} positions, {} moves round-tripped", index + 1, total_moves);
        }
    }
    eprintln!(
        "done: {} positions, {} moves round-tripped",
        args.positions, total_moves
    );
}

// cargo run -p olympus_core --bin fuzzer -r
// cargo run -p olympus_core --bin fuzzer -r -- --positions 100000 --seed 7
