//! Leaf-count benchmark over generate/apply/undo, one run per god pair.

use std::time::Instant;

use olympus_core::{board::Board, gods::GodName, moves::MoveList};

const DEPTH: u32 = 2;

fn main() {
    for god in GodName::ALL {
        let mut board = Board::new_basic_state(god, god);

        let now = Instant::now();
        let leaves = perft(&mut board, DEPTH);
        let duration = now.elapsed();
        let per_sec = leaves as f32 / duration.as_secs_f32();
        println!(
            "{god:<12} depth {DEPTH}: {leaves} leaves in {:.4}s ({per_sec:.0}/s)",
            duration.as_secs_f32()
        );
    }
}

fn perft(board: &mut Board, depth: u32) -> usize {
    if depth == 0 {
        return 1;
    }
    if board.state() != 0 {
        return 0;
    }

    let mut moves = MoveList::new();
    board.generate_moves(&mut moves);

    let mut sum = 0;
    for mut mv in moves {
        board.apply(&mut mv);
        sum += perft(board, depth - 1);
        board.undo(&mv);
    }
    sum
}

// cargo run -p olympus_core --bin perft --release
