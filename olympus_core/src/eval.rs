//! Static evaluation, always from Gray's perspective. The search multiplies
//! by the side-to-move sign.
//!
//! Three terms per worker: board centrality, raw height, and "support" --
//! free neighbouring squares the worker could keep climbing onto. A worker
//! at height 2 next to a free level-3 square is most of a won game, which is
//! why the one-up support weights dwarf the rest.

use crate::{
    board::Board,
    square::{NEIGHBORS, Square},
};

#[rustfmt::skip]
const POSITION_SCORE: [i32; Square::COUNT] = [
    -50, -30, -10, -30, -50,
    -30,  10,  30,  10, -30,
    -10,  30,  50,  30,  10,
    -30,  10,  30,  10, -30,
    -50, -30, -10, -30, -50,
];

const HEIGHT_SCORE: [i32; 4] = [0, 100, 400, 350];

const SAME_HEIGHT_SUPPORT: [i32; 3] = [-30, 0, 55];
const NEXT_HEIGHT_SUPPORT: [i32; 3] = [0, 35, 120];

pub fn score_position(board: &Board) -> i32 {
    score_worker(board, 0) + score_worker(board, 1) - score_worker(board, 2) - score_worker(board, 3)
}

fn score_worker(board: &Board, slot: usize) -> i32 {
    let square = board.workers[slot];
    let height = board.height(square) as usize;

    let mut score = POSITION_SCORE[square as usize] + HEIGHT_SCORE[height.min(3)];

    if height > 0 {
        let mut same_height = 0usize;
        let mut next_height = 0usize;
        for &n in NEIGHBORS[square as usize] {
            if !board.is_free(n) {
                continue;
            }
            let n_height = board.height(n) as usize;
            if n_height == height {
                same_height += 1;
            } else if n_height == height + 1 {
                next_height += 1;
            }
        }
        score += SAME_HEIGHT_SUPPORT[same_height.min(2)] + NEXT_HEIGHT_SUPPORT[next_height.min(2)];
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gods::GodName;
    use crate::test_utils::make_board;

    #[test]
    fn test_centrality_on_a_flat_board() {
        // Gray holds the center and a corner (+50 - 50), Blue two corners
        // (-50 - 50). No heights, so positional terms are everything.
        let board = make_board(
            &[0u8; 25],
            (12, 0),
            (24, 4),
            1,
            GodName::Apollo,
            GodName::Apollo,
        );
        assert_eq!(score_position(&board), 100);
    }

    #[test]
    fn test_height_dominates_centrality() {
        let mut blocks = [0u8; 25];
        blocks[0] = 2;
        let board = make_board(
            &blocks,
            (0, 24),
            (20, 4),
            1,
            GodName::Apollo,
            GodName::Apollo,
        );
        // Gray: corner on height 2 (-50 + 400, no supporting squares nearby)
        // plus a bare corner (-50); Blue: two bare corners (-100).
        // Support: a1's free neighbours are all at height 0, two levels
        // down, so neither support table fires.
        assert_eq!(score_position(&board), -50 + 400 - 30 - 50 + 100);
    }

    #[test]
    fn test_mirrored_positions_cancel() {
        // The same shape for both sides on mirrored squares nets to zero.
        let board = make_board(
            &[0u8; 25],
            (0, 1),
            (24, 23),
            1,
            GodName::Apollo,
            GodName::Apollo,
        );
        assert_eq!(score_position(&board), 0);
    }
}
