//! Iterative-deepening negamax with alpha-beta, a quiescence extension for
//! climbs and Pan drops, and cooperative wall-clock cancellation.
//!
//! Cancellation is a flag: the clock is read every `CHECK_INTERVAL` negamax
//! nodes (and once per quiescence node before its children). Once the flag
//! is up every frame returns 0 immediately after its pending undo, so the
//! board always comes back to the root state.

use std::time::{Duration, Instant};

use crate::{
    board::Board,
    eval,
    gods::GodName,
    moves::{Move, MoveList},
    square::DOUBLE_NEIGHBORS,
    transposition_table::{Bound, TranspositionTable},
};

pub const MATE: i32 = 10_000;
const CHECK_INTERVAL: u64 = 4096;
const MAX_DEPTH: u32 = 64;

pub struct SearchContext {
    pub nodes: u64,
    deadline: Instant,
    pub aborted: bool,
    root_move: Option<Move>,
}

struct ScoredMove {
    score: i32,
    mv: Move,
}

/// Climb delta dominates; centrality of the landing square breaks ties.
fn order_score(board: &Board, mv: &Move) -> i32 {
    let from = mv.from_sq();
    let to = mv.final_sq();
    let climb = board.height(to) as i32 - board.height(from) as i32;
    climb * 10 + DOUBLE_NEIGHBORS[to as usize] - DOUBLE_NEIGHBORS[from as usize]
}

/// Selection sort step: swap the best remaining move to the front.
fn pick_move(moves: &mut [ScoredMove], start: usize) {
    let mut best = start;
    for i in start + 1..moves.len() {
        if moves[i].score > moves[best].score {
            best = i;
        }
    }
    if best != start {
        moves.swap(start, best);
    }
}

fn terminal_score(board: &Board, state: i32, ply: i32) -> i32 {
    if state == board.current_player.color() {
        MATE - ply
    } else {
        -MATE + ply
    }
}

fn negamax(
    board: &mut Board,
    ctx: &mut SearchContext,
    tt: &mut TranspositionTable,
    depth: u32,
    ply: i32,
    mut alpha: i32,
    beta: i32,
) -> i32 {
    ctx.nodes += 1;
    if ctx.nodes % CHECK_INTERVAL == 0 && Instant::now() > ctx.deadline {
        ctx.aborted = true;
        return 0;
    }

    let state = board.state();
    if state != 0 {
        return terminal_score(board, state, ply);
    }

    if depth == 0 {
        return quiescence(board, ctx, ply, alpha, beta);
    }

    if let Some(score) = tt.probe(board.hash, alpha, beta, depth as u8) {
        return score;
    }

    let mut buffer = MoveList::new();
    board.generate_moves(&mut buffer);
    if buffer.is_empty() {
        return -MATE + ply;
    }

    let mut moves: Vec<ScoredMove> = buffer
        .into_iter()
        .map(|mv| ScoredMove {
            score: order_score(board, &mv),
            mv,
        })
        .collect();

    let alpha_orig = alpha;
    let mut best_score = -MATE * 100;
    let mut best_move: Option<Move> = None;

    for i in 0..moves.len() {
        pick_move(&mut moves, i);
        let mut mv = moves[i].mv.clone();

        board.apply(&mut mv);
        let score = -negamax(board, ctx, tt, depth - 1, ply + 1, -beta, -alpha);
        board.undo(&mv);

        if ctx.aborted {
            return 0;
        }

        if score > best_score {
            best_score = score;
            if ply == 0 {
                ctx.root_move = Some(mv.clone());
            }
            if score > alpha {
                if score >= beta {
                    tt.store(board.hash, mv, beta, depth as u8, Bound::Lower);
                    return beta;
                }
                alpha = score;
            }
            best_move = Some(mv);
        }
    }

    if let Some(best) = best_move {
        let bound = if alpha != alpha_orig {
            Bound::Exact
        } else {
            Bound::Upper
        };
        tt.store(board.hash, best, alpha, depth as u8, bound);
    }

    alpha
}

/// Tactical extension: stand pat on the static score, then look only at
/// climbs and Pan drops. No table traffic down here.
fn quiescence(board: &mut Board, ctx: &mut SearchContext, ply: i32, mut alpha: i32, beta: i32) -> i32 {
    let state = board.state();
    if state != 0 {
        return terminal_score(board, state, ply);
    }

    let stand_pat = eval::score_position(board) * board.current_player.color();
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    let mut moves = MoveList::new();
    board.generate_moves(&mut moves);

    if Instant::now() > ctx.deadline {
        ctx.aborted = true;
        return 0;
    }

    let pan_to_move = board.active_god() == GodName::Pan;
    for mut mv in moves {
        let climb = board.height(mv.final_sq()) as i32 - board.height(mv.from_sq()) as i32;
        if climb <= 0 && !(pan_to_move && climb <= -2) {
            continue;
        }

        board.apply(&mut mv);
        let score = -quiescence(board, ctx, ply + 1, -beta, -alpha);
        board.undo(&mv);

        if ctx.aborted {
            return 0;
        }
        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

/// Iterative deepening under a tenth of the remaining clock. Returns the
/// best move from the deepest completed iteration, or what the aborted
/// iteration had when nothing finished.
pub fn best_move(
    board: &mut Board,
    remaining_time_ms: u64,
    tt: &mut TranspositionTable,
) -> Option<Move> {
    let deadline = Instant::now() + Duration::from_millis(remaining_time_ms / 10);
    let mut best: Option<Move> = None;

    for depth in 1..=MAX_DEPTH {
        let mut ctx = SearchContext {
            nodes: 0,
            deadline,
            aborted: false,
            root_move: None,
        };

        let score = negamax(board, &mut ctx, tt, depth, 0, -MATE, MATE);

        if ctx.aborted {
            if best.is_none() {
                best = ctx.root_move;
            }
            break;
        }

        // Prefer the table's move for this position; the root iteration may
        // have been answered straight from the table.
        if let Some((mv, _)) = tt.probe_pv(board.hash) {
            best = Some(mv.clone());
        } else if ctx.root_move.is_some() {
            best = ctx.root_move;
        }

        if score.abs() > MATE - 100 {
            break;
        }
        if Instant::now() > deadline {
            break;
        }
    }

    best
}
