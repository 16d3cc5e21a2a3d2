//! The mutable game state and the make/unmake protocol.
//!
//! Mutation goes through `apply` and `undo` only, which form an exact
//! inverse pair: heights, worker slots, side to move, the no-climb flag,
//! the Pan drop signal, the win signal, and the Zobrist hash all round-trip
//! bit-for-bit. Every height or worker mutation funnels through the private
//! hash-maintaining helpers.

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::{
    fen,
    gods::{self, GodName, move_helpers::push_square},
    moves::{Move, MoveList},
    player::Player,
    square::{NEIGHBORS, Square},
    zobrist::{self, KEYS},
};

pub const NUM_SQUARES: usize = Square::COUNT;

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pub blocks: [u8; NUM_SQUARES],
    /// Slots 0,1 are Gray's workers, slots 2,3 Blue's.
    pub workers: [Square; 4],
    pub current_player: Player,
    pub gods: [GodName; 2],
    /// The side to move may not climb this turn.
    pub athena_flag: bool,
    /// Height change of the last move, recorded for Pan only.
    pub last_height_diff: i8,
    /// The last move put its worker on a level-3 tower.
    pub won: bool,
    pub hash: u64,
}

impl Board {
    pub fn new(
        blocks: [u8; NUM_SQUARES],
        workers: [Square; 4],
        current_player: Player,
        gods: [GodName; 2],
        athena_flag: bool,
    ) -> Self {
        let mut board = Board {
            blocks,
            workers,
            current_player,
            gods,
            athena_flag,
            last_height_diff: 0,
            won: false,
            hash: 0,
        };
        board.hash = zobrist::compute_hash(&board);
        board
    }

    /// The customary opening formation: Gray on c2/c4, Blue on b3/d3.
    pub fn new_basic_state(gray_god: GodName, blue_god: GodName) -> Self {
        Board::new(
            [0; NUM_SQUARES],
            [Square::C2, Square::C4, Square::B3, Square::D3],
            Player::Gray,
            [gray_god, blue_god],
            false,
        )
    }

    pub fn height(&self, square: Square) -> u8 {
        self.blocks[square as usize]
    }

    pub fn worker_at(&self, square: Square) -> Option<usize> {
        self.workers.iter().position(|&w| w == square)
    }

    /// Neither domed nor occupied.
    pub fn is_free(&self, square: Square) -> bool {
        self.blocks[square as usize] < 4 && self.worker_at(square).is_none()
    }

    pub fn god_of(&self, player: Player) -> GodName {
        self.gods[player as usize]
    }

    pub fn active_god(&self) -> GodName {
        self.god_of(self.current_player)
    }

    // ------------------------------------------------------------------
    // Hash-maintaining mutators. The hash holds one key per occupied
    // square/color pair and the key of each square's current height.
    // ------------------------------------------------------------------

    pub(crate) fn add_block(&mut self, square: Square) {
        let index = square as usize;
        let height = self.blocks[index] as usize;
        debug_assert!(height < 4, "build on a dome at {square}");
        if height >= 1 {
            self.hash ^= KEYS.blocks[index][height - 1];
        }
        self.blocks[index] += 1;
        self.hash ^= KEYS.blocks[index][height];
    }

    pub(crate) fn remove_block(&mut self, square: Square) {
        let index = square as usize;
        let height = self.blocks[index] as usize;
        debug_assert!(height >= 1, "remove from an empty square at {square}");
        self.hash ^= KEYS.blocks[index][height - 1];
        self.blocks[index] -= 1;
        if height >= 2 {
            self.hash ^= KEYS.blocks[index][height - 2];
        }
    }

    pub(crate) fn set_dome(&mut self, square: Square) {
        let index = square as usize;
        let height = self.blocks[index] as usize;
        debug_assert!(height < 4, "dome on a dome at {square}");
        if height >= 1 {
            self.hash ^= KEYS.blocks[index][height - 1];
        }
        self.blocks[index] = 4;
        self.hash ^= KEYS.blocks[index][3];
    }

    pub(crate) fn clear_dome(&mut self, square: Square, prior_height: u8) {
        let index = square as usize;
        debug_assert!(self.blocks[index] == 4, "no dome to clear at {square}");
        self.hash ^= KEYS.blocks[index][3];
        self.blocks[index] = prior_height;
        if prior_height >= 1 {
            self.hash ^= KEYS.blocks[index][prior_height as usize - 1];
        }
    }

    pub(crate) fn move_worker(&mut self, slot: usize, to: Square) {
        let color = Player::owner_of_slot(slot) as usize;
        let from = self.workers[slot];
        self.hash ^= KEYS.workers[from as usize][color];
        self.hash ^= KEYS.workers[to as usize][color];
        self.workers[slot] = to;
    }

    fn set_athena_flag(&mut self, value: bool) {
        if self.athena_flag != value {
            self.hash ^= KEYS.athena;
            self.athena_flag = value;
        }
    }

    fn flip_player(&mut self) {
        self.hash ^= KEYS.turn;
        self.current_player = !self.current_player;
    }

    // ------------------------------------------------------------------
    // The make/unmake protocol.
    // ------------------------------------------------------------------

    /// Plays a legal move. The move records everything undo needs.
    pub fn apply(&mut self, mv: &mut Move) {
        debug_assert!(self.is_legal(mv), "illegal move {} applied to {}", mv, self);

        mv.stamp(self.athena_flag, self.last_height_diff);

        let from_h = self.height(mv.from_sq());
        let final_h = self.height(mv.final_sq());
        self.won = from_h < 3 && final_h == 3;
        self.last_height_diff = 0;

        let god = self.active_god();
        gods::apply(self, mv);

        if god == GodName::Pan {
            self.last_height_diff = final_h as i8 - from_h as i8;
        }
        self.set_athena_flag(god == GodName::Athena && final_h > from_h);
        self.flip_player();
    }

    /// Exactly reverses `apply`.
    pub fn undo(&mut self, mv: &Move) {
        self.flip_player();
        self.set_athena_flag(mv.athena_flag_before());
        self.won = false;
        gods::undo(self, mv);
        self.last_height_diff = mv.height_diff_before();
    }

    /// Full legality: the move must belong to the active god, start on an
    /// own worker, respect the no-climb flag, and pass the god's own rules.
    pub fn is_legal(&self, mv: &Move) -> bool {
        if mv.god() != self.active_god() {
            return false;
        }
        match self.worker_at(mv.from_sq()) {
            Some(slot) if Player::owner_of_slot(slot) == self.current_player => {}
            _ => return false,
        }
        if self.athena_flag && self.height(mv.final_sq()) > self.height(mv.from_sq()) {
            return false;
        }
        gods::is_valid(self, mv)
    }

    /// Writes every legal move into `moves`, stamped with the current
    /// transient state so each can be unmade on its own.
    pub fn generate_moves(&self, moves: &mut MoveList) {
        moves.clear();
        gods::generate(self, moves);
        for mv in moves.iter_mut() {
            mv.stamp(self.athena_flag, self.last_height_diff);
        }
    }

    /// Gray win (+1), Blue win (-1), or ongoing (0).
    pub fn state(&self) -> i32 {
        let last_mover = !self.current_player;
        if self.won {
            return last_mover.color();
        }
        if self.last_height_diff <= -2 && self.god_of(last_mover) == GodName::Pan {
            return last_mover.color();
        }
        if !self.has_any_move() {
            return last_mover.color();
        }
        0
    }

    /// Whether the side to move has any legal move at all. Mirrors the
    /// generators without materializing builds: a free landing square always
    /// leaves a build (the vacated from-square at worst), so movement is the
    /// only thing that needs checking.
    pub fn has_any_move(&self) -> bool {
        let god = self.active_god();
        for slot in self.current_player.worker_slots() {
            let from = self.workers[slot];
            let from_h = self.blocks[from as usize] as i8;
            for &n in NEIGHBORS[from as usize] {
                let n_h = self.blocks[n as usize] as i8;
                if n_h == 4 {
                    continue;
                }
                // Hermes can always fall back to staying put.
                if god == GodName::Hermes {
                    return true;
                }
                if n_h - from_h > 1 {
                    continue;
                }
                if self.athena_flag && n_h - from_h == 1 {
                    continue;
                }
                match self.worker_at(n) {
                    None => return true,
                    Some(occupant) => {
                        if Player::owner_of_slot(occupant) == self.current_player {
                            continue;
                        }
                        match god {
                            GodName::Apollo => {
                                // After the swap the from-square is taken, so
                                // some other free square must host the build.
                                if NEIGHBORS[n as usize]
                                    .iter()
                                    .any(|&b| b != from && self.is_free(b))
                                {
                                    return true;
                                }
                            }
                            GodName::Minotaur => {
                                if let Some(shove) = push_square(from, n) {
                                    if self.is_free(shove) {
                                        return true;
                                    }
                                }
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
        false
    }

    /// Checks the redundant invariants; used by the fuzzing harness.
    pub fn validation_error(&self) -> Option<String> {
        for (slot, &square) in self.workers.iter().enumerate() {
            if self.blocks[square as usize] == 4 {
                return Some(format!("worker {slot} stands on a dome at {square}"));
            }
            for (other_slot, &other) in self.workers.iter().enumerate().skip(slot + 1) {
                if square == other {
                    return Some(format!("workers {slot} and {other_slot} share {square}"));
                }
            }
        }
        for (index, &height) in self.blocks.iter().enumerate() {
            if height > 4 {
                return Some(format!(
                    "height {height} out of range on {}",
                    Square::from(index)
                ));
            }
        }
        if self.hash != zobrist::compute_hash(self) {
            return Some("incremental hash diverged from recompute".to_string());
        }
        None
    }

    pub fn print_to_console(&self) {
        eprintln!("{}", self);
        for row in (0..5).rev() {
            let mut row_str = format!("{}", row + 1);
            for col in 0..5 {
                let square = Square::from((row * 5 + col) as usize);
                let height = self.height(square);

                let cell = match self.worker_at(square) {
                    Some(slot) if Player::owner_of_slot(slot) == Player::Gray => "G",
                    Some(_) => "B",
                    None => " ",
                }
                .black();

                let colored_cell = match height {
                    0 => cell.on_white(),
                    1 => cell.on_yellow(),
                    2 => cell.on_blue(),
                    3 => cell.on_green(),
                    4 => cell.on_black(),
                    _ => panic!("Invalid height: {height}"),
                };
                row_str = format!("{row_str}{colored_cell}");
            }
            eprintln!("{row_str}");
        }
        eprintln!(" abcde");
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", fen::position_to_text(self))
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl TryFrom<&str> for Board {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        fen::parse_position(s)
    }
}

impl TryFrom<&String> for Board {
    type Error = String;

    fn try_from(s: &String) -> Result<Self, Self::Error> {
        fen::parse_position(s)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&fen::position_to_text(self))
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let position: String = Deserialize::deserialize(deserializer)?;
        fen::parse_position(&position).map_err(serde::de::Error::custom)
    }
}
