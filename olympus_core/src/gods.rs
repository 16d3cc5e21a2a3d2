//! The ten god powers and the dispatch layer over their move routines.
//!
//! Every god module exposes the same four entry points: `generate` (into a
//! caller-provided buffer), `is_valid` (god-specific legality; the board has
//! already checked ownership and the no-climb flag), `apply`, and `undo`.
//! The board routes by `GodName` for generation and by move variant for the
//! rest.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
    board::Board,
    moves::{Move, MoveList},
};

pub(crate) mod apollo;
pub(crate) mod artemis;
pub(crate) mod athena;
pub(crate) mod atlas;
pub(crate) mod demeter;
pub(crate) mod hephaestus;
pub(crate) mod hermes;
pub(crate) mod minotaur;
pub mod move_helpers;
pub(crate) mod pan;
pub(crate) mod prometheus;

/// The discriminants are the god digits of the position string.
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Display,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    PartialOrd,
    Ord,
)]
#[strum(serialize_all = "lowercase")]
pub enum GodName {
    Apollo = 0,
    Artemis = 1,
    Athena = 2,
    Atlas = 3,
    Demeter = 4,
    Hephaestus = 5,
    Hermes = 6,
    Minotaur = 7,
    Pan = 8,
    Prometheus = 9,
}

impl GodName {
    pub const COUNT: usize = 10;

    pub const ALL: [GodName; Self::COUNT] = [
        GodName::Apollo,
        GodName::Artemis,
        GodName::Athena,
        GodName::Atlas,
        GodName::Demeter,
        GodName::Hephaestus,
        GodName::Hermes,
        GodName::Minotaur,
        GodName::Pan,
        GodName::Prometheus,
    ];

    pub fn from_index(index: usize) -> Option<GodName> {
        Self::ALL.get(index).copied()
    }
}

pub(crate) fn generate(board: &Board, moves: &mut MoveList) {
    match board.active_god() {
        GodName::Apollo => apollo::generate(board, moves),
        GodName::Artemis => artemis::generate(board, moves),
        GodName::Athena => athena::generate(board, moves),
        GodName::Atlas => atlas::generate(board, moves),
        GodName::Demeter => demeter::generate(board, moves),
        GodName::Hephaestus => hephaestus::generate(board, moves),
        GodName::Hermes => hermes::generate(board, moves),
        GodName::Minotaur => minotaur::generate(board, moves),
        GodName::Pan => pan::generate(board, moves),
        GodName::Prometheus => prometheus::generate(board, moves),
    }
}

pub(crate) fn is_valid(board: &Board, mv: &Move) -> bool {
    match mv {
        Move::Apollo(m) => apollo::is_valid(board, m),
        Move::Artemis(m) => artemis::is_valid(board, m),
        Move::Athena(m) => athena::is_valid(board, m),
        Move::Atlas(m) => atlas::is_valid(board, m),
        Move::Demeter(m) => demeter::is_valid(board, m),
        Move::Hephaestus(m) => hephaestus::is_valid(board, m),
        Move::Hermes(m) => hermes::is_valid(board, m),
        Move::Minotaur(m) => minotaur::is_valid(board, m),
        Move::Pan(m) => pan::is_valid(board, m),
        Move::Prometheus(m) => prometheus::is_valid(board, m),
    }
}

pub(crate) fn apply(board: &mut Board, mv: &mut Move) {
    match mv {
        Move::Apollo(m) => apollo::apply(board, m),
        Move::Artemis(m) => artemis::apply(board, m),
        Move::Athena(m) => athena::apply(board, m),
        Move::Atlas(m) => atlas::apply(board, m),
        Move::Demeter(m) => demeter::apply(board, m),
        Move::Hephaestus(m) => hephaestus::apply(board, m),
        Move::Hermes(m) => hermes::apply(board, m),
        Move::Minotaur(m) => minotaur::apply(board, m),
        Move::Pan(m) => pan::apply(board, m),
        Move::Prometheus(m) => prometheus::apply(board, m),
    }
}

pub(crate) fn undo(board: &mut Board, mv: &Move) {
    match mv {
        Move::Apollo(m) => apollo::undo(board, m),
        Move::Artemis(m) => artemis::undo(board, m),
        Move::Athena(m) => athena::undo(board, m),
        Move::Atlas(m) => atlas::undo(board, m),
        Move::Demeter(m) => demeter::undo(board, m),
        Move::Hephaestus(m) => hephaestus::undo(board, m),
        Move::Hermes(m) => hermes::undo(board, m),
        Move::Minotaur(m) => minotaur::undo(board, m),
        Move::Pan(m) => pan::undo(board, m),
        Move::Prometheus(m) => prometheus::undo(board, m),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;
    use crate::random_utils::PlayoutFuzzer;

    #[test]
    fn test_god_names_parse_both_ways() {
        for god in GodName::ALL {
            let text = god.to_string();
            assert_eq!(GodName::from_str(&text).unwrap(), god);
        }
        assert_eq!(GodName::from_str("pan").unwrap(), GodName::Pan);
        assert!(GodName::from_str("zeus").is_err());
    }

    #[test]
    fn test_digit_order_is_stable() {
        assert_eq!(GodName::Apollo as u8, 0);
        assert_eq!(GodName::Prometheus as u8, 9);
        for (index, god) in GodName::ALL.iter().enumerate() {
            assert_eq!(GodName::from_index(index), Some(*god));
        }
        assert_eq!(GodName::from_index(10), None);
    }

    #[test]
    fn fuzz_generated_moves_pass_the_validator() {
        let mut moves = MoveList::new();
        for board in PlayoutFuzzer::new(400, 0xA11CE) {
            board.generate_moves(&mut moves);
            for mv in &moves {
                assert!(
                    board.is_legal(mv),
                    "generator emitted illegal move {mv} on {board}"
                );
            }
        }
    }

    #[test]
    fn fuzz_generated_moves_round_trip_as_text() {
        let mut moves = MoveList::new();
        for board in PlayoutFuzzer::new(150, 0xBEEF) {
            board.generate_moves(&mut moves);
            for mv in &moves {
                let text = mv.to_text();
                let reparsed = Move::from_text(mv.god(), &text).unwrap();
                assert_eq!(reparsed.to_text(), text);
                assert!(board.is_legal(&reparsed));
            }
        }
    }
}
