//! Opponent move selection.
//!
//! Advisory heuristic: rank usable attacking moves by expected payoff with a
//! little noise, and occasionally pick at random so the opponent stays
//! unpredictable. Never touches the remaining-uses table; consuming a use is
//! the resolver's job.

use crate::battle::PpTable;
use crate::damage::stab_bonus;
use crate::model::{Combatant, Move};
use crate::types::type_effectiveness;
use rand::rngs::SmallRng;
use rand::Rng;

const EXPLORATION_CHANCE: f32 = 0.2;

/// Picks the move the opponent will use this turn.
///
/// Candidates are moves with uses remaining and power above zero; with none
/// left the fixed Struggle fallback is returned as-is. Each candidate scores
/// `power x effectiveness x STAB x jitter` with jitter uniform in [0.8, 1.2);
/// the top score wins 80% of the time, a uniformly random candidate otherwise.
pub fn select_move(
    chooser: &Combatant,
    opponent: &Combatant,
    pp: &PpTable,
    rng: &mut SmallRng,
) -> Move {
    let candidates: Vec<&Move> = chooser
        .moves
        .iter()
        .filter(|mv| pp.remaining(mv.id) > 0 && mv.power > 0)
        .collect();
    if candidates.is_empty() {
        return Move::struggle();
    }

    let mut scored: Vec<(f32, &Move)> = candidates
        .iter()
        .map(|mv| {
            let effectiveness = type_effectiveness(&mv.move_type, &opponent.types);
            let stab = stab_bonus(&mv.move_type, &chooser.types);
            let jitter = 0.8 + rng.gen::<f32>() * 0.4;
            (mv.power as f32 * effectiveness * stab * jitter, *mv)
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    if rng.gen::<f32>() < EXPLORATION_CHANCE {
        candidates[rng.gen_range(0..candidates.len())].clone()
    } else {
        scored[0].1.clone()
    }
}
