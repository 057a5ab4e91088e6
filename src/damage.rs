//! Damage resolution for a single attack.
//!
//! A fixed-level formula: every combatant fights at level 50, and a damaging
//! move always lands. The only randomness is the critical-hit roll and the
//! final damage jitter, both drawn from the caller's RNG.

use crate::model::{Combatant, Move, MoveCategory};
use crate::types::type_effectiveness;
use rand::rngs::SmallRng;
use rand::Rng;

const CRIT_CHANCE: f32 = 1.0 / 16.0;
const CRIT_MULTIPLIER: f32 = 1.5;
const STAB_MULTIPLIER: f32 = 1.5;

/// Outcome of one resolved attack.
#[derive(Clone, Copy, Debug)]
pub struct AttackOutcome {
    pub damage: u32,
    pub effectiveness: f32,
    pub critical: bool,
}

/// x1.5 when the move type matches one of the attacker's own types.
pub fn stab_bonus(move_type: &str, attacker_types: &[String]) -> f32 {
    if attacker_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(move_type))
    {
        STAB_MULTIPLIER
    } else {
        1.0
    }
}

/// Resolves `mv` from `attacker` against `defender`.
///
/// Status moves (power 0) deal no damage and draw nothing from the RNG.
/// Otherwise the damage goes through four floored multiplicative steps (base,
/// STAB, effectiveness, critical) followed by the 85-100% jitter, and is
/// clamped to at least 1 unless the defender is immune, in which case it is
/// exactly 0.
pub fn calculate_damage(
    mv: &Move,
    attacker: &Combatant,
    defender: &Combatant,
    rng: &mut SmallRng,
) -> AttackOutcome {
    if mv.power == 0 {
        return AttackOutcome {
            damage: 0,
            effectiveness: 1.0,
            critical: false,
        };
    }

    let (attack_stat, defense_stat) = match mv.category {
        MoveCategory::Physical => (attacker.stats.attack, defender.stats.defense),
        MoveCategory::Special | MoveCategory::Status => (
            attacker.stats.special_attack,
            defender.stats.special_defense,
        ),
    };

    let mut damage = (((2.0 * 50.0 + 10.0) / 250.0)
        * (attack_stat as f32 / defense_stat as f32)
        * mv.power as f32
        + 2.0)
        .floor();

    let stab = stab_bonus(&mv.move_type, &attacker.types);
    damage = (damage * stab).floor();

    let effectiveness = type_effectiveness(&mv.move_type, &defender.types);
    damage = (damage * effectiveness).floor();

    let critical = rng.gen::<f32>() < CRIT_CHANCE;
    let crit_multiplier = if critical { CRIT_MULTIPLIER } else { 1.0 };
    damage = (damage * crit_multiplier).floor();

    let jitter = 0.85 + rng.gen::<f32>() * 0.15;
    damage = (damage * jitter).floor();

    let floor = if effectiveness > 0.0 { 1.0 } else { 0.0 };
    AttackOutcome {
        damage: damage.max(floor) as u32,
        effectiveness,
        critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Stats, STRUGGLE_ID};
    use rand::SeedableRng;

    fn make_move(move_type: &str, category: MoveCategory, power: u32) -> Move {
        Move {
            id: 1,
            name: "Test Move".to_string(),
            move_type: move_type.to_string(),
            power,
            accuracy: 100,
            base_pp: 10,
            category,
        }
    }

    fn make_mon(types: &[&str], attack: u32, defense: u32) -> Combatant {
        Combatant {
            id: 1,
            name: "Testmon".to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            stats: Stats {
                hp: 50,
                attack,
                defense,
                special_attack: attack,
                special_defense: defense,
                speed: 50,
            },
            moves: Vec::new(),
        }
    }

    #[test]
    fn status_moves_never_deal_damage() {
        let growl = make_move("normal", MoveCategory::Status, 0);
        let attacker = make_mon(&["normal"], 200, 50);
        let defender = make_mon(&["normal"], 50, 50);
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = calculate_damage(&growl, &attacker, &defender, &mut rng);
            assert_eq!(outcome.damage, 0);
            assert_eq!(outcome.effectiveness, 1.0);
            assert!(!outcome.critical);
        }
    }

    #[test]
    fn immune_defender_takes_exactly_zero() {
        let thunderbolt = make_move("electric", MoveCategory::Special, 90);
        let attacker = make_mon(&["electric"], 300, 50);
        let defender = make_mon(&["ground"], 50, 50);
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = calculate_damage(&thunderbolt, &attacker, &defender, &mut rng);
            assert_eq!(outcome.damage, 0);
            assert_eq!(outcome.effectiveness, 0.0);
        }
    }

    #[test]
    fn weak_hits_still_deal_at_least_one() {
        let gust = make_move("flying", MoveCategory::Physical, 5);
        let attacker = make_mon(&["normal"], 1, 50);
        let defender = make_mon(&["steel"], 50, 250);
        for seed in 0..32 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = calculate_damage(&gust, &attacker, &defender, &mut rng);
            assert!(outcome.damage >= 1);
        }
    }

    #[test]
    fn stab_raises_damage_under_identical_draws() {
        let strike = make_move("fire", MoveCategory::Physical, 120);
        let with_stab = make_mon(&["fire"], 120, 80);
        let without_stab = make_mon(&["water"], 120, 80);
        let defender = make_mon(&["normal"], 80, 80);
        for seed in 0..16 {
            let mut rng_a = SmallRng::seed_from_u64(seed);
            let mut rng_b = SmallRng::seed_from_u64(seed);
            let boosted = calculate_damage(&strike, &with_stab, &defender, &mut rng_a);
            let plain = calculate_damage(&strike, &without_stab, &defender, &mut rng_b);
            assert!(boosted.damage > plain.damage);
        }
    }

    #[test]
    fn neutral_stab_hit_lands_in_formula_range() {
        // attack == defense: base = floor(0.84 * 40 + 2) = 35, STAB -> 52.
        // Jitter bounds 44..=52, critical stretches the top to 78.
        let tackle = make_move("normal", MoveCategory::Physical, 40);
        let attacker = make_mon(&["normal"], 100, 100);
        let defender = make_mon(&["water"], 100, 100);
        for seed in 0..64 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = calculate_damage(&tackle, &attacker, &defender, &mut rng);
            if outcome.critical {
                assert!((66..=78).contains(&outcome.damage), "crit {}", outcome.damage);
            } else {
                assert!((44..=52).contains(&outcome.damage), "hit {}", outcome.damage);
            }
            assert_eq!(outcome.effectiveness, 1.0);
        }
    }

    #[test]
    fn struggle_is_a_plain_physical_forty() {
        let struggle = Move::struggle();
        assert_eq!(struggle.id, STRUGGLE_ID);
        assert_eq!(struggle.power, 40);
        assert_eq!(struggle.category, MoveCategory::Physical);
        let attacker = make_mon(&["water"], 100, 100);
        let defender = make_mon(&["ghost"], 100, 100);
        let mut rng = SmallRng::seed_from_u64(3);
        // Normal into ghost: the fallback can whiff entirely.
        let outcome = calculate_damage(&struggle, &attacker, &defender, &mut rng);
        assert_eq!(outcome.damage, 0);
    }
}
