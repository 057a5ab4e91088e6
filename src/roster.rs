//! Local creature catalog.
//!
//! The battle engine only needs resolved records; this module is the
//! file-backed stand-in for whatever catalog service supplies them.

use crate::model::Combatant;
use anyhow::{bail, Context, Result};
use rand::rngs::SmallRng;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RosterFile {
    creatures: Vec<Combatant>,
}

#[derive(Debug, Clone)]
pub struct Roster {
    creatures: Vec<Combatant>,
}

/// Reads and validates a roster file. Every record must pass the combatant
/// shape checks before the roster is usable.
pub fn load_roster(path: &Path) -> Result<Roster> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
    let parsed: RosterFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    if parsed.creatures.is_empty() {
        bail!("Roster at {} contains no creatures", path.display());
    }
    for creature in &parsed.creatures {
        creature
            .validate()
            .with_context(|| format!("Invalid record in {}", path.display()))?;
    }
    Ok(Roster {
        creatures: parsed.creatures,
    })
}

impl Roster {
    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    pub fn creatures(&self) -> &[Combatant] {
        &self.creatures
    }

    pub fn by_id(&self, id: u32) -> Option<&Combatant> {
        self.creatures.iter().find(|c| c.id == id)
    }

    /// Name lookup the way a search box behaves: trimmed, case-insensitive.
    pub fn by_name(&self, name: &str) -> Option<&Combatant> {
        let needle = name.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.creatures
            .iter()
            .find(|c| c.name.to_ascii_lowercase() == needle)
    }

    pub fn random_pick(&self, rng: &mut SmallRng) -> &Combatant {
        &self.creatures[rng.gen_range(0..self.creatures.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Move, MoveCategory, Stats};
    use rand::SeedableRng;

    fn creature(id: u32, name: &str) -> Combatant {
        Combatant {
            id,
            name: name.to_string(),
            types: vec!["normal".to_string()],
            stats: Stats {
                hp: 50,
                attack: 50,
                defense: 50,
                special_attack: 50,
                special_defense: 50,
                speed: 50,
            },
            moves: vec![Move {
                id: 1,
                name: "Tackle".to_string(),
                move_type: "normal".to_string(),
                power: 40,
                accuracy: 100,
                base_pp: 35,
                category: MoveCategory::Physical,
            }],
        }
    }

    fn roster() -> Roster {
        Roster {
            creatures: vec![creature(1, "bulbasaur"), creature(25, "Pikachu")],
        }
    }

    #[test]
    fn lookup_by_id() {
        let roster = roster();
        assert_eq!(roster.by_id(25).map(|c| c.name.as_str()), Some("Pikachu"));
        assert!(roster.by_id(151).is_none());
    }

    #[test]
    fn name_lookup_is_trimmed_and_case_insensitive() {
        let roster = roster();
        assert!(roster.by_name("  PIKACHU ").is_some());
        assert!(roster.by_name("pikachu").is_some());
        assert!(roster.by_name("mewtwo").is_none());
        assert!(roster.by_name("   ").is_none());
    }

    #[test]
    fn random_pick_stays_in_roster() {
        let roster = roster();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            let picked = roster.random_pick(&mut rng);
            assert!(roster.by_id(picked.id).is_some());
        }
    }
}
