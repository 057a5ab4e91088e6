use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Move id reserved for the fallback move; never appears in a catalog record.
pub const STRUGGLE_ID: i32 = -1;

fn default_accuracy() -> u32 {
    100
}

fn default_pp() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Move {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub power: u32,
    // Carried from the catalog record; the resolver treats every damaging
    // move as a sure hit.
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,
    #[serde(default = "default_pp", rename = "pp")]
    pub base_pp: u32,
    pub category: MoveCategory,
}

impl Move {
    /// The always-available fallback used when a side has no remaining uses.
    pub fn struggle() -> Move {
        Move {
            id: STRUGGLE_ID,
            name: "Struggle".to_string(),
            move_type: "normal".to_string(),
            power: 40,
            accuracy: 100,
            base_pp: 1,
            category: MoveCategory::Physical,
        }
    }

    pub fn is_struggle(&self) -> bool {
        self.id == STRUGGLE_ID
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub hp: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Combatant {
    pub id: u32,
    pub name: String,
    pub types: Vec<String>,
    pub stats: Stats,
    #[serde(default)]
    pub moves: Vec<Move>,
}

impl Combatant {
    /// Derived once per battle; base HP doubled.
    pub fn max_hp(&self) -> u32 {
        self.stats.hp * 2
    }

    /// Checks the shape constraints a catalog record must satisfy before a
    /// battle may be built from it.
    pub fn validate(&self) -> Result<()> {
        if self.types.is_empty() || self.types.len() > 2 {
            bail!(
                "'{}' must have 1 or 2 types, got {}",
                self.name,
                self.types.len()
            );
        }
        if self.moves.len() > 4 {
            bail!(
                "'{}' must have at most 4 moves, got {}",
                self.name,
                self.moves.len()
            );
        }
        for (idx, mv) in self.moves.iter().enumerate() {
            if mv.id == STRUGGLE_ID {
                bail!("'{}' uses the reserved move id {}", mv.name, STRUGGLE_ID);
            }
            if self.moves[..idx].iter().any(|other| other.id == mv.id) {
                bail!("'{}' has duplicate move id {}", self.name, mv.id);
            }
        }
        Ok(())
    }
}
