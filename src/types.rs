//! Type-vs-type effectiveness chart.
//!
//! A deliberately simplified chart: attacking types missing from the table are
//! neutral against everything, and a defending type a row does not mention
//! contributes x1. Dual-typed defenders apply both factors independently.

use phf::phf_map;

pub struct Matchups {
    strengths: &'static [&'static str],
    weaknesses: &'static [&'static str],
}

static TYPE_CHART: phf::Map<&'static str, Matchups> = phf_map! {
    "normal" => Matchups {
        strengths: &[],
        weaknesses: &["rock", "steel"],
    },
    "fire" => Matchups {
        strengths: &["grass", "ice", "bug", "steel"],
        weaknesses: &["fire", "water", "rock", "dragon"],
    },
    "water" => Matchups {
        strengths: &["fire", "ground", "rock"],
        weaknesses: &["water", "grass", "dragon"],
    },
    "electric" => Matchups {
        strengths: &["water", "flying"],
        weaknesses: &["electric", "grass", "dragon", "ground"],
    },
    "grass" => Matchups {
        strengths: &["water", "ground", "rock"],
        weaknesses: &["fire", "grass", "poison", "flying", "bug", "dragon", "steel"],
    },
    "ice" => Matchups {
        strengths: &["grass", "ground", "flying", "dragon"],
        weaknesses: &["fire", "water", "ice", "steel"],
    },
    "fighting" => Matchups {
        strengths: &["normal", "ice", "rock", "dark", "steel"],
        weaknesses: &["poison", "flying", "psychic", "bug", "fairy"],
    },
    "poison" => Matchups {
        strengths: &["grass", "fairy"],
        weaknesses: &["poison", "ground", "rock", "ghost", "steel"],
    },
    "ground" => Matchups {
        strengths: &["fire", "electric", "poison", "rock", "steel"],
        weaknesses: &["grass", "bug", "flying"],
    },
    "flying" => Matchups {
        strengths: &["grass", "fighting", "bug"],
        weaknesses: &["electric", "rock", "steel"],
    },
    "psychic" => Matchups {
        strengths: &["fighting", "poison"],
        weaknesses: &["psychic", "steel", "dark"],
    },
    "bug" => Matchups {
        strengths: &["grass", "psychic", "dark"],
        weaknesses: &["fire", "fighting", "poison", "flying", "ghost", "steel", "fairy"],
    },
    "rock" => Matchups {
        strengths: &["fire", "ice", "flying", "bug"],
        weaknesses: &["fighting", "ground", "steel"],
    },
    "ghost" => Matchups {
        strengths: &["psychic", "ghost"],
        weaknesses: &["dark", "normal"],
    },
    "dragon" => Matchups {
        strengths: &["dragon"],
        weaknesses: &["steel", "fairy"],
    },
    "dark" => Matchups {
        strengths: &["psychic", "ghost"],
        weaknesses: &["fighting", "dark", "fairy"],
    },
    "steel" => Matchups {
        strengths: &["ice", "rock", "fairy"],
        weaknesses: &["fire", "water", "electric", "steel"],
    },
    "fairy" => Matchups {
        strengths: &["fighting", "dragon", "dark"],
        weaknesses: &["fire", "poison", "steel"],
    },
};

// Immunities override the multiplied factors to exactly zero.
fn is_immune(move_type: &str, defender_type: &str) -> bool {
    matches!(
        (move_type, defender_type),
        ("electric", "ground") | ("normal", "ghost")
    )
}

/// Combined multiplier for a move type against a defender's type set.
pub fn type_effectiveness(move_type: &str, defender_types: &[String]) -> f32 {
    let move_type = move_type.to_ascii_lowercase();
    let Some(matchups) = TYPE_CHART.get(move_type.as_str()) else {
        return 1.0;
    };
    let mut effectiveness = 1.0;
    for defender_type in defender_types {
        let defender_type = defender_type.to_ascii_lowercase();
        if matchups.strengths.contains(&defender_type.as_str()) {
            effectiveness *= 2.0;
        }
        if matchups.weaknesses.contains(&defender_type.as_str()) {
            effectiveness *= 0.5;
        }
        if is_immune(&move_type, &defender_type) {
            effectiveness = 0.0;
        }
    }
    effectiveness
}
