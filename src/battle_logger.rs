use serde_json::json;

/// Accumulates the narration lines a presentation layer would display.
#[derive(Clone, Debug, Default)]
pub struct BattleLog {
    lines: Vec<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn log_move(&mut self, attacker: &str, mv: &str) {
        self.lines.push(format!("{attacker} uses {mv}!"));
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.lines.push(format!("Turn {turn}. Choose your move!"));
    }

    pub fn log_exhausted(&mut self, name: &str) {
        self.lines.push(format!("{name} has no moves left!"));
    }

    pub fn log_faint(&mut self, name: &str, victory: bool) {
        let outcome = if victory { "won" } else { "lost" };
        self.lines
            .push(format!("{name} fainted! You {outcome} the battle!"));
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "log": self.lines,
        })
    }
}

/// Display tier for an effectiveness multiplier.
pub fn effectiveness_text(effectiveness: f32) -> &'static str {
    if effectiveness == 0.0 {
        "No Effect"
    } else if effectiveness < 1.0 {
        "Not Very Effective"
    } else if effectiveness > 1.0 {
        "Super Effective"
    } else {
        "Normal"
    }
}

/// One-line commentary for a resolved attack. Effectiveness outranks the
/// critical call-out, so a critical only surfaces on a neutral hit.
pub fn attack_commentary(
    attacker: &str,
    damage: u32,
    effectiveness: f32,
    critical: bool,
) -> String {
    if effectiveness == 0.0 {
        "It has no effect...".to_string()
    } else if effectiveness < 1.0 {
        "It's not very effective...".to_string()
    } else if effectiveness > 1.0 {
        "It's super effective!".to_string()
    } else if critical {
        "A critical hit!".to_string()
    } else if damage > 0 {
        format!("{attacker} dealt {damage} damage!")
    } else {
        format!("{attacker}'s move had no effect!")
    }
}
