//! Battle session and turn resolution.
//!
//! [`BattleSession`] owns every piece of mutable match state and advances it
//! one full turn per player command. Resolution is synchronous: a command
//! returns a [`TurnReport`] carrying the ordered events of everything that
//! happened, and the consumer paces any presentation delays itself.

use crate::ai;
use crate::battle_logger::{attack_commentary, BattleLog};
use crate::damage::calculate_damage;
use crate::model::{Combatant, Move, STRUGGLE_ID};
use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Bot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Bot,
            Side::Bot => Side::Player,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BattleStatus {
    Ready,
    PlayerTurn,
    BotTurn,
    PlayerWon,
    BotWon,
    Draw,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            BattleStatus::PlayerWon | BattleStatus::BotWon | BattleStatus::Draw
        )
    }
}

/// Remaining uses per move id for one side.
///
/// The only mutation is [`PpTable::consume_one`], which floors at zero and
/// ignores the fallback move, so a counter can never leave `0..=base_pp`.
#[derive(Clone, Debug)]
pub struct PpTable {
    remaining: HashMap<i32, u32>,
}

impl PpTable {
    pub fn new(moves: &[Move]) -> Self {
        Self {
            remaining: moves.iter().map(|mv| (mv.id, mv.base_pp)).collect(),
        }
    }

    pub fn remaining(&self, id: i32) -> u32 {
        self.remaining.get(&id).copied().unwrap_or(0)
    }

    pub fn consume_one(&mut self, id: i32) {
        if id == STRUGGLE_ID {
            return;
        }
        if let Some(uses) = self.remaining.get_mut(&id) {
            *uses = uses.saturating_sub(1);
        }
    }

    pub fn any_left(&self) -> bool {
        self.remaining.values().any(|&uses| uses > 0)
    }

    pub fn as_map(&self) -> HashMap<i32, u32> {
        self.remaining.clone()
    }
}

/// Structured outcome of the most recent attack, for transient display.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LastAttack {
    pub move_id: i32,
    pub effectiveness: f32,
    pub critical: bool,
    pub damage: u32,
    pub attacker: Side,
}

/// Discrete step boundaries a consumer can pace or animate between.
#[derive(Clone, Debug)]
pub enum BattleEvent {
    MovesExhausted { side: Side },
    MoveUsed { side: Side, mv: Move },
    AttackLanded { attack: LastAttack, defender_hp: u32 },
    Fainted { side: Side },
    BattleEnded { winner: Side },
    TurnEnded { turn: u32 },
}

/// Read-only view of the session after a step.
#[derive(Clone, Debug, Serialize)]
pub struct Snapshot {
    pub turn: u32,
    pub status: BattleStatus,
    pub player_hp: u32,
    pub player_max_hp: u32,
    pub bot_hp: u32,
    pub bot_max_hp: u32,
    pub player_pp: HashMap<i32, u32>,
    pub bot_pp: HashMap<i32, u32>,
    pub player_selected: Option<Move>,
    pub bot_selected: Option<Move>,
    pub last_player_move: Option<Move>,
    pub last_bot_move: Option<Move>,
    pub last_attack: Option<LastAttack>,
    pub first_attacker: Side,
}

/// Everything that happened during one command.
#[derive(Clone, Debug)]
pub struct TurnReport {
    pub events: Vec<BattleEvent>,
    pub snapshot: Snapshot,
}

pub struct BattleSession {
    player: Combatant,
    bot: Combatant,
    player_hp: u32,
    player_max_hp: u32,
    bot_hp: u32,
    bot_max_hp: u32,
    player_pp: PpTable,
    bot_pp: PpTable,
    turn: u32,
    status: BattleStatus,
    first_attacker: Side,
    first_turn_resolved: bool,
    resolving: bool,
    player_selected: Option<Move>,
    bot_selected: Option<Move>,
    last_player_move: Option<Move>,
    last_bot_move: Option<Move>,
    last_attack: Option<LastAttack>,
    log: BattleLog,
    rng: SmallRng,
}

impl BattleSession {
    /// Builds a session from two validated records and a seed.
    ///
    /// The first attacker is fixed here: faster side leads the opening turn,
    /// equal speeds are settled by a single 50/50 draw. From turn 2 onward
    /// the player always moves first.
    pub fn new(player: Combatant, bot: Combatant, seed: u64) -> Result<Self> {
        player
            .validate()
            .with_context(|| format!("player record '{}' rejected", player.name))?;
        bot.validate()
            .with_context(|| format!("opponent record '{}' rejected", bot.name))?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let speed_tie = player.stats.speed == bot.stats.speed;
        let first_attacker = if player.stats.speed > bot.stats.speed {
            Side::Player
        } else if bot.stats.speed > player.stats.speed {
            Side::Bot
        } else if rng.gen::<f32>() < 0.5 {
            Side::Player
        } else {
            Side::Bot
        };

        let mut log = BattleLog::new();
        log.push(opening_line(first_attacker, speed_tie));

        let player_max_hp = player.max_hp();
        let bot_max_hp = bot.max_hp();
        let player_pp = PpTable::new(&player.moves);
        let bot_pp = PpTable::new(&bot.moves);
        let mut session = Self {
            player,
            bot,
            player_hp: player_max_hp,
            player_max_hp,
            bot_hp: bot_max_hp,
            bot_max_hp,
            player_pp,
            bot_pp,
            turn: 1,
            status: BattleStatus::Ready,
            first_attacker,
            first_turn_resolved: false,
            resolving: false,
            player_selected: None,
            bot_selected: None,
            last_player_move: None,
            last_bot_move: None,
            last_attack: None,
            log,
            rng,
        };
        session.status = BattleStatus::PlayerTurn;
        // A record can arrive with no usable moves at all; the player is
        // never handed an unplayable turn.
        let mut events = Vec::new();
        session.auto_play_exhausted(&mut events);
        Ok(session)
    }

    pub fn status(&self) -> BattleStatus {
        self.status
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn first_attacker(&self) -> Side {
        self.first_attacker
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn bot(&self) -> &Combatant {
        &self.bot
    }

    pub fn player_has_moves(&self) -> bool {
        self.player_pp.any_left()
    }

    pub fn log(&self) -> &BattleLog {
        &self.log
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            turn: self.turn,
            status: self.status,
            player_hp: self.player_hp,
            player_max_hp: self.player_max_hp,
            bot_hp: self.bot_hp,
            bot_max_hp: self.bot_max_hp,
            player_pp: self.player_pp.as_map(),
            bot_pp: self.bot_pp.as_map(),
            player_selected: self.player_selected.clone(),
            bot_selected: self.bot_selected.clone(),
            last_player_move: self.last_player_move.clone(),
            last_bot_move: self.last_bot_move.clone(),
            last_attack: self.last_attack,
            first_attacker: self.first_attacker,
        }
    }

    /// The player command: resolve one full turn around the chosen move.
    ///
    /// Returns `None` without touching anything when the session is not
    /// waiting for a selection or the id is not in the player's move set;
    /// stale UI commands are a normal occurrence, not an error.
    pub fn select_move(&mut self, move_id: i32) -> Option<TurnReport> {
        if self.status != BattleStatus::PlayerTurn || self.resolving {
            return None;
        }
        let mut events = Vec::new();
        let chosen = if self.player_pp.any_left() {
            self.player.moves.iter().find(|mv| mv.id == move_id)?.clone()
        } else {
            self.emit(&mut events, BattleEvent::MovesExhausted { side: Side::Player });
            Move::struggle()
        };
        self.resolve_turn(chosen, &mut events);
        self.auto_play_exhausted(&mut events);
        Some(TurnReport {
            events,
            snapshot: self.snapshot(),
        })
    }

    /// Plays the player side with the same heuristic the opponent uses.
    /// Entry point for unattended play (demo duels, the win-rate harness).
    pub fn auto_turn(&mut self) -> Option<TurnReport> {
        if self.status != BattleStatus::PlayerTurn || self.resolving {
            return None;
        }
        let mut events = Vec::new();
        let chosen = if self.player_pp.any_left() {
            ai::select_move(&self.player, &self.bot, &self.player_pp, &mut self.rng)
        } else {
            self.emit(&mut events, BattleEvent::MovesExhausted { side: Side::Player });
            Move::struggle()
        };
        self.resolve_turn(chosen, &mut events);
        self.auto_play_exhausted(&mut events);
        Some(TurnReport {
            events,
            snapshot: self.snapshot(),
        })
    }

    fn resolve_turn(&mut self, player_move: Move, events: &mut Vec<BattleEvent>) {
        self.resolving = true;
        self.status = BattleStatus::BotTurn;
        self.player_pp.consume_one(player_move.id);
        self.player_selected = Some(player_move.clone());

        let bot_move = ai::select_move(&self.bot, &self.player, &self.bot_pp, &mut self.rng);
        // Uses are spent when the move is chosen, not when it lands.
        self.bot_pp.consume_one(bot_move.id);
        self.bot_selected = Some(bot_move.clone());

        let player_first = self.first_turn_resolved || self.first_attacker == Side::Player;
        let order = if player_first {
            [Side::Player, Side::Bot]
        } else {
            [Side::Bot, Side::Player]
        };
        for side in order {
            let mv = match side {
                Side::Player => player_move.clone(),
                Side::Bot => bot_move.clone(),
            };
            self.execute_attack(side, mv, events);
            if self.status.is_terminal() {
                // A fainted combatant never acts.
                break;
            }
        }

        if !self.status.is_terminal() {
            self.turn += 1;
            self.player_selected = None;
            self.bot_selected = None;
            self.first_attacker = Side::Player;
            self.status = BattleStatus::PlayerTurn;
            self.emit(events, BattleEvent::TurnEnded { turn: self.turn });
        }
        self.first_turn_resolved = true;
        self.resolving = false;
    }

    fn execute_attack(&mut self, side: Side, mv: Move, events: &mut Vec<BattleEvent>) {
        self.emit(
            events,
            BattleEvent::MoveUsed {
                side,
                mv: mv.clone(),
            },
        );

        let outcome = match side {
            Side::Player => calculate_damage(&mv, &self.player, &self.bot, &mut self.rng),
            Side::Bot => calculate_damage(&mv, &self.bot, &self.player, &mut self.rng),
        };
        let attack = LastAttack {
            move_id: mv.id,
            effectiveness: outcome.effectiveness,
            critical: outcome.critical,
            damage: outcome.damage,
            attacker: side,
        };
        self.last_attack = Some(attack);
        match side {
            Side::Player => self.last_player_move = Some(mv),
            Side::Bot => self.last_bot_move = Some(mv),
        }

        let defender_hp = match side {
            Side::Player => {
                self.bot_hp = self.bot_hp.saturating_sub(outcome.damage);
                self.bot_hp
            }
            Side::Bot => {
                self.player_hp = self.player_hp.saturating_sub(outcome.damage);
                self.player_hp
            }
        };
        self.emit(events, BattleEvent::AttackLanded { attack, defender_hp });

        if defender_hp == 0 {
            self.status = match side {
                Side::Player => BattleStatus::PlayerWon,
                Side::Bot => BattleStatus::BotWon,
            };
            self.emit(
                events,
                BattleEvent::Fainted {
                    side: side.opponent(),
                },
            );
            self.emit(events, BattleEvent::BattleEnded { winner: side });
        }
    }

    fn auto_play_exhausted(&mut self, events: &mut Vec<BattleEvent>) {
        while self.status == BattleStatus::PlayerTurn && !self.player_pp.any_left() {
            let before = (self.player_hp, self.bot_hp);
            self.emit(events, BattleEvent::MovesExhausted { side: Side::Player });
            self.resolve_turn(Move::struggle(), events);
            // A forced round that moves no HP cannot make progress; stop
            // instead of spinning (both sides immune to the fallback).
            if (self.player_hp, self.bot_hp) == before {
                break;
            }
        }
    }

    fn emit(&mut self, events: &mut Vec<BattleEvent>, event: BattleEvent) {
        self.narrate(&event);
        events.push(event);
    }

    fn narrate(&mut self, event: &BattleEvent) {
        match event {
            BattleEvent::MovesExhausted { side } => {
                let name = self.name_of(*side).to_string();
                self.log.log_exhausted(&name);
            }
            BattleEvent::MoveUsed { side, mv } => {
                let name = self.name_of(*side).to_string();
                self.log.log_move(&name, &mv.name);
            }
            BattleEvent::AttackLanded { attack, defender_hp } => {
                // The faint announcement replaces the commentary line.
                if *defender_hp > 0 {
                    let name = self.name_of(attack.attacker).to_string();
                    self.log.push(attack_commentary(
                        &name,
                        attack.damage,
                        attack.effectiveness,
                        attack.critical,
                    ));
                }
            }
            BattleEvent::Fainted { side } => {
                let name = self.name_of(*side).to_string();
                self.log.log_faint(&name, *side == Side::Bot);
            }
            BattleEvent::BattleEnded { .. } => {}
            BattleEvent::TurnEnded { turn } => self.log.log_turn(*turn),
        }
    }

    fn name_of(&self, side: Side) -> &str {
        match side {
            Side::Player => &self.player.name,
            Side::Bot => &self.bot.name,
        }
    }
}

fn opening_line(first_attacker: Side, speed_tie: bool) -> String {
    let lead = match (speed_tie, first_attacker) {
        (true, Side::Player) => "Both sides have equal speed. Randomly, you are",
        (true, Side::Bot) => "Both sides have equal speed. Randomly, the opponent is",
        (false, Side::Player) => "You are",
        (false, Side::Bot) => "The opponent is",
    };
    format!("The battle begins! {lead} faster and will move first.")
}
