pub mod ai;
pub mod battle;
pub mod battle_logger;
pub mod damage;
pub mod matrix;
pub mod model;
pub mod roster;
pub mod types;

use crate::battle::BattleSession;
use crate::matrix::{compute_matrix, write_csv, TURN_CAP};
use crate::model::Combatant;
use crate::roster::{load_roster, Roster};
use anyhow::Context;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub roster_path: PathBuf,
    pub player: Option<String>,
    pub bot: Option<String>,
    pub seed: u64,
    pub sims_per_cell: usize,
    pub output_path: PathBuf,
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let roster = load_roster(&opts.roster_path)?;
    if opts.sims_per_cell > 0 {
        run_matrix(&roster, &opts)
    } else {
        run_duel(&roster, &opts)
    }
}

fn run_matrix(roster: &Roster, opts: &CliOptions) -> anyhow::Result<()> {
    let matrix = compute_matrix(
        roster.creatures(),
        roster.creatures(),
        opts.sims_per_cell,
        opts.seed,
    )?;
    write_csv(&matrix, &opts.output_path)
        .with_context(|| format!("Failed to write {}", opts.output_path.display()))?;
    println!(
        "Wrote {}x{} win-rate matrix to {}",
        matrix.len(),
        matrix.first().map(|row| row.len()).unwrap_or(0),
        opts.output_path.display()
    );
    Ok(())
}

fn run_duel(roster: &Roster, opts: &CliOptions) -> anyhow::Result<()> {
    let mut rng = SmallRng::seed_from_u64(opts.seed);
    let player = pick(roster, opts.player.as_deref(), &mut rng)?.clone();
    let bot = pick(roster, opts.bot.as_deref(), &mut rng)?.clone();
    let battle_seed = rng.gen();

    let mut session = BattleSession::new(player, bot, battle_seed)?;
    for _ in 0..TURN_CAP {
        if session.is_over() {
            break;
        }
        if session.auto_turn().is_none() {
            break;
        }
    }
    for line in session.log().lines() {
        println!("{line}");
    }
    if !session.is_over() {
        println!("Called after {TURN_CAP} turns with both sides standing: draw.");
    }
    Ok(())
}

fn pick<'a>(
    roster: &'a Roster,
    name: Option<&str>,
    rng: &mut SmallRng,
) -> anyhow::Result<&'a Combatant> {
    match name {
        Some(name) => roster
            .by_name(name)
            .with_context(|| format!("No creature named '{name}' in the roster")),
        None => Ok(roster.random_pick(rng)),
    }
}
