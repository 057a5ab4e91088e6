//! Unattended battle harness: win-rate estimation over roster pairings.

use crate::battle::{BattleSession, BattleStatus};
use crate::model::Combatant;
use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

/// Stalemates are called after this many turns and scored as a draw.
pub const TURN_CAP: u32 = 500;

/// Plays one seeded battle to completion with both sides on the heuristic
/// selector. The player side drives through the session's own command
/// surface, so the harness exercises exactly what an interactive consumer
/// would.
pub fn play_out(player: &Combatant, bot: &Combatant, seed: u64) -> Result<BattleStatus> {
    let mut session = BattleSession::new(player.clone(), bot.clone(), seed)?;
    for _ in 0..TURN_CAP {
        if session.is_over() {
            break;
        }
        if session.auto_turn().is_none() {
            break;
        }
    }
    Ok(if session.is_over() {
        session.status()
    } else {
        BattleStatus::Draw
    })
}

struct CellResult {
    a_idx: usize,
    b_idx: usize,
    win_rate: f64,
}

/// Win rate of every creature in `side_a` against every creature in
/// `side_b`, estimated over `sims_per_cell` seeded battles per pairing.
/// Draws count half a win. Cells are independent and run in parallel.
pub fn compute_matrix(
    side_a: &[Combatant],
    side_b: &[Combatant],
    sims_per_cell: usize,
    seed: u64,
) -> Result<Vec<Vec<f64>>> {
    let tasks: Vec<(usize, usize)> = (0..side_a.len())
        .flat_map(|a| (0..side_b.len()).map(move |b| (a, b)))
        .collect();
    let cell_results: Result<Vec<CellResult>> = tasks
        .par_iter()
        .map(|&(a_idx, b_idx)| {
            let mut cell_rng =
                SmallRng::seed_from_u64(seed ^ ((a_idx as u64) << 32) ^ b_idx as u64);
            let mut wins = 0u64;
            let mut draws = 0u64;
            for _ in 0..sims_per_cell {
                let battle_seed = cell_rng.gen();
                match play_out(&side_a[a_idx], &side_b[b_idx], battle_seed)? {
                    BattleStatus::PlayerWon => wins += 1,
                    BattleStatus::Draw => draws += 1,
                    _ => {}
                }
            }
            let total = sims_per_cell as f64;
            Ok(CellResult {
                a_idx,
                b_idx,
                win_rate: (wins as f64 + 0.5 * draws as f64) / total,
            })
        })
        .collect();

    let mut matrix = vec![vec![0.0; side_b.len()]; side_a.len()];
    for cell in cell_results? {
        matrix[cell.a_idx][cell.b_idx] = cell.win_rate;
    }
    Ok(matrix)
}

pub fn write_csv(matrix: &[Vec<f64>], path: &std::path::Path) -> Result<()> {
    let mut out = String::new();
    for (row_idx, row) in matrix.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            if col_idx > 0 {
                out.push(',');
            }
            out.push_str(&format!("{value:.4}"));
        }
        if row_idx + 1 < matrix.len() {
            out.push('\n');
        }
    }
    std::fs::write(path, out)?;
    Ok(())
}
