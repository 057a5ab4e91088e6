use pokemon_duel::battle::BattleStatus;
use pokemon_duel::matrix::{compute_matrix, play_out, write_csv};
use pokemon_duel::model::{Combatant, Move, MoveCategory, Stats};

fn make_move(id: i32, move_type: &str, power: u32, pp: u32) -> Move {
    Move {
        id,
        name: format!("Move {id}"),
        move_type: move_type.to_string(),
        power,
        accuracy: 100,
        base_pp: pp,
        category: MoveCategory::Physical,
    }
}

fn make_mon(name: &str, types: &[&str], hp: u32, attack: u32, speed: u32, moves: Vec<Move>) -> Combatant {
    Combatant {
        id: 1,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        stats: Stats {
            hp,
            attack,
            defense: 60,
            special_attack: attack,
            special_defense: 60,
            speed,
        },
        moves,
    }
}

#[test]
fn play_out_reaches_a_terminal_state() {
    let a = make_mon("Alpha", &["fire"], 100, 80, 70, vec![make_move(1, "fire", 60, 20)]);
    let b = make_mon("Beta", &["water"], 100, 80, 60, vec![make_move(1, "water", 60, 20)]);
    for seed in 0..10 {
        let outcome = play_out(&a, &b, seed).expect("valid records");
        assert!(
            matches!(
                outcome,
                BattleStatus::PlayerWon | BattleStatus::BotWon | BattleStatus::Draw
            ),
            "unexpected outcome {outcome:?}"
        );
    }
}

#[test]
fn overwhelming_side_sweeps_its_cell() {
    let titan = make_mon("Titan", &["normal"], 400, 400, 90, vec![make_move(1, "normal", 150, 30)]);
    let pebble = make_mon("Pebble", &["fire"], 10, 5, 10, vec![make_move(1, "fire", 20, 30)]);
    let matrix = compute_matrix(&[titan], &[pebble], 20, 42).expect("valid records");
    assert_eq!(matrix.len(), 1);
    assert_eq!(matrix[0][0], 1.0);
}

#[test]
fn matrix_shape_matches_the_pairings_and_rates_are_bounded() {
    let side_a = vec![
        make_mon("A1", &["fire"], 90, 70, 60, vec![make_move(1, "fire", 60, 20)]),
        make_mon("A2", &["water"], 90, 70, 60, vec![make_move(1, "water", 60, 20)]),
    ];
    let side_b = vec![
        make_mon("B1", &["grass"], 90, 70, 60, vec![make_move(1, "grass", 60, 20)]),
        make_mon("B2", &["electric"], 90, 70, 60, vec![make_move(1, "electric", 60, 20)]),
        make_mon("B3", &["normal"], 90, 70, 60, vec![make_move(1, "normal", 60, 20)]),
    ];
    let matrix = compute_matrix(&side_a, &side_b, 8, 7).expect("valid records");
    assert_eq!(matrix.len(), 2);
    for row in &matrix {
        assert_eq!(row.len(), 3);
        for &rate in row {
            assert!((0.0..=1.0).contains(&rate), "rate {rate} out of bounds");
        }
    }
}

#[test]
fn mutual_immunity_is_called_as_a_draw_worth_half_a_win() {
    // Ghosts trading normal moves can never damage each other; the turn cap
    // ends the battle and each draw scores 0.5.
    let specter_a = make_mon("SpecterA", &["ghost"], 80, 80, 70, vec![make_move(1, "normal", 60, 3)]);
    let specter_b = make_mon("SpecterB", &["ghost"], 80, 80, 70, vec![make_move(1, "normal", 60, 3)]);
    for seed in 0..3 {
        let outcome = play_out(&specter_a, &specter_b, seed).expect("valid records");
        assert_eq!(outcome, BattleStatus::Draw);
    }
    let matrix = compute_matrix(&[specter_a], &[specter_b], 4, 11).expect("valid records");
    assert_eq!(matrix[0][0], 0.5);
}

#[test]
fn matrix_is_deterministic_for_a_seed() {
    let side_a = vec![make_mon("A", &["fire"], 90, 70, 60, vec![make_move(1, "fire", 60, 20)])];
    let side_b = vec![make_mon("B", &["grass"], 90, 70, 60, vec![make_move(1, "grass", 60, 20)])];
    let first = compute_matrix(&side_a, &side_b, 10, 5).expect("valid records");
    let second = compute_matrix(&side_a, &side_b, 10, 5).expect("valid records");
    assert_eq!(first, second);
}

#[test]
fn csv_export_writes_one_row_per_attacker() {
    let matrix = vec![vec![0.25, 0.5], vec![1.0, 0.0]];
    let dir = std::env::temp_dir();
    let path = dir.join("pokemon-duel-matrix-test.csv");
    write_csv(&matrix, &path).expect("csv written");
    let written = std::fs::read_to_string(&path).expect("csv readable");
    assert_eq!(written, "0.2500,0.5000\n1.0000,0.0000");
    let _ = std::fs::remove_file(&path);
}
