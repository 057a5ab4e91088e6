use pokemon_duel::{run, CliOptions};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--roster roster.json] [--player NAME] [--bot NAME] \
[--seed SEED] [--sims-per-cell N] [--output matrix.csv]"
    );
    eprintln!("With --sims-per-cell 0 (the default) a single narrated duel is played.");
    std::process::exit(1);
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut roster_path = PathBuf::from("data/roster.json");
    let mut player = None;
    let mut bot = None;
    let mut seed = 0u64;
    let mut sims_per_cell = 0usize;
    let mut output_path = PathBuf::from("matrix.csv");

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--roster" => {
                roster_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--roster requires a path (e.g. --roster roster.json)")
                })?;
            }
            "--player" => {
                player = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--player requires a creature name"))?,
                );
            }
            "--bot" => {
                bot = Some(
                    args.next()
                        .ok_or_else(|| anyhow::anyhow!("--bot requires a creature name"))?,
                );
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                seed = val.parse()?;
            }
            "--sims-per-cell" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--sims-per-cell requires a number"))?;
                sims_per_cell = val.parse()?;
            }
            "--output" => {
                output_path = args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--output requires a path (e.g. --output matrix.csv)")
                })?;
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(CliOptions {
        roster_path,
        player,
        bot,
        seed,
        sims_per_cell,
        output_path,
    })
}

fn main() -> anyhow::Result<()> {
    let opts = parse_args()?;
    run(opts)
}
