//! Sweep command - Let the inference agent play Minesweeper

use anyhow::Result;
use clap::Parser;
use serde::Serialize;

use crate::{
    SweeperConfig,
    cli::output::{create_games_progress, format_percent, print_kv, print_section},
    minesweeper::{Game, GameOutcome, GameReport},
};

#[derive(Parser, Debug)]
#[command(about = "Let the inference agent play Minesweeper")]
pub struct SweepArgs {
    /// Board height
    #[arg(long, default_value_t = 8)]
    pub height: usize,

    /// Board width
    #[arg(long, default_value_t = 8)]
    pub width: usize,

    /// Number of mines
    #[arg(long, short = 'm', default_value_t = 8)]
    pub mines: usize,

    /// Random seed for reproducibility (game `i` uses `seed + i`)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1)]
    pub games: usize,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl SweepArgs {
    fn config(&self) -> SweeperConfig {
        let config = SweeperConfig::new(self.height, self.width, self.mines);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Totals over a batch of games
#[derive(Debug, Default, Serialize)]
struct BatchSummary {
    config: Option<SweeperConfig>,
    games: usize,
    wins: usize,
    losses: usize,
    safe_moves: usize,
    random_moves: usize,
}

impl BatchSummary {
    fn record(&mut self, report: &GameReport) {
        self.games += 1;
        match report.outcome {
            Some(GameOutcome::Won) => self.wins += 1,
            Some(GameOutcome::Lost { .. }) => self.losses += 1,
            None => {}
        }
        self.safe_moves += report.safe_moves;
        self.random_moves += report.random_moves;
    }
}

pub fn execute(args: SweepArgs) -> Result<()> {
    let config = args.config();
    config.validate()?;

    if args.games == 1 {
        let mut game = Game::new(&config)?;
        game.play_to_end()?;
        let report = game.report();
        if args.json {
            println!("{}", report.to_json()?);
        } else {
            print_game(&report);
        }
        return Ok(());
    }

    let progress = (!args.json)
        .then(|| create_games_progress(args.games as u64))
        .transpose()?;
    let mut summary = BatchSummary {
        config: Some(config.clone()),
        ..BatchSummary::default()
    };

    for i in 0..args.games {
        let mut game_config = config.clone();
        game_config.seed = config.seed.map(|seed| seed.wrapping_add(i as u64));

        let mut game = Game::new(&game_config)?;
        game.play_to_end()?;
        summary.record(&game.report());

        if let Some(pb) = &progress {
            pb.set_message(format!("{} won", summary.wins));
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn print_game(report: &GameReport) {
    print_section("Minesweeper game");
    print_kv(
        "Board",
        &format!("{}x{} with {} mines", report.height, report.width, report.mines),
    );
    print_kv("Moves", &report.moves.len().to_string());
    print_kv("Safe moves", &report.safe_moves.to_string());
    print_kv("Random moves", &report.random_moves.to_string());
    print_kv("Mines flagged", &report.mines_flagged.to_string());
    let outcome = match report.outcome {
        Some(GameOutcome::Won) => "won".to_string(),
        Some(GameOutcome::Lost { cell }) => format!("lost at {cell}"),
        None => "unfinished".to_string(),
    };
    print_kv("Outcome", &outcome);
}

fn print_summary(summary: &BatchSummary) {
    print_section("Minesweeper batch");
    if let Some(config) = &summary.config {
        print_kv(
            "Board",
            &format!("{}x{} with {} mines", config.height, config.width, config.mines),
        );
    }
    print_kv("Games", &summary.games.to_string());
    print_kv(
        "Wins",
        &format!(
            "{} ({})",
            summary.wins,
            format_percent(summary.wins, summary.games)
        ),
    );
    print_kv("Losses", &summary.losses.to_string());
    let total_moves = summary.safe_moves + summary.random_moves;
    print_kv(
        "Safe moves",
        &format!(
            "{} ({})",
            summary.safe_moves,
            format_percent(summary.safe_moves, total_moves)
        ),
    );
    print_kv("Random moves", &summary.random_moves.to_string());
}
