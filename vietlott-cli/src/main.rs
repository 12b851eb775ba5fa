mod backtest;
mod display;
mod import;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use vietlott_core::games::Game;
use vietlott_predictor::{estimate_next_draw, PredictionOptions};

#[derive(Parser)]
#[command(name = "vietlott", about = "Estimation de probabilités Vietlott (Power 6/55, Mega 6/45)")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimer la distribution du prochain tirage
    Predict {
        /// Fichier JSONL des tirages historiques
        #[arg(short, long)]
        file: PathBuf,

        /// Jeu ("655" ou "645")
        #[arg(short, long, default_value = "655")]
        game: String,

        /// Nombre de tirages récents analysés
        #[arg(long, default_value = "300")]
        lookback: usize,

        /// Nombre de tirages Monte Carlo simulés
        #[arg(long, default_value = "25000")]
        simulations: usize,

        /// Nombre de combinaisons à rapporter
        #[arg(long, default_value = "10")]
        top: usize,

        /// Sous-fenêtre récente pour le signal de tendance
        #[arg(long, default_value = "45")]
        recent_window: usize,

        /// Nombre de numéros individuels affichés
        #[arg(long, default_value = "15")]
        top_numbers: usize,

        /// Sortie JSON brute plutôt que tableaux
        #[arg(long)]
        json: bool,
    },

    /// Afficher les derniers tirages
    History {
        /// Fichier JSONL des tirages historiques
        #[arg(short, long)]
        file: PathBuf,

        /// Jeu ("655" ou "645")
        #[arg(short, long, default_value = "655")]
        game: String,

        /// Nombre de tirages
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Situer une grille par rapport aux probabilités estimées
    Compare {
        /// Fichier JSONL des tirages historiques
        #[arg(short, long)]
        file: PathBuf,

        /// Jeu ("655" ou "645")
        #[arg(short, long, default_value = "655")]
        game: String,

        /// Les 6 numéros de la grille
        numbers: Vec<u8>,
    },

    /// Évaluer la recommandation en walk-forward sur l'historique
    Backtest {
        /// Fichier JSONL des tirages historiques
        #[arg(short, long)]
        file: PathBuf,

        /// Jeu ("655" ou "645")
        #[arg(short, long, default_value = "655")]
        game: String,

        /// Nombre de tirages testés
        #[arg(short, long, default_value = "100")]
        tests: usize,

        /// Simulations par tirage testé (réduit : un backtest en fait beaucoup)
        #[arg(long, default_value = "2000")]
        simulations: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Predict {
            file,
            game,
            lookback,
            simulations,
            top,
            recent_window,
            top_numbers,
            json,
        } => {
            let options = PredictionOptions {
                lookback,
                simulations,
                top_combinations: top,
                recent_window,
            };
            cmd_predict(&file, &game, &options, top_numbers, json)
        }
        Command::History { file, game, last } => cmd_history(&file, &game, last),
        Command::Compare {
            file,
            game,
            numbers,
        } => cmd_compare(&file, &game, &numbers),
        Command::Backtest {
            file,
            game,
            tests,
            simulations,
        } => cmd_backtest(&file, &game, tests, simulations),
    }
}

fn parse_game(value: &str) -> Result<Game> {
    match Game::parse(value) {
        Some(game) => Ok(game),
        None => bail!(
            "Jeu inconnu : '{}'. Valeurs possibles : 655 (Power 6/55), 645 (Mega 6/45)",
            value
        ),
    }
}

fn cmd_predict(
    file: &PathBuf,
    game: &str,
    options: &PredictionOptions,
    top_numbers: usize,
    json: bool,
) -> Result<()> {
    let game = parse_game(game)?;
    let draws = import::load_draws(game, file)?;
    let result = estimate_next_draw(&draws, game.number_max(), options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display::display_prediction(game, &result, top_numbers);
    }
    Ok(())
}

fn cmd_history(file: &PathBuf, game: &str, last: usize) -> Result<()> {
    let game = parse_game(game)?;
    let draws = import::load_draws(game, file)?;
    let start = draws.len().saturating_sub(last);
    display::display_history(game, &draws[start..]);
    Ok(())
}

fn cmd_compare(file: &PathBuf, game: &str, numbers: &[u8]) -> Result<()> {
    let game = parse_game(game)?;
    let grid = import::parse_grid(game, numbers)?;
    let draws = import::load_draws(game, file)?;
    let result = estimate_next_draw(&draws, game.number_max(), &PredictionOptions::default())?;
    display::display_compare(game, &grid, &result);
    Ok(())
}

fn cmd_backtest(file: &PathBuf, game: &str, tests: usize, simulations: usize) -> Result<()> {
    let game = parse_game(game)?;
    let draws = import::load_draws(game, file)?;

    let options = PredictionOptions {
        simulations,
        ..PredictionOptions::default()
    };

    let testable = draws
        .len()
        .saturating_sub(vietlott_predictor::MIN_DRAWS)
        .min(tests);
    let pb = ProgressBar::new(testable as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=> "),
    );

    let report = backtest::walk_forward_hits(&draws, game.number_max(), &options, tests, || {
        pb.inc(1)
    })?;
    pb.finish_and_clear();

    display::display_backtest(game, &report);
    Ok(())
}
