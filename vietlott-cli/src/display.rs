use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use vietlott_core::games::Game;
use vietlott_core::models::Draw;
use vietlott_predictor::PredictionResult;

use crate::backtest::BacktestReport;

fn grid_string(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

fn probability_bar(probability: f64, max_probability: f64) -> String {
    if max_probability <= 0.0 {
        return String::new();
    }
    "█".repeat((probability / max_probability * 20.0).round() as usize)
}

pub fn display_prediction(game: Game, result: &PredictionResult, top_numbers: usize) {
    println!("\n== Prédiction {} ==\n", game.label());
    println!("Tirages analysés   : {}", result.draws_used);
    println!("Simulations        : {}", result.simulations);
    println!("Confiance (signal) : {:.2} / 100", result.confidence_score);
    println!("Générée le         : {}", result.generated_at);

    println!("\n── Numéros individuels (top {}) ──", top_numbers);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Numéro",
            "Probabilité",
            "Score",
            "Fréq.",
            "Fréq. récente",
            "Écart",
            "",
        ]);

    let max_probability = result
        .number_probabilities
        .first()
        .map(|e| e.probability)
        .unwrap_or(0.0);

    for entry in result.number_probabilities.iter().take(top_numbers) {
        table.add_row(vec![
            format!("{:2}", entry.number),
            format!("{:.4}", entry.probability),
            format!("{:.4}", entry.score),
            entry.frequency.to_string(),
            entry.recent_frequency.to_string(),
            entry.gap.to_string(),
            probability_bar(entry.probability, max_probability),
        ]);
    }
    println!("{table}");

    println!("\n── Combinaisons les plus simulées ──");
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Combinaison", "Hits", "Probabilité", "Cote estimée"]);

    for combo in &result.top_combinations {
        table.add_row(vec![
            grid_string(&combo.numbers),
            combo.simulated_hits.to_string(),
            format!("{:.5}", combo.probability),
            combo.estimated_odds.clone(),
        ]);
    }
    println!("{table}");

    println!(
        "\nGrille recommandée (marginales) : {}",
        grid_string(&result.recommended_numbers)
    );
}

pub fn display_history(game: Game, draws: &[Draw]) {
    println!("\n== Historique {} ==\n", game.label());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tirage", "Date", "Numéros", "Bonus"]);

    for draw in draws {
        let bonus = draw
            .bonus
            .map(|b| format!("{:2}", b))
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            draw.draw_id.to_string(),
            draw.date.clone(),
            grid_string(&draw.numbers),
            bonus,
        ]);
    }
    println!("{table}");
}

pub fn display_compare(game: Game, grid: &[u8; 6], result: &PredictionResult) {
    println!("\n== Comparaison {} ==\n", game.label());
    println!("Grille : {}", grid_string(grid));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Rang", "Probabilité", "Écart"]);

    let mut rank_sum = 0usize;
    for &number in grid {
        // number_probabilities est trié par probabilité décroissante : la
        // position dans la liste est le rang du numéro
        let position = result
            .number_probabilities
            .iter()
            .position(|e| e.number == number);

        match position {
            Some(pos) => {
                let entry = &result.number_probabilities[pos];
                rank_sum += pos + 1;
                table.add_row(vec![
                    format!("{:2}", number),
                    format!("{}/{}", pos + 1, result.number_probabilities.len()),
                    format!("{:.4}", entry.probability),
                    entry.gap.to_string(),
                ]);
            }
            None => {
                table.add_row(vec![
                    format!("{:2}", number),
                    "—".to_string(),
                    "—".to_string(),
                    "—".to_string(),
                ]);
            }
        }
    }
    println!("{table}");

    if !result.number_probabilities.is_empty() {
        let mean_rank = rank_sum as f64 / grid.len() as f64;
        println!(
            "Rang moyen : {:.1} (médiane du domaine : {:.1})",
            mean_rank,
            result.number_probabilities.len() as f64 / 2.0
        );
    }

    let in_recommended = grid
        .iter()
        .filter(|n| result.recommended_numbers.contains(n))
        .count();
    println!(
        "Numéros en commun avec la grille recommandée : {}/6",
        in_recommended
    );
}

pub fn display_backtest(game: Game, report: &BacktestReport) {
    println!("\n== Backtest {} ==\n", game.label());
    println!("Tirages testés     : {}", report.tests);
    println!(
        "Numéros corrects   : {:.3} par tirage (hasard : {:.3})",
        report.mean_hits, report.expected_random
    );
    println!("Meilleur tirage    : {} numéros corrects", report.best_hits);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéros corrects", "Tirages", ""]);

    let max_count = report.hit_histogram.iter().copied().max().unwrap_or(0);
    for (hits, &count) in report.hit_histogram.iter().enumerate() {
        let bar = if max_count > 0 {
            "█".repeat((count as f64 / max_count as f64 * 20.0).round() as usize)
        } else {
            String::new()
        };
        table.add_row(vec![hits.to_string(), count.to_string(), bar]);
    }
    println!("{table}");
}
