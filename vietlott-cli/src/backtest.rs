use anyhow::{bail, Result};

use vietlott_core::models::{Draw, PICK_COUNT};
use vietlott_predictor::{estimate_next_draw, PredictionOptions, MIN_DRAWS};

/// Bilan d'une évaluation walk-forward de la recommandation.
#[derive(Debug, Clone)]
pub struct BacktestReport {
    /// Nombre de tirages réellement testés.
    pub tests: usize,
    /// Numéros corrects en moyenne par tirage (sur 6).
    pub mean_hits: f64,
    /// Espérance pour une grille jouée au hasard.
    pub expected_random: f64,
    /// hit_histogram[k] = tirages où exactement k numéros recommandés sont sortis.
    pub hit_histogram: [u32; PICK_COUNT + 1],
    pub best_hits: u32,
}

fn overlap(recommended: &[u8], actual: &[u8; 6]) -> u32 {
    recommended.iter().filter(|n| actual.contains(n)).count() as u32
}

/// Évaluation walk-forward : pour chacun des `n_tests` derniers tirages,
/// prédit à partir des tirages strictement antérieurs et compte les
/// numéros recommandés effectivement sortis. Pas de fuite du futur.
/// `on_step` est appelé après chaque tirage testé (barre de progression).
pub fn walk_forward_hits(
    draws: &[Draw],
    number_max: u8,
    options: &PredictionOptions,
    n_tests: usize,
    mut on_step: impl FnMut(),
) -> Result<BacktestReport> {
    if draws.len() < MIN_DRAWS + 1 {
        bail!(
            "Au moins {} tirages requis pour un backtest ({} fournis)",
            MIN_DRAWS + 1,
            draws.len()
        );
    }

    // Premier index testable : il faut MIN_DRAWS tirages d'entraînement avant
    let first = draws.len().saturating_sub(n_tests).max(MIN_DRAWS);

    let mut hit_histogram = [0u32; PICK_COUNT + 1];
    let mut total_hits = 0u64;
    let mut tests = 0usize;

    for t in first..draws.len() {
        let prediction = estimate_next_draw(&draws[..t], number_max, options)?;
        let hits = overlap(&prediction.recommended_numbers, &draws[t].numbers);
        hit_histogram[hits as usize] += 1;
        total_hits += hits as u64;
        tests += 1;
        on_step();
    }

    let best_hits = (0..=PICK_COUNT)
        .rev()
        .find(|&k| hit_histogram[k] > 0)
        .unwrap_or(0) as u32;

    // Grille au hasard : 6 numéros sur number_max, espérance 36 / number_max
    let expected_random = (PICK_COUNT * PICK_COUNT) as f64 / number_max as f64;

    Ok(BacktestReport {
        tests,
        mean_hits: total_hits as f64 / tests.max(1) as f64,
        expected_random,
        hit_histogram,
        best_hits,
    })
}
