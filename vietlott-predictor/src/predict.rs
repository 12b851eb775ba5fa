use std::cmp::Ordering;

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use vietlott_core::models::{Draw, NUMBER_MIN, PICK_COUNT};

use crate::options::PredictionOptions;
use crate::rng::{derive_seed, XorShift32};
use crate::sampler::{parse_combo_key, simulate};
use crate::scoring::{compute_scores, score_to_weights};

/// Bornes du domaine de numéros.
pub const NUMBER_MAX_MIN: u8 = 10;
pub const NUMBER_MAX_MAX: u8 = 99;

/// Estimation individuelle d'un numéro : probabilité simulée et signaux
/// historiques sous-jacents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberProbability {
    pub number: u8,
    pub probability: f64,
    pub score: f64,
    pub frequency: u32,
    pub recent_frequency: u32,
    pub gap: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinationProbability {
    pub numbers: Vec<u8>,
    pub probability: f64,
    pub estimated_odds: String,
    pub simulated_hits: u32,
}

/// Résultat complet d'une estimation. Construit une fois par appel,
/// immuable ensuite ; rien n'est conservé entre deux appels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub generated_at: String,
    pub number_max: u8,
    pub draws_used: usize,
    pub simulations: usize,
    pub confidence_score: f64,
    pub recommended_numbers: Vec<u8>,
    pub top_combinations: Vec<CombinationProbability>,
    pub number_probabilities: Vec<NumberProbability>,
}

/// Estime la distribution du prochain tirage à partir de l'historique.
///
/// Fonction pure de ses entrées (plus l'horodatage de génération) :
/// mêmes tirages + mêmes options ⇒ mêmes probabilités, car le seed du
/// générateur est dérivé de l'id du dernier tirage et des paramètres.
/// Les options hors bornes sont ramenées silencieusement dans leur
/// intervalle. Seule erreur possible : moins de 30 tirages fournis.
pub fn estimate_next_draw(
    draws: &[Draw],
    number_max: u8,
    options: &PredictionOptions,
) -> Result<PredictionResult> {
    let number_max = number_max.clamp(NUMBER_MAX_MIN, NUMBER_MAX_MAX);
    let number_count = number_max as usize;
    let opts = options.clamped();

    let board = compute_scores(draws, number_max, opts.lookback, opts.recent_window)?;
    let weights = score_to_weights(&board.scores);

    let last_draw_id = draws
        .last()
        .map(|d| d.draw_id)
        .unwrap_or(draws.len() as u32);
    let mut rng = XorShift32::new(derive_seed(last_draw_id, opts.simulations, opts.lookback));

    let aggregate = simulate(&weights, opts.simulations, &mut rng);

    let mut number_probabilities: Vec<NumberProbability> = (0..number_count)
        .map(|idx| NumberProbability {
            number: idx as u8 + NUMBER_MIN,
            probability: aggregate.number_hits[idx] as f64 / opts.simulations as f64,
            score: board.scores[idx],
            frequency: board.frequency[idx],
            recent_frequency: board.recent_frequency[idx],
            gap: board.gap[idx],
        })
        .collect();
    // Tri stable : à probabilité égale, l'ordre croissant des numéros est conservé
    number_probabilities.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });

    let mut combo_entries: Vec<(&String, &u32)> = aggregate.combination_hits.iter().collect();
    // Départage des ex æquo par signature croissante, pour un classement
    // indépendant de l'ordre d'itération de la table
    combo_entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let top_combinations: Vec<CombinationProbability> = combo_entries
        .into_iter()
        .take(opts.top_combinations)
        .map(|(key, &hits)| {
            let probability = hits as f64 / opts.simulations as f64;
            CombinationProbability {
                numbers: parse_combo_key(key),
                probability,
                estimated_odds: format_odds(probability),
                simulated_hits: hits,
            }
        })
        .collect();

    // Sélection marginale : les 6 numéros les plus probables individuellement,
    // qui ne coïncident pas forcément avec la meilleure combinaison simulée
    let mut recommended_numbers: Vec<u8> = number_probabilities
        .iter()
        .take(PICK_COUNT)
        .map(|entry| entry.number)
        .collect();
    recommended_numbers.sort_unstable();

    Ok(PredictionResult {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        number_max,
        draws_used: board.slice_len,
        simulations: opts.simulations,
        confidence_score: compute_confidence(&weights),
        recommended_numbers,
        top_combinations,
        number_probabilities,
    })
}

/// Concentration des poids, mesurée par entropie de Shannon normalisée :
/// 0 quand les poids sont uniformes (aucun signal historique), 100 quand
/// quelques numéros concentrent toute la masse.
fn compute_confidence(weights: &[f64]) -> f64 {
    let entropy: f64 = weights
        .iter()
        .filter(|&&w| w > 0.0)
        .map(|&w| -w * w.ln())
        .sum();
    let normalized = entropy / (weights.len() as f64).ln();
    let concentration = (1.0 - normalized).max(0.0);
    (concentration * 100.0 * 100.0).round() / 100.0
}

/// "1 / 1,234" avec séparateur de milliers, ou "N/A" à probabilité nulle.
fn format_odds(probability: f64) -> String {
    if probability <= 0.0 {
        return "N/A".to_string();
    }
    let one_in = (1.0 / probability).round() as u64;
    format!("1 / {}", group_thousands(one_in))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
