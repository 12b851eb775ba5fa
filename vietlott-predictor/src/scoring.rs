use anyhow::{bail, Result};

use vietlott_core::models::{Draw, NUMBER_MIN};

use crate::options::clamp_recent_window;

/// Plancher d'échantillon : en-dessous, aucune estimation n'est tentée.
pub const MIN_DRAWS: usize = 30;

/// Pondérations du score mélangé.
const W_HOT: f64 = 0.50;
const W_TREND: f64 = 0.26;
const W_OVERDUE: f64 = 0.16;
const W_BONUS: f64 = 0.08;
/// Plancher additif : garantit une probabilité d'échantillonnage
/// strictement positive pour chaque numéro.
const SCORE_FLOOR: f64 = 0.01;

/// Signaux bruts et score mélangé par numéro éligible, calculés sur la
/// fenêtre d'analyse. Tous les vecteurs sont indexés par `numéro - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBoard {
    /// Longueur effective de la fenêtre d'analyse (≤ lookback demandé).
    pub slice_len: usize,
    /// Score mélangé, avant normalisation en poids.
    pub scores: Vec<f64>,
    /// Apparitions parmi les 6 numéros principaux.
    pub frequency: Vec<u32>,
    /// Apparitions restreintes à la sous-fenêtre récente.
    pub recent_frequency: Vec<u32>,
    /// Tirages où le numéro est sorti comme bonus.
    pub bonus_frequency: Vec<u32>,
    /// Tirages écoulés depuis la dernière apparition (longueur de la
    /// fenêtre si le numéro n'est jamais sorti).
    pub gap: Vec<u32>,
}

/// Calcule les signaux et le score de chaque numéro de `[1, number_max]`
/// sur les `lookback` derniers tirages. Aucune source d'aléa : le
/// résultat est reproductible au bit près.
pub fn compute_scores(
    draws: &[Draw],
    number_max: u8,
    lookback: usize,
    recent_window: usize,
) -> Result<ScoreBoard> {
    if draws.len() < MIN_DRAWS {
        bail!(
            "Données insuffisantes : au moins {} tirages historiques requis ({} fournis)",
            MIN_DRAWS,
            draws.len()
        );
    }

    let slice = &draws[draws.len().saturating_sub(lookback)..];
    let slice_len = slice.len();
    let recent_window = clamp_recent_window(recent_window, slice_len);

    let count = number_max as usize;
    let mut frequency = vec![0u32; count];
    let mut recent_frequency = vec![0u32; count];
    let mut bonus_frequency = vec![0u32; count];
    let mut last_seen: Vec<Option<usize>> = vec![None; count];

    for (draw_index, draw) in slice.iter().enumerate() {
        let is_recent = draw_index >= slice_len - recent_window.min(slice_len);

        for &value in &draw.numbers {
            if value < NUMBER_MIN || value > number_max {
                continue;
            }
            let idx = (value - NUMBER_MIN) as usize;
            frequency[idx] += 1;
            last_seen[idx] = Some(draw_index);
            if is_recent {
                recent_frequency[idx] += 1;
            }
        }

        if let Some(bonus) = draw.bonus {
            if bonus >= NUMBER_MIN && bonus <= number_max {
                bonus_frequency[(bonus - NUMBER_MIN) as usize] += 1;
            }
        }
    }

    let max_frequency = frequency.iter().copied().max().unwrap_or(0);
    let max_recent = recent_frequency.iter().copied().max().unwrap_or(0);
    let max_bonus = bonus_frequency.iter().copied().max().unwrap_or(0);

    // Un tiers de la fenêtre : au-delà, le score de retard sature à 1
    let overdue_horizon = ((slice_len as f64 / 3.0).round()).max(1.0);

    let mut scores = vec![0.0f64; count];
    let mut gap = vec![0u32; count];

    for idx in 0..count {
        let hot_score = max_normalize(frequency[idx], max_frequency);
        let trend_score = max_normalize(recent_frequency[idx], max_recent);
        let bonus_score = max_normalize(bonus_frequency[idx], max_bonus);

        let missing_draws = match last_seen[idx] {
            Some(seen) => (slice_len - 1 - seen) as u32,
            None => slice_len as u32,
        };
        let overdue_score = (missing_draws as f64 / overdue_horizon).min(1.0);

        gap[idx] = missing_draws;
        scores[idx] = hot_score * W_HOT
            + trend_score * W_TREND
            + overdue_score * W_OVERDUE
            + bonus_score * W_BONUS
            + SCORE_FLOOR;
    }

    Ok(ScoreBoard {
        slice_len,
        scores,
        frequency,
        recent_frequency,
        bonus_frequency,
        gap,
    })
}

/// Normalisation par le maximum du signal ; un signal dont le maximum
/// est nul contribue 0 pour tous les numéros (pas de division par zéro).
fn max_normalize(value: u32, max: u32) -> f64 {
    if max > 0 {
        value as f64 / max as f64
    } else {
        0.0
    }
}

/// Normalise les scores en vecteur de poids de somme 1.
/// Repli uniforme si le total est nul.
pub fn score_to_weights(scores: &[f64]) -> Vec<f64> {
    let total: f64 = scores.iter().sum();
    if total <= 0.0 {
        return vec![1.0 / scores.len() as f64; scores.len()];
    }
    scores.iter().map(|s| s / total).collect()
}
