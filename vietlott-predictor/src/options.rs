/// Bornes de validité des options numériques. Toute valeur hors bornes
/// est ramenée silencieusement dans l'intervalle : jamais d'erreur.
pub const LOOKBACK_MIN: usize = 30;
pub const LOOKBACK_MAX: usize = 2500;
pub const SIMULATIONS_MIN: usize = 1000;
pub const SIMULATIONS_MAX: usize = 120_000;
pub const TOP_COMBINATIONS_MIN: usize = 1;
pub const TOP_COMBINATIONS_MAX: usize = 30;
pub const RECENT_WINDOW_MIN: usize = 10;

/// Options de prédiction. Configuration pure, sans état entre deux appels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionOptions {
    /// Nombre de tirages récents pris en compte pour le scoring.
    pub lookback: usize,
    /// Nombre de tirages Monte Carlo simulés.
    pub simulations: usize,
    /// Nombre de combinaisons les plus fréquentes à rapporter.
    pub top_combinations: usize,
    /// Sous-fenêtre récente pour le signal de tendance.
    pub recent_window: usize,
}

impl Default for PredictionOptions {
    fn default() -> Self {
        Self {
            lookback: 300,
            simulations: 25_000,
            top_combinations: 10,
            recent_window: 45,
        }
    }
}

impl PredictionOptions {
    /// Ramène lookback, simulations et top_combinations dans leurs bornes.
    /// `recent_window` dépend de la longueur de la fenêtre d'analyse et
    /// n'est bornée qu'au moment du scoring.
    pub fn clamped(&self) -> PredictionOptions {
        PredictionOptions {
            lookback: self.lookback.clamp(LOOKBACK_MIN, LOOKBACK_MAX),
            simulations: self.simulations.clamp(SIMULATIONS_MIN, SIMULATIONS_MAX),
            top_combinations: self
                .top_combinations
                .clamp(TOP_COMBINATIONS_MIN, TOP_COMBINATIONS_MAX),
            recent_window: self.recent_window,
        }
    }
}

/// Borne `recent_window` à `[10, max(10, slice_len)]`.
pub(crate) fn clamp_recent_window(recent_window: usize, slice_len: usize) -> usize {
    recent_window.clamp(RECENT_WINDOW_MIN, slice_len.max(RECENT_WINDOW_MIN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_saturates_low() {
        let opts = PredictionOptions {
            lookback: 0,
            simulations: 0,
            top_combinations: 0,
            recent_window: 0,
        }
        .clamped();
        assert_eq!(opts.lookback, LOOKBACK_MIN);
        assert_eq!(opts.simulations, SIMULATIONS_MIN);
        assert_eq!(opts.top_combinations, TOP_COMBINATIONS_MIN);
    }

    #[test]
    fn test_clamped_saturates_high() {
        let opts = PredictionOptions {
            lookback: 1_000_000,
            simulations: 1_000_000,
            top_combinations: 1_000,
            recent_window: 45,
        }
        .clamped();
        assert_eq!(opts.lookback, LOOKBACK_MAX);
        assert_eq!(opts.simulations, SIMULATIONS_MAX);
        assert_eq!(opts.top_combinations, TOP_COMBINATIONS_MAX);
    }

    #[test]
    fn test_clamped_keeps_valid_values() {
        let opts = PredictionOptions::default().clamped();
        assert_eq!(opts, PredictionOptions::default());
    }

    #[test]
    fn test_clamp_recent_window() {
        assert_eq!(clamp_recent_window(45, 300), 45);
        assert_eq!(clamp_recent_window(45, 30), 30);
        assert_eq!(clamp_recent_window(0, 300), 10);
        // Fenêtre d'analyse plus courte que le minimum : la borne haute reste 10
        assert_eq!(clamp_recent_window(500, 8), 10);
    }
}
