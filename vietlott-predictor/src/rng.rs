/// Générateur xorshift 32 bits à état explicite.
///
/// La séquence ne dépend que du seed : deux appels du moteur avec les
/// mêmes paramètres et le même historique produisent exactement les
/// mêmes tirages simulés, ce qui rend les résultats auditables et
/// comparables d'une exécution à l'autre.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Flottant uniforme dans [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / 4_294_967_296.0
    }
}

/// Seed dérivé des paramètres de la requête : id du dernier tirage,
/// nombre de simulations et taille de fenêtre, tronqué à 32 bits.
pub fn derive_seed(last_draw_id: u32, simulations: usize, lookback: usize) -> u32 {
    (last_draw_id as u64)
        .wrapping_mul(9973)
        .wrapping_add(simulations as u64 * 11)
        .wrapping_add(lookback as u64 * 3) as u32
}
