use std::collections::HashMap;

use vietlott_core::models::{NUMBER_MIN, PICK_COUNT};

use crate::rng::XorShift32;

/// Compteurs accumulés sur la boucle de simulation, jetés après l'appel.
#[derive(Debug, Clone)]
pub struct SimulationAggregate {
    /// Apparitions de chaque numéro dans les tirages simulés (indexé par `numéro - 1`).
    pub number_hits: Vec<u32>,
    /// Apparitions de chaque combinaison, indexées par signature triée.
    pub combination_hits: HashMap<String, u32>,
}

/// Signature canonique d'une combinaison : numéros triés, sur deux
/// chiffres, joints par des tirets ("01-05-12-23-34-55").
pub fn combo_key(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join("-")
}

pub fn parse_combo_key(key: &str) -> Vec<u8> {
    key.split('-').filter_map(|part| part.parse().ok()).collect()
}

/// Tire 6 numéros distincts pondérés par `weights`, sans remise.
///
/// La réserve de candidats rétrécit à chaque sélection et conserve son
/// ordre (retrait par décalage, pas par échange) : le parcours linéaire
/// visite toujours les numéros en ordre croissant, et l'entrée
/// sélectionnée en cas de dépassement flottant du marqueur est la
/// dernière parcourue. Ce départage est arbitraire mais reproductible.
pub fn sample_combination(weights: &[f64], rng: &mut XorShift32) -> Vec<u8> {
    let mut available: Vec<(u8, f64)> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| (i as u8 + NUMBER_MIN, w))
        .collect();
    let mut picked = Vec::with_capacity(PICK_COUNT);

    for _ in 0..PICK_COUNT {
        let total: f64 = available.iter().map(|(_, w)| w).sum();
        let mut marker = rng.next_f64() * total;
        let mut selected = available.len() - 1;

        for (i, (_, w)) in available.iter().enumerate() {
            marker -= w;
            if marker <= 0.0 {
                selected = i;
                break;
            }
        }

        let (number, _) = available.remove(selected);
        picked.push(number);
    }

    picked.sort_unstable();
    picked
}

/// Boucle Monte Carlo : `simulations` tirages indépendants de 6 numéros,
/// agrégés par numéro et par signature de combinaison.
///
/// Coût dominant du moteur : O(simulations × 6 × number_max) avec le
/// parcours linéaire par sélection. Acceptable aux bornes actuelles
/// (120 000 × 99) ; passer à un échantillonneur indexé si elles montent.
pub fn simulate(
    weights: &[f64],
    simulations: usize,
    rng: &mut XorShift32,
) -> SimulationAggregate {
    let mut number_hits = vec![0u32; weights.len()];
    let mut combination_hits: HashMap<String, u32> = HashMap::new();

    for _ in 0..simulations {
        let sampled = sample_combination(weights, rng);

        for &value in &sampled {
            number_hits[(value - NUMBER_MIN) as usize] += 1;
        }

        *combination_hits.entry(combo_key(&sampled)).or_insert(0) += 1;
    }

    SimulationAggregate {
        number_hits,
        combination_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_weights(n: usize) -> Vec<f64> {
        vec![1.0 / n as f64; n]
    }

    #[test]
    fn test_combo_key_zero_padded() {
        assert_eq!(combo_key(&[1, 5, 12, 23, 34, 55]), "01-05-12-23-34-55");
    }

    #[test]
    fn test_parse_combo_key_round_trip() {
        let numbers = vec![3u8, 7, 19, 28, 41, 45];
        assert_eq!(parse_combo_key(&combo_key(&numbers)), numbers);
    }

    #[test]
    fn test_sample_combination_distinct_sorted() {
        let weights = uniform_weights(45);
        let mut rng = XorShift32::new(42);
        for _ in 0..500 {
            let combo = sample_combination(&weights, &mut rng);
            assert_eq!(combo.len(), PICK_COUNT);
            assert!(combo.windows(2).all(|w| w[0] < w[1]), "combo {:?}", combo);
            assert!(combo.iter().all(|&n| (1..=45).contains(&n)));
        }
    }

    #[test]
    fn test_sample_combination_deterministic() {
        let weights = uniform_weights(55);
        let mut a = XorShift32::new(777);
        let mut b = XorShift32::new(777);
        for _ in 0..100 {
            assert_eq!(
                sample_combination(&weights, &mut a),
                sample_combination(&weights, &mut b)
            );
        }
    }

    #[test]
    fn test_sample_combination_zero_seed_degenerate() {
        // Un état xorshift nul reste nul : le marqueur vaut toujours 0 et
        // le parcours sélectionne les 6 premiers numéros. Pas de panique.
        let weights = uniform_weights(45);
        let mut rng = XorShift32::new(0);
        assert_eq!(sample_combination(&weights, &mut rng), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_heavy_weight_dominates() {
        // Un numéro porte 99% de la masse : il doit sortir presque toujours
        let mut weights = vec![0.01 / 44.0; 45];
        weights[21] = 0.99;
        let mut rng = XorShift32::new(9);
        let agg = simulate(&weights, 2000, &mut rng);
        assert!(
            agg.number_hits[21] > 1900,
            "hits = {}",
            agg.number_hits[21]
        );
    }

    #[test]
    fn test_simulate_counts_consistent() {
        let weights = uniform_weights(45);
        let mut rng = XorShift32::new(31_337);
        let simulations = 1500;
        let agg = simulate(&weights, simulations, &mut rng);

        let total_number_hits: u32 = agg.number_hits.iter().sum();
        assert_eq!(total_number_hits, (simulations * PICK_COUNT) as u32);

        let total_combo_hits: u32 = agg.combination_hits.values().sum();
        assert_eq!(total_combo_hits, simulations as u32);
    }

    #[test]
    fn test_simulate_keys_are_valid_combos() {
        let weights = uniform_weights(55);
        let mut rng = XorShift32::new(55);
        let agg = simulate(&weights, 200, &mut rng);
        for key in agg.combination_hits.keys() {
            let numbers = parse_combo_key(key);
            assert_eq!(numbers.len(), PICK_COUNT);
            assert!(numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
