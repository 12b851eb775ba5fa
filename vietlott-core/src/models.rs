use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Plus petit numéro jouable, quel que soit le jeu.
pub const NUMBER_MIN: u8 = 1;

/// Nombre de numéros principaux par tirage.
pub const PICK_COUNT: usize = 6;

/// Un tirage historique normalisé : 6 numéros principaux distincts,
/// plus un numéro bonus optionnel (Power 6/55 uniquement).
/// Les tirages sont toujours fournis triés par `draw_id` croissant,
/// le dernier élément étant le tirage le plus récent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub draw_id: u32,
    pub date: String,
    pub numbers: [u8; 6],
    pub bonus: Option<u8>,
}

impl Draw {
    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }
}

/// Valide une combinaison principale et son bonus éventuel pour un
/// domaine `[1, number_max]` donné.
pub fn validate_numbers(numbers: &[u8; 6], bonus: Option<u8>, number_max: u8) -> Result<()> {
    for &n in numbers {
        if n < NUMBER_MIN || n > number_max {
            bail!("Numéro {} hors limites (1-{})", n, number_max);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    if let Some(b) = bonus {
        if b < NUMBER_MIN || b > number_max {
            bail!("Bonus {} hors limites (1-{})", b, number_max);
        }
    }
    Ok(())
}

/// Historique synthétique cyclique : chaque numéro du domaine apparaît
/// à fréquence égale (6 numéros consécutifs modulo `number_max` par tirage).
pub fn make_test_draws(n: usize, number_max: u8) -> Vec<Draw> {
    let count = number_max as usize;
    (0..n)
        .map(|i| {
            let mut numbers = [0u8; 6];
            for (k, slot) in numbers.iter_mut().enumerate() {
                *slot = ((i * 6 + k) % count) as u8 + NUMBER_MIN;
            }
            numbers.sort_unstable();
            Draw {
                draw_id: (i + 1) as u32,
                date: format!("2024-{:02}-{:02}", (i / 28) % 12 + 1, i % 28 + 1),
                numbers,
                bonus: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_numbers_ok() {
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6], None, 45).is_ok());
        assert!(validate_numbers(&[50, 51, 52, 53, 54, 55], Some(1), 55).is_ok());
    }

    #[test]
    fn test_validate_numbers_out_of_range() {
        assert!(validate_numbers(&[0, 2, 3, 4, 5, 6], None, 45).is_err());
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 46], None, 45).is_err());
    }

    #[test]
    fn test_validate_numbers_duplicate() {
        assert!(validate_numbers(&[1, 1, 3, 4, 5, 6], None, 45).is_err());
    }

    #[test]
    fn test_validate_bonus_out_of_range() {
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6], Some(56), 55).is_err());
        assert!(validate_numbers(&[1, 2, 3, 4, 5, 6], Some(0), 55).is_err());
    }

    #[test]
    fn test_make_test_draws_shape() {
        let draws = make_test_draws(30, 45);
        assert_eq!(draws.len(), 30);
        for (i, d) in draws.iter().enumerate() {
            assert_eq!(d.draw_id, (i + 1) as u32);
            assert!(validate_numbers(&d.numbers, d.bonus, 45).is_ok());
            assert!(d.numbers.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_make_test_draws_uniform_coverage() {
        // Sur 45 tirages cycliques, chaque numéro de 1 à 45 sort exactement 6 fois
        let draws = make_test_draws(45, 45);
        for n in 1..=45u8 {
            let freq = draws.iter().filter(|d| d.contains(n)).count();
            assert_eq!(freq, 6, "numéro {} : fréquence {}", n, freq);
        }
    }
}
