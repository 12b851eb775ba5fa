use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use vietlott_core::games::Game;
use vietlott_core::models::{validate_numbers, Draw, NUMBER_MIN, PICK_COUNT};

/// Ligne brute du flux JSONL vietlott-data :
/// `{"date": "2024-01-02", "id": "01001", "result": [4, 12, 23, 30, 41, 53, 7]}`.
/// Les 6 premiers numéros sont les numéros principaux ; le 7e, s'il est
/// présent et que le jeu a un bonus, est le numéro bonus.
#[derive(Debug, Deserialize)]
struct SourceRow {
    id: String,
    date: String,
    result: Vec<i64>,
}

fn parse_row(game: Game, line: &str) -> Result<Draw> {
    let row: SourceRow =
        serde_json::from_str(line).context("Ligne JSONL illisible")?;

    if row.id.is_empty() || !row.id.chars().all(|c| c.is_ascii_digit()) {
        bail!("Id de tirage invalide : '{}'", row.id);
    }
    let draw_id: u32 = row
        .id
        .parse()
        .with_context(|| format!("Id de tirage hors capacité : '{}'", row.id))?;

    NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
        .with_context(|| format!("Date invalide : '{}'", row.date))?;

    let number_max = game.number_max();
    if row.result.len() < PICK_COUNT {
        bail!(
            "Résultat incomplet : {} numéros (6 attendus)",
            row.result.len()
        );
    }

    let max_result_count = if game.has_bonus() { 7 } else { 6 };
    let mut values = Vec::with_capacity(max_result_count);
    for &raw in row.result.iter().take(max_result_count) {
        if raw < NUMBER_MIN as i64 || raw > number_max as i64 {
            bail!("Numéro hors limites : {}", raw);
        }
        values.push(raw as u8);
    }

    let mut numbers = [0u8; 6];
    numbers.copy_from_slice(&values[..PICK_COUNT]);
    numbers.sort_unstable();

    let bonus = if game.has_bonus() && values.len() > PICK_COUNT {
        Some(values[PICK_COUNT])
    } else {
        None
    };

    validate_numbers(&numbers, bonus, number_max)?;

    Ok(Draw {
        draw_id,
        date: row.date,
        numbers,
        bonus,
    })
}

/// Parse un flux JSONL complet : une ligne = un tirage, dédupliqué par
/// id (la dernière occurrence gagne), trié par id croissant — la forme
/// exacte attendue par le moteur.
pub fn parse_jsonl(game: Game, text: &str) -> Result<Vec<Draw>> {
    let mut dedupe: HashMap<u32, Draw> = HashMap::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let draw = parse_row(game, line).with_context(|| format!("Ligne {}", index + 1))?;
        dedupe.insert(draw.draw_id, draw);
    }

    let mut draws: Vec<Draw> = dedupe.into_values().collect();
    draws.sort_by_key(|d| d.draw_id);
    Ok(draws)
}

pub fn load_draws(game: Game, path: &Path) -> Result<Vec<Draw>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {:?}", path))?;
    let draws = parse_jsonl(game, &text)?;
    if draws.is_empty() {
        bail!("Aucun tirage dans {:?}", path);
    }
    Ok(draws)
}

/// Valide une grille saisie à la main : exactement 6 numéros distincts
/// du domaine du jeu, retournés triés.
pub fn parse_grid(game: Game, numbers: &[u8]) -> Result<[u8; 6]> {
    if numbers.len() != PICK_COUNT {
        bail!("Attendu 6 numéros, reçu {}", numbers.len());
    }
    let mut grid = [0u8; 6];
    grid.copy_from_slice(numbers);
    grid.sort_unstable();
    validate_numbers(&grid, None, game.number_max())?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_655: &str = concat!(
        r#"{"date": "2024-01-04", "id": "01002", "result": [1, 9, 18, 27, 36, 45, 54]}"#,
        "\n",
        r#"{"date": "2024-01-02", "id": "01001", "result": [4, 12, 23, 30, 41, 53, 7]}"#,
        "\n",
    );

    #[test]
    fn test_parse_jsonl_sorted_ascending() {
        let draws = parse_jsonl(Game::Power655, SAMPLE_655).unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].draw_id, 1001);
        assert_eq!(draws[1].draw_id, 1002);
        assert_eq!(draws[0].numbers, [4, 12, 23, 30, 41, 53]);
        assert_eq!(draws[0].bonus, Some(7));
    }

    #[test]
    fn test_parse_jsonl_dedupe_by_id() {
        let text = concat!(
            r#"{"date": "2024-01-02", "id": "01001", "result": [1, 2, 3, 4, 5, 6, 7]}"#,
            "\n",
            r#"{"date": "2024-01-02", "id": "01001", "result": [8, 9, 10, 11, 12, 13, 14]}"#,
            "\n",
        );
        let draws = parse_jsonl(Game::Power655, text).unwrap();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].numbers, [8, 9, 10, 11, 12, 13]);
    }

    #[test]
    fn test_parse_jsonl_mega_ignores_seventh_number() {
        let text = r#"{"date": "2024-01-02", "id": "00042", "result": [4, 12, 23, 30, 41, 44, 7]}"#;
        let draws = parse_jsonl(Game::Mega645, text).unwrap();
        assert_eq!(draws[0].bonus, None);
    }

    #[test]
    fn test_parse_jsonl_main_numbers_sorted() {
        let text = r#"{"date": "2024-01-02", "id": "00001", "result": [41, 4, 23, 12, 30, 9]}"#;
        let draws = parse_jsonl(Game::Mega645, text).unwrap();
        assert_eq!(draws[0].numbers, [4, 9, 12, 23, 30, 41]);
    }

    #[test]
    fn test_parse_jsonl_rejects_bad_lines() {
        for text in [
            r#"{"date": "2024-01-02", "id": "abc", "result": [1, 2, 3, 4, 5, 6]}"#,
            r#"{"date": "02/01/2024", "id": "00001", "result": [1, 2, 3, 4, 5, 6]}"#,
            r#"{"date": "2024-01-02", "id": "00001", "result": [1, 2, 3, 4, 5]}"#,
            r#"{"date": "2024-01-02", "id": "00001", "result": [1, 2, 3, 4, 5, 99]}"#,
            r#"{"date": "2024-01-02", "id": "00001", "result": [1, 1, 3, 4, 5, 6]}"#,
            "pas du json",
        ] {
            assert!(
                parse_jsonl(Game::Mega645, text).is_err(),
                "aurait dû échouer : {}",
                text
            );
        }
    }

    #[test]
    fn test_parse_jsonl_skips_blank_lines() {
        let text = format!("\n{}\n\n", SAMPLE_655);
        let draws = parse_jsonl(Game::Power655, &text).unwrap();
        assert_eq!(draws.len(), 2);
    }

    #[test]
    fn test_parse_grid() {
        assert_eq!(
            parse_grid(Game::Mega645, &[41, 4, 23, 12, 30, 9]).unwrap(),
            [4, 9, 12, 23, 30, 41]
        );
        assert!(parse_grid(Game::Mega645, &[1, 2, 3, 4, 5]).is_err());
        assert!(parse_grid(Game::Mega645, &[1, 2, 3, 4, 5, 46]).is_err());
        assert!(parse_grid(Game::Mega645, &[1, 1, 3, 4, 5, 6]).is_err());
    }
}
