/// Catalogue des jeux Vietlott supportés.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Game {
    /// Power 6/55 : 6 numéros parmi 55, plus un numéro bonus.
    Power655,
    /// Mega 6/45 : 6 numéros parmi 45, sans bonus.
    Mega645,
}

impl Game {
    pub fn number_max(&self) -> u8 {
        match self {
            Game::Power655 => 55,
            Game::Mega645 => 45,
        }
    }

    pub fn has_bonus(&self) -> bool {
        match self {
            Game::Power655 => true,
            Game::Mega645 => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Game::Power655 => "Power 6/55",
            Game::Mega645 => "Mega 6/45",
        }
    }

    pub fn all() -> [Game; 2] {
        [Game::Power655, Game::Mega645]
    }

    /// Reconnaît les alias usuels ("655", "power655", "mega645", "6x55"...).
    /// Une valeur vide désigne le jeu par défaut (Power 6/55).
    pub fn parse(value: &str) -> Option<Game> {
        let normalized: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "" => Some(Game::Power655),
            "655" | "power655" | "power6x55" | "six55" => Some(Game::Power655),
            "645" | "power645" | "mega645" | "mega6x45" | "six45" => Some(Game::Mega645),
            _ => None,
        }
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config() {
        assert_eq!(Game::Power655.number_max(), 55);
        assert!(Game::Power655.has_bonus());
        assert_eq!(Game::Mega645.number_max(), 45);
        assert!(!Game::Mega645.has_bonus());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Game::parse("655"), Some(Game::Power655));
        assert_eq!(Game::parse("Power 6/55"), Some(Game::Power655));
        assert_eq!(Game::parse("mega645"), Some(Game::Mega645));
        assert_eq!(Game::parse("645"), Some(Game::Mega645));
        assert_eq!(Game::parse(""), Some(Game::Power655));
        assert_eq!(Game::parse("loto"), None);
    }
}
