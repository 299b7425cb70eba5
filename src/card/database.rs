use crate::card::types::Card;
use std::collections::HashMap;
use thiserror::Error;

/// Catalog shipped with the binary
const BUILTIN_CARDS: &str = include_str!("../../cards.json");

#[derive(Error, Debug)]
pub enum CardDatabaseError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Card not found: {0}")]
    CardNotFound(String),
    #[error("Invalid card data: {0}")]
    InvalidCard(String),
}

/// Card database that loads cards from JSON
pub struct CardDatabase {
    cards: HashMap<String, Card>,
}

impl CardDatabase {
    /// Load cards from a JSON file
    pub fn from_file(path: &str) -> Result<Self, CardDatabaseError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// The catalog embedded at compile time
    pub fn builtin() -> Result<Self, CardDatabaseError> {
        Self::from_json_str(BUILTIN_CARDS)
    }

    /// Parse and validate a JSON array of cards
    pub fn from_json_str(content: &str) -> Result<Self, CardDatabaseError> {
        let cards_vec: Vec<Card> = serde_json::from_str(content)?;

        let mut cards = HashMap::new();
        for card in cards_vec {
            let name = card.name().to_string();
            if cards.insert(name.clone(), card).is_some() {
                return Err(CardDatabaseError::InvalidCard(format!(
                    "'{}' is defined more than once",
                    name
                )));
            }
        }

        let db = CardDatabase { cards };
        db.validate()?;
        Ok(db)
    }

    /// Get a card by name
    pub fn get_card(&self, name: &str) -> Result<Card, CardDatabaseError> {
        self.cards
            .get(name)
            .cloned()
            .ok_or_else(|| CardDatabaseError::CardNotFound(name.to_string()))
    }

    /// Get all card names, sorted
    pub fn card_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.cards.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Get total number of cards
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Reject empty catalogs and cards whose type has no trigger defaults
    /// but which leave a trigger unspecified
    pub fn validate(&self) -> Result<(), CardDatabaseError> {
        if self.cards.is_empty() {
            return Err(CardDatabaseError::InvalidCard(
                "No cards loaded".to_string(),
            ));
        }
        for name in self.card_names() {
            let card = &self.cards[name];
            if !card.card_type.has_default_triggers() && !card.triggers.overrides_all() {
                return Err(CardDatabaseError::InvalidCard(format!(
                    "{} is a {:?} and must define on_cast, on_noncreature and magecraft triggers",
                    name, card.card_type
                )));
            }
        }
        Ok(())
    }
}
