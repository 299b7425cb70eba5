use crate::card::{CardDatabase, CardDatabaseError};
use crate::game::zones::Board;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid board format at line {line}: {reason}")]
    InvalidFormat { line: usize, reason: String },
    #[error("Line {line}: {name} is an instant or sorcery and can't be on the board")]
    NotAPermanent { line: usize, name: String },
    #[error("Card database error: {0}")]
    DatabaseError(#[from] CardDatabaseError),
}

/// Parse a board file into permanents in play
pub fn parse_board_file(path: &str, database: &CardDatabase) -> Result<Board, BoardError> {
    let content = std::fs::read_to_string(path)?;
    parse_board(&content, database)
}

/// Format: "1 Card Name" per line, supports comments with # or //
pub fn parse_board(content: &str, database: &CardDatabase) -> Result<Board, BoardError> {
    let mut cards = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let trimmed = line.trim();

        // Skip empty lines and comments
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }

        // Parse "N Card Name" format, count separated by any whitespace
        let Some((count_str, card_name)) = trimmed.split_once(char::is_whitespace) else {
            return Err(BoardError::InvalidFormat {
                line: line_num + 1,
                reason: "Expected format: 'COUNT CARD_NAME'".to_string(),
            });
        };
        let card_name = card_name.trim();

        let count: usize = count_str.parse().map_err(|_| BoardError::InvalidFormat {
            line: line_num + 1,
            reason: format!("'{}' is not a valid number", count_str),
        })?;

        let card = database.get_card(card_name)?;
        if card.card_type.is_instant_or_sorcery() {
            return Err(BoardError::NotAPermanent {
                line: line_num + 1,
                name: card_name.to_string(),
            });
        }

        for _ in 0..count {
            cards.push(card.clone());
        }
    }

    Ok(Board::from_cards(cards))
}
