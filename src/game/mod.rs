pub mod mana;
pub mod zones;

pub use mana::{ManaParseError, ManaPool, Resources};
pub use zones::{Board, GameError, Permanent};
