pub mod database;
pub mod types;

pub use database::{CardDatabase, CardDatabaseError};
pub use types::{Card, CardType, ManaColor, Role, TriggerKind, Triggers};
