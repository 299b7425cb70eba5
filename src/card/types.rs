use crate::game::mana::Resources;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mana colors in Magic: The Gathering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaColor {
    #[serde(rename = "W")]
    White,
    #[serde(rename = "U")]
    Blue,
    #[serde(rename = "B")]
    Black,
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "G")]
    Green,
    #[serde(rename = "C")]
    Colorless,
}

impl ManaColor {
    pub const ALL: [ManaColor; 6] = [
        ManaColor::White,
        ManaColor::Blue,
        ManaColor::Black,
        ManaColor::Red,
        ManaColor::Green,
        ManaColor::Colorless,
    ];

    /// Parse a single mana symbol, case-insensitive
    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'W' => Some(ManaColor::White),
            'U' => Some(ManaColor::Blue),
            'B' => Some(ManaColor::Black),
            'R' => Some(ManaColor::Red),
            'G' => Some(ManaColor::Green),
            'C' => Some(ManaColor::Colorless),
            _ => None,
        }
    }
}

/// Card types relevant to the combo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Creature,
    Instant,
    Sorcery,
    Enchantment,
    Artifact,
}

impl CardType {
    pub fn is_creature(&self) -> bool {
        matches!(self, CardType::Creature)
    }

    pub fn is_instant_or_sorcery(&self) -> bool {
        matches!(self, CardType::Instant | CardType::Sorcery)
    }

    /// Creatures, instants and sorceries fall back to "no effect" for triggers
    /// they don't override. Every other type must spell out all of its triggers.
    pub fn has_default_triggers(&self) -> bool {
        matches!(self, CardType::Creature | CardType::Instant | CardType::Sorcery)
    }
}

/// Capability tags the engine looks at, independent of the card's name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Flips a coin for each spell cast: heads copies it, tails returns it to hand
    CopyEnabler,
    /// Makes the enabler trigger one additional time
    Enhancer,
}

/// The three trigger conditions a permanent can care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    OnCast,
    OnNonCreature,
    Magecraft,
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::OnCast => write!(f, "on-cast"),
            TriggerKind::OnNonCreature => write!(f, "non-creature"),
            TriggerKind::Magecraft => write!(f, "magecraft"),
        }
    }
}

/// Trigger overrides. `None` means the card doesn't say, and the card type's
/// default applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Triggers {
    #[serde(default)]
    pub on_cast: Option<Resources>,
    #[serde(default)]
    pub on_noncreature: Option<Resources>,
    #[serde(default)]
    pub magecraft: Option<Resources>,
}

impl Triggers {
    pub fn get(&self, kind: TriggerKind) -> Option<&Resources> {
        match kind {
            TriggerKind::OnCast => self.on_cast.as_ref(),
            TriggerKind::OnNonCreature => self.on_noncreature.as_ref(),
            TriggerKind::Magecraft => self.magecraft.as_ref(),
        }
    }

    pub fn overrides_all(&self) -> bool {
        self.on_cast.is_some() && self.on_noncreature.is_some() && self.magecraft.is_some()
    }
}

/// Static card definition, as found in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    pub name: String,
    pub card_type: CardType,
    #[serde(default)]
    pub cost: Vec<ManaColor>,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub output: Resources,
    #[serde(default)]
    pub triggers: Triggers,
}

impl Card {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Cost expressed as a pool so it can be compared against one
    pub fn cost_pool(&self) -> Resources {
        Resources::from_colors(&self.cost)
    }
}
