use crate::card::{Card, Role, TriggerKind};
use crate::game::mana::Resources;
use log::{debug, warn};
use thiserror::Error;

/// Errors raised while evaluating cards during the combo
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A card whose type has no default trigger behavior didn't say what
    /// this trigger does. That's a hole in the card data, not "no effect".
    #[error("{card} does not implement its {trigger} trigger")]
    UnimplementedTrigger { card: String, trigger: TriggerKind },
}

/// A card instance with location state: either the spell being cast or a
/// permanent sitting on the board
#[derive(Debug, Clone)]
pub struct Permanent {
    pub card: Card,
    cost: Resources,
    in_hand: bool,
}

impl Permanent {
    /// A card that starts in hand, ready to be cast
    pub fn new(card: Card) -> Self {
        let cost = card.cost_pool();
        Permanent { card, cost, in_hand: true }
    }

    /// A card that is already in play
    pub fn in_play(card: Card) -> Self {
        Permanent { in_hand: false, ..Permanent::new(card) }
    }

    pub fn name(&self) -> &str {
        self.card.name()
    }

    pub fn cost(&self) -> &Resources {
        &self.cost
    }

    pub fn in_hand(&self) -> bool {
        self.in_hand
    }

    pub fn is_creature(&self) -> bool {
        self.card.card_type.is_creature()
    }

    pub fn is_noncreature(&self) -> bool {
        !self.is_creature()
    }

    pub fn is_instant_or_sorcery(&self) -> bool {
        self.card.card_type.is_instant_or_sorcery()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.card.has_role(role)
    }

    /// Casting a spell means removing it from the hand
    pub fn cast(&mut self) {
        self.in_hand = false;
    }

    /// The spell's output, or nothing if it went back to hand before resolving
    pub fn resolve(&self) -> Resources {
        if self.in_hand {
            debug!("{} is in hand and does NOT resolve.", self.name());
            return Resources::empty();
        }
        debug!("{} resolves.", self.name());
        self.card.output
    }

    /// A copy resolves regardless of where the original is
    pub fn copy(&self) -> Resources {
        debug!("Copied {}", self.name());
        self.card.output
    }

    /// Return the card to hand. Creatures can't be returned this way.
    pub fn bounce(&mut self) {
        if self.is_creature() {
            warn!("Can't return creature {} to hand.", self.name());
            return;
        }
        if self.in_hand {
            debug!("{} already in hand.", self.name());
            return;
        }
        debug!("Returned {} to hand.", self.name());
        self.in_hand = true;
    }

    /// Evaluate one trigger hook. Creatures, instants and sorceries that
    /// don't override it produce nothing; anything else is a data error.
    pub fn trigger(&self, kind: TriggerKind) -> Result<Resources, GameError> {
        match self.card.triggers.get(kind) {
            Some(delta) => {
                debug!("Triggered {} trigger from {}", kind, self.name());
                Ok(*delta)
            }
            None if self.card.card_type.has_default_triggers() => Ok(Resources::empty()),
            None => Err(GameError::UnimplementedTrigger {
                card: self.name().to_string(),
                trigger: kind,
            }),
        }
    }

    /// Trigger when any spell is cast
    pub fn trigger_on_cast(&self) -> Result<Resources, GameError> {
        self.trigger(TriggerKind::OnCast)
    }

    /// Trigger when a non-creature spell is cast
    pub fn trigger_on_noncreature(&self) -> Result<Resources, GameError> {
        self.trigger(TriggerKind::OnNonCreature)
    }

    /// Trigger when an instant or sorcery is cast or copied
    pub fn trigger_magecraft(&self) -> Result<Resources, GameError> {
        self.trigger(TriggerKind::Magecraft)
    }
}

/// Permanents in play, in a stable order
#[derive(Debug, Clone, Default)]
pub struct Board {
    permanents: Vec<Permanent>,
}

impl Board {
    pub fn new() -> Self {
        Board { permanents: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Board {
            permanents: cards.into_iter().map(Permanent::in_play).collect(),
        }
    }

    pub fn permanents(&self) -> &[Permanent] {
        &self.permanents
    }

    pub fn len(&self) -> usize {
        self.permanents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permanents.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.permanents.iter().map(|p| p.name()).collect()
    }

    /// Sum one trigger over every permanent on the board
    pub fn trigger_all(&self, kind: TriggerKind) -> Result<Resources, GameError> {
        self.permanents.iter().try_fold(Resources::empty(), |acc, permanent| {
            debug!("Checking {} for {} trigger", permanent.name(), kind);
            Ok(acc + permanent.trigger(kind)?)
        })
    }

    pub fn has_copy_enabler(&self) -> bool {
        self.permanents.iter().any(|p| p.has_role(Role::CopyEnabler))
    }

    pub fn enhancer_count(&self) -> usize {
        self.permanents.iter().filter(|p| p.has_role(Role::Enhancer)).count()
    }

    /// Coin flips each cast gets: one for the enabler plus one per enhancer,
    /// or none at all without an enabler
    pub fn flips_per_cast(&self) -> usize {
        if self.has_copy_enabler() {
            1 + self.enhancer_count()
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardType, ManaColor, Triggers};

    fn card(name: &str, card_type: CardType) -> Card {
        Card {
            name: name.to_string(),
            card_type,
            cost: vec![],
            roles: vec![],
            output: Resources::empty(),
            triggers: Triggers::default(),
        }
    }

    fn rite() -> Card {
        Card {
            cost: vec![ManaColor::Red],
            output: Resources::from_colors(&[ManaColor::Red, ManaColor::Red]),
            ..card("Rite of Flame", CardType::Sorcery)
        }
    }

    #[test]
    fn test_cast_takes_spell_out_of_hand() {
        let mut spell = Permanent::new(rite());
        assert!(spell.in_hand());
        spell.cast();
        assert!(!spell.in_hand());
        assert_eq!(spell.cost().mana.red, 1);
    }

    #[test]
    fn test_resolve_in_hand_yields_nothing() {
        let spell = Permanent::new(rite());
        assert!(spell.resolve().is_empty());
    }

    #[test]
    fn test_resolve_after_cast_yields_output() {
        let mut spell = Permanent::new(rite());
        spell.cast();
        assert_eq!(spell.resolve().mana.red, 2);
    }

    #[test]
    fn test_copy_ignores_location() {
        let spell = Permanent::new(rite());
        assert_eq!(spell.copy().mana.red, 2);
        assert!(spell.in_hand());
    }

    #[test]
    fn test_bounce_returns_spell_to_hand() {
        let mut spell = Permanent::new(rite());
        spell.cast();
        spell.bounce();
        assert!(spell.in_hand());
        spell.bounce();
        assert!(spell.in_hand());
    }

    #[test]
    fn test_bounce_never_moves_creature() {
        let mut in_hand = Permanent::new(card("Krark", CardType::Creature));
        in_hand.bounce();
        assert!(in_hand.in_hand());

        let mut cast = Permanent::new(card("Krark", CardType::Creature));
        cast.cast();
        cast.bounce();
        assert!(!cast.in_hand());
    }

    #[test]
    fn test_default_triggers_are_empty() {
        for card_type in [CardType::Creature, CardType::Instant, CardType::Sorcery] {
            let permanent = Permanent::in_play(card("Plain", card_type));
            assert_eq!(permanent.trigger_on_cast(), Ok(Resources::empty()));
            assert_eq!(permanent.trigger_on_noncreature(), Ok(Resources::empty()));
            assert_eq!(permanent.trigger_magecraft(), Ok(Resources::empty()));
        }
    }

    #[test]
    fn test_missing_trigger_on_other_types_is_an_error() {
        let permanent = Permanent::in_play(card("Blank Artifact", CardType::Artifact));
        let err = permanent.trigger_magecraft().unwrap_err();
        assert_eq!(
            err,
            GameError::UnimplementedTrigger {
                card: "Blank Artifact".to_string(),
                trigger: TriggerKind::Magecraft,
            }
        );
    }

    #[test]
    fn test_override_applies() {
        let mut prodigy = card("Harmonic Prodigy", CardType::Creature);
        let mut prowess = Resources::empty();
        prowess.trigger_prowess(1);
        prodigy.triggers.on_noncreature = Some(prowess);
        let permanent = Permanent::in_play(prodigy);
        assert_eq!(permanent.trigger_on_noncreature().map(|r| r.prowess), Ok(1));
        assert_eq!(permanent.trigger_on_cast(), Ok(Resources::empty()));
    }

    #[test]
    fn test_flips_per_cast_needs_enabler() {
        let mut enhancer = card("Harmonic Prodigy", CardType::Creature);
        enhancer.roles.push(Role::Enhancer);
        let mut enabler = card("Krark", CardType::Creature);
        enabler.roles.push(Role::CopyEnabler);

        let board = Board::from_cards(vec![enhancer.clone(), enhancer.clone()]);
        assert_eq!(board.enhancer_count(), 2);
        assert_eq!(board.flips_per_cast(), 0);

        let board = Board::from_cards(vec![enabler, enhancer.clone(), enhancer]);
        assert!(board.has_copy_enabler());
        assert_eq!(board.flips_per_cast(), 3);
    }

    #[test]
    fn test_trigger_all_sums_board() {
        let mut artist = card("Storm-Kiln Artist", CardType::Creature);
        artist.triggers.magecraft = Some(Resources { treasures: 1, ..Resources::empty() });
        let board =
            Board::from_cards(vec![artist.clone(), artist, card("Bear", CardType::Creature)]);
        assert_eq!(board.trigger_all(TriggerKind::Magecraft).map(|r| r.treasures), Ok(2));
        assert_eq!(board.trigger_all(TriggerKind::OnCast), Ok(Resources::empty()));
    }
}
