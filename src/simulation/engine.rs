use crate::card::TriggerKind;
use crate::game::mana::Resources;
use crate::game::zones::{Board, GameError, Permanent};
use crate::rng::{Coin, GameRng};
use log::{debug, info, warn};
use serde::Serialize;

/// Why the cast loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Termination {
    /// The spell stayed out of hand after a cast, so it resolved for good
    SpellResolved,
    /// The pool can't pay for another cast
    Unaffordable,
    /// The configured cast limit was reached
    CastLimit,
}

/// Final state of one loop invocation
#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub pool: Resources,
    pub casts: u32,
    pub copies: u32,
    pub heads: usize,
    pub flips: usize,
    pub termination: Termination,
}

/// Resolution engine for one simulation run.
///
/// Borrows the board for the whole run; the spell being looped is passed in
/// mutably since casting and bouncing move it between hand and stack.
pub struct Engine<'b> {
    board: &'b Board,
    rng: GameRng,
    history: Vec<Coin>,
    cast_counter: u32,
    copies: u32,
    cast_limit: Option<u32>,
}

impl<'b> Engine<'b> {
    pub fn new(board: &'b Board, rng: GameRng) -> Self {
        if !board.has_copy_enabler() && board.enhancer_count() > 0 {
            warn!(
                "Board has {} enhancer(s) but no copy enabler; no coins will be flipped.",
                board.enhancer_count()
            );
        }
        Engine {
            board,
            rng,
            history: Vec::new(),
            cast_counter: 0,
            copies: 0,
            cast_limit: None,
        }
    }

    /// Stop the loop after `limit` casts even if the pool could keep going
    pub fn with_cast_limit(mut self, limit: u32) -> Self {
        self.cast_limit = Some(limit);
        self
    }

    pub fn cast_counter(&self) -> u32 {
        self.cast_counter
    }

    pub fn copies(&self) -> u32 {
        self.copies
    }

    /// Every coin flipped so far, in order
    pub fn history(&self) -> &[Coin] {
        &self.history
    }

    pub fn heads(&self) -> usize {
        self.history.iter().filter(|c| **c == Coin::Heads).count()
    }

    pub fn flip(&mut self) -> Coin {
        let coin = self.rng.flip();
        self.history.push(coin);
        info!("Flipped {}!", coin);
        coin
    }

    /// One full cast of `spell`: cast triggers, coin flips, then resolution.
    /// Returns what the cast produced; the caller has already paid for it.
    pub fn run(&mut self, spell: &mut Permanent) -> Result<Resources, GameError> {
        info!("Casting {}.", spell.name());
        spell.cast();
        self.cast_counter += 1;

        let mut results = self.board.trigger_all(TriggerKind::OnCast)?;
        if spell.is_noncreature() {
            results += self.board.trigger_all(TriggerKind::OnNonCreature)?;
        }
        if spell.is_instant_or_sorcery() {
            results += self.board.trigger_all(TriggerKind::Magecraft)?;
        }

        let flips = self.board.flips_per_cast();
        if flips > 0 {
            info!("Copy enabler is on board, flipping {} coin(s).", flips);
        }
        for _ in 0..flips {
            match self.flip() {
                Coin::Heads => {
                    results += self.board.trigger_all(TriggerKind::Magecraft)?;
                    results += spell.copy();
                    self.copies += 1;
                }
                Coin::Tails => spell.bounce(),
            }
        }

        results += spell.resolve();
        debug!("Cast {} produced {}", self.cast_counter, results);
        Ok(results)
    }

    /// Keep casting `spell` from `pool` while it is in hand and affordable
    pub fn run_loop(
        &mut self,
        spell: &mut Permanent,
        mut pool: Resources,
    ) -> Result<LoopOutcome, GameError> {
        debug!(
            "Casting {} with [{}] in play and {} available.",
            spell.name(),
            self.board.names().join(", "),
            pool
        );

        let termination = loop {
            if !spell.in_hand() {
                break Termination::SpellResolved;
            }
            if self.cast_limit.is_some_and(|limit| self.cast_counter >= limit) {
                warn!("Cast limit reached after {} casts of {}.", self.cast_counter, spell.name());
                break Termination::CastLimit;
            }
            pool = match pool.pay(spell.cost()) {
                Some(remaining) => remaining,
                None => {
                    info!("{} can NOT be cast.", spell.name());
                    break Termination::Unaffordable;
                }
            };
            debug!("Pool status: {}", pool);
            pool += self.run(spell)?;
        };

        Ok(LoopOutcome {
            pool,
            casts: self.cast_counter,
            copies: self.copies,
            heads: self.heads(),
            flips: self.history.len(),
            termination,
        })
    }
}
