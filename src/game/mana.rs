use crate::card::ManaColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ManaParseError {
    #[error("Unknown mana symbol '{0}' (expected one of W, U, B, R, G, C)")]
    UnknownSymbol(char),
}

/// Mana pool tracking each color and colorless mana.
///
/// Channels are signed: a pool may dip below zero while a cost is being
/// subtracted, but [`Resources::pay`] is the only way the loop commits a
/// payment, and it refuses anything the pool can't cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManaPool {
    pub white: i32,
    pub blue: i32,
    pub black: i32,
    pub red: i32,
    pub green: i32,
    pub colorless: i32,
}

impl ManaPool {
    pub fn new() -> Self {
        ManaPool::default()
    }

    /// Add mana of a specific color
    pub fn add_mana(&mut self, color: ManaColor, amount: i32) {
        *self.channel_mut(color) += amount;
    }

    pub fn get(&self, color: ManaColor) -> i32 {
        match color {
            ManaColor::White => self.white,
            ManaColor::Blue => self.blue,
            ManaColor::Black => self.black,
            ManaColor::Red => self.red,
            ManaColor::Green => self.green,
            ManaColor::Colorless => self.colorless,
        }
    }

    fn channel_mut(&mut self, color: ManaColor) -> &mut i32 {
        match color {
            ManaColor::White => &mut self.white,
            ManaColor::Blue => &mut self.blue,
            ManaColor::Black => &mut self.black,
            ManaColor::Red => &mut self.red,
            ManaColor::Green => &mut self.green,
            ManaColor::Colorless => &mut self.colorless,
        }
    }

    /// Check if every color covers the matching color of `cost`
    pub fn can_pay(&self, cost: &ManaPool) -> bool {
        ManaColor::ALL
            .iter()
            .all(|color| self.get(*color) >= cost.get(*color))
    }
}

impl Add for ManaPool {
    type Output = ManaPool;

    fn add(self, other: ManaPool) -> ManaPool {
        ManaPool {
            white: self.white + other.white,
            blue: self.blue + other.blue,
            black: self.black + other.black,
            red: self.red + other.red,
            green: self.green + other.green,
            colorless: self.colorless + other.colorless,
        }
    }
}

impl Sub for ManaPool {
    type Output = ManaPool;

    fn sub(self, other: ManaPool) -> ManaPool {
        ManaPool {
            white: self.white - other.white,
            blue: self.blue - other.blue,
            black: self.black - other.black,
            red: self.red - other.red,
            green: self.green - other.green,
            colorless: self.colorless - other.colorless,
        }
    }
}

impl FromStr for ManaPool {
    type Err = ManaParseError;

    /// Parse a string of mana symbols such as "RRG". Whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pool = ManaPool::new();
        for symbol in s.chars().filter(|c| !c.is_whitespace()) {
            let color = ManaColor::from_char(symbol).ok_or(ManaParseError::UnknownSymbol(symbol))?;
            pool.add_mana(color, 1);
        }
        Ok(pool)
    }
}

impl fmt::Display for ManaPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = [
            ("white", self.white),
            ("blue", self.blue),
            ("black", self.black),
            ("red", self.red),
            ("green", self.green),
            ("colorless", self.colorless),
        ];
        write_nonzero(f, &channels)
    }
}

/// Everything a cast can produce: mana plus the bonus counters the combo
/// cares about. Also used as the shape of a cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub mana: ManaPool,
    pub treasures: i32,
    pub untaps: i32,
    pub prowess: i32,
}

impl Resources {
    /// The additive identity
    pub fn empty() -> Self {
        Resources::default()
    }

    pub fn from_mana(mana: ManaPool) -> Self {
        Resources { mana, ..Resources::default() }
    }

    /// Build a pool holding one unit of mana per listed color
    pub fn from_colors(colors: &[ManaColor]) -> Self {
        let mut mana = ManaPool::new();
        for color in colors {
            mana.add_mana(*color, 1);
        }
        Resources::from_mana(mana)
    }

    /// Triggers prowess `times` times
    pub fn trigger_prowess(&mut self, times: i32) {
        self.prowess += times;
    }

    /// True iff every channel is at least the matching channel of `cost`
    pub fn can_afford(&self, cost: &Resources) -> bool {
        self.mana.can_pay(&cost.mana)
            && self.treasures >= cost.treasures
            && self.untaps >= cost.untaps
            && self.prowess >= cost.prowess
    }

    /// The pool left after paying `cost`, or None if it can't be afforded
    pub fn pay(&self, cost: &Resources) -> Option<Resources> {
        if self.can_afford(cost) {
            Some(*self - *cost)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Resources::default()
    }
}

impl Add for Resources {
    type Output = Resources;

    fn add(self, other: Resources) -> Resources {
        Resources {
            mana: self.mana + other.mana,
            treasures: self.treasures + other.treasures,
            untaps: self.untaps + other.untaps,
            prowess: self.prowess + other.prowess,
        }
    }
}

impl Sub for Resources {
    type Output = Resources;

    fn sub(self, other: Resources) -> Resources {
        Resources {
            mana: self.mana - other.mana,
            treasures: self.treasures - other.treasures,
            untaps: self.untaps - other.untaps,
            prowess: self.prowess - other.prowess,
        }
    }
}

impl AddAssign for Resources {
    fn add_assign(&mut self, other: Resources) {
        *self = *self + other;
    }
}

impl SubAssign for Resources {
    fn sub_assign(&mut self, other: Resources) {
        *self = *self - other;
    }
}

impl Sum for Resources {
    fn sum<I: Iterator<Item = Resources>>(iter: I) -> Resources {
        iter.fold(Resources::empty(), Add::add)
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels = [
            ("white", self.mana.white),
            ("blue", self.mana.blue),
            ("black", self.mana.black),
            ("red", self.mana.red),
            ("green", self.mana.green),
            ("colorless", self.mana.colorless),
            ("treasures", self.treasures),
            ("untaps", self.untaps),
            ("prowess", self.prowess),
        ];
        write_nonzero(f, &channels)
    }
}

fn write_nonzero(f: &mut fmt::Formatter<'_>, channels: &[(&str, i32)]) -> fmt::Result {
    let parts: Vec<String> = channels
        .iter()
        .filter(|(_, value)| *value != 0)
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect();
    write!(f, "{{{}}}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(pool: &mut Resources, index: usize) -> &mut i32 {
        match index {
            0 => &mut pool.mana.white,
            1 => &mut pool.mana.blue,
            2 => &mut pool.mana.black,
            3 => &mut pool.mana.red,
            4 => &mut pool.mana.green,
            5 => &mut pool.mana.colorless,
            6 => &mut pool.treasures,
            7 => &mut pool.untaps,
            _ => &mut pool.prowess,
        }
    }

    fn samples() -> Vec<Resources> {
        let mut with_bonus = Resources::from_colors(&[ManaColor::Blue, ManaColor::Green]);
        with_bonus.treasures = 3;
        with_bonus.trigger_prowess(2);
        let mut negative = Resources::from_colors(&[ManaColor::Red]);
        negative.mana.white = -4;
        negative.untaps = -1;

        vec![
            Resources::empty(),
            Resources::from_colors(&[ManaColor::Red, ManaColor::Red]),
            with_bonus,
            negative,
        ]
    }

    #[test]
    fn test_add_mana() {
        let mut pool = ManaPool::new();
        pool.add_mana(ManaColor::White, 2);
        pool.add_mana(ManaColor::Blue, 1);
        assert_eq!(pool.white, 2);
        assert_eq!(pool.blue, 1);
        assert_eq!(pool.get(ManaColor::White), 2);
    }

    #[test]
    fn test_from_colors_counts_each_unit() {
        let pool = Resources::from_colors(&[ManaColor::Red, ManaColor::Colorless, ManaColor::Red]);
        assert_eq!(pool.mana.red, 2);
        assert_eq!(pool.mana.colorless, 1);
        assert_eq!(pool.treasures, 0);
    }

    #[test]
    fn test_empty_is_identity() {
        for a in samples() {
            assert_eq!(a + Resources::empty(), a);
            assert_eq!(Resources::empty() + a, a);
            assert_eq!(a - Resources::empty(), a);
        }
    }

    #[test]
    fn test_subtract_inverts_add() {
        for a in samples() {
            for b in samples() {
                assert_eq!((a + b) - b, a);
            }
        }
    }

    #[test]
    fn test_add_is_associative() {
        let s = samples();
        assert_eq!((s[1] + s[2]) + s[3], s[1] + (s[2] + s[3]));
    }

    #[test]
    fn test_sum_folds_from_empty() {
        let total: Resources = samples().into_iter().sum();
        assert_eq!(total.mana.red, 3);
        assert_eq!(total.mana.white, -4);
        assert_eq!(total.treasures, 3);
        let none: Resources = Vec::<Resources>::new().into_iter().sum();
        assert!(none.is_empty());
    }

    #[test]
    fn test_can_afford_exact() {
        let pool = Resources::from_colors(&[ManaColor::White, ManaColor::White, ManaColor::Blue]);
        let cost = Resources::from_colors(&[ManaColor::White, ManaColor::White, ManaColor::Blue]);
        assert!(pool.can_afford(&cost));
    }

    #[test]
    fn test_cannot_afford_with_one_deficient_channel() {
        let mut pool = Resources::empty();
        for color in ManaColor::ALL {
            pool.mana.add_mana(color, 2);
        }
        pool.treasures = 2;
        pool.untaps = 2;
        pool.prowess = 2;
        assert!(pool.can_afford(&pool), "a pool can always pay exactly itself");

        for i in 0..9 {
            let mut cost = pool;
            *channel(&mut cost, i) += 1;
            assert!(!pool.can_afford(&cost), "channel {} should be deficient", i);

            let mut exact = Resources::empty();
            *channel(&mut exact, i) = 2;
            assert!(pool.can_afford(&exact), "channel {} should be affordable", i);
        }
    }

    #[test]
    fn test_can_afford_does_not_mutate() {
        let pool = Resources::from_colors(&[ManaColor::Red]);
        let cost = Resources::from_colors(&[ManaColor::Red]);
        let (before_pool, before_cost) = (pool, cost);
        let _ = pool.can_afford(&cost);
        assert_eq!(pool, before_pool);
        assert_eq!(cost, before_cost);
    }

    #[test]
    fn test_pay_refuses_unaffordable_cost() {
        let pool = Resources::from_colors(&[ManaColor::Red]);
        let cost = Resources::from_colors(&[ManaColor::Red, ManaColor::Red]);
        assert_eq!(pool.pay(&cost), None);

        let paid = pool.pay(&Resources::from_colors(&[ManaColor::Red])).expect("affordable");
        assert!(paid.is_empty());
    }

    #[test]
    fn test_parse_pool_string() {
        let pool: ManaPool = "RR g".parse().expect("valid symbols");
        assert_eq!(pool.red, 2);
        assert_eq!(pool.green, 1);
        assert_eq!("RX".parse::<ManaPool>(), Err(ManaParseError::UnknownSymbol('X')));
    }

    #[test]
    fn test_display_skips_zero_channels() {
        let mut pool = Resources::from_colors(&[ManaColor::Red, ManaColor::Red]);
        pool.treasures = 1;
        assert_eq!(pool.to_string(), "{red: 2, treasures: 1}");
        assert_eq!(Resources::empty().to_string(), "{}");
    }

    #[test]
    fn test_deserialize_partial_pool() {
        let pool: Resources = serde_json::from_str(r#"{"mana": {"red": 2}, "prowess": 1}"#)
            .expect("valid pool JSON");
        assert_eq!(pool.mana.red, 2);
        assert_eq!(pool.prowess, 1);
        assert_eq!(pool.treasures, 0);
    }
}
