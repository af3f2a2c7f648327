//! Core domain types for dicebag.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

pub mod transitions;

pub use transitions::{
    DEFAULT_GROUP_NAME, EditError, EditOp, add_die, add_group, add_named_group, apply,
    remove_die, rename_group, replace_dice, roll_group,
};

use std::fmt;
use std::num::{IntErrorKind, NonZeroU32};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Side Count
// ============================================================================

/// Number of faces on a die. Zero is structurally unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sides(NonZeroU32);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SidesParseError {
    #[error("side count cannot be empty")]
    Empty,
    #[error("side count must be a whole number (got {0})")]
    NotANumber(String),
    #[error("side count must be at least 1")]
    Zero,
    #[error("side count is too large (got {0})")]
    TooLarge(String),
}

impl Sides {
    pub const D6: Sides = match NonZeroU32::new(6) {
        Some(n) => Sides(n),
        None => unreachable!(),
    };

    pub fn try_new(value: u32) -> Result<Self, SidesParseError> {
        NonZeroU32::new(value).map(Self).ok_or(SidesParseError::Zero)
    }

    /// Parse raw user input such as `"20"`.
    ///
    /// Surrounding whitespace and a leading `d`/`D` (`"d20"`) are accepted.
    pub fn parse(raw: &str) -> Result<Self, SidesParseError> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_prefix(['d', 'D'])
            .unwrap_or(trimmed)
            .trim_start();
        if digits.is_empty() {
            return Err(SidesParseError::Empty);
        }
        let value: u32 = digits.parse().map_err(|err: std::num::ParseIntError| {
            match err.kind() {
                IntErrorKind::PosOverflow => SidesParseError::TooLarge(trimmed.to_string()),
                _ => SidesParseError::NotANumber(trimmed.to_string()),
            }
        })?;
        Self::try_new(value)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

// ============================================================================
// Dice & Groups
// ============================================================================

/// Source of die results.
///
/// Implementations must return a value in `1..=sides`.
pub trait DieRoller {
    fn roll(&mut self, sides: Sides) -> u32;
}

impl<R: DieRoller + ?Sized> DieRoller for &mut R {
    fn roll(&mut self, sides: Sides) -> u32 {
        (**self).roll(sides)
    }
}

/// A single die and the result of its most recent roll.
///
/// Older saves stored dice as `{"type": 6}` with no roll state; the `type`
/// alias reads those as unrolled dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Die {
    #[serde(alias = "type")]
    sides_count: Sides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_roll: Option<u32>,
}

impl Die {
    /// A die that has not been rolled yet.
    #[must_use]
    pub const fn new(sides: Sides) -> Self {
        Self {
            sides_count: sides,
            last_roll: None,
        }
    }

    #[must_use]
    pub const fn sides(&self) -> Sides {
        self.sides_count
    }

    #[must_use]
    pub const fn last_roll(&self) -> Option<u32> {
        self.last_roll
    }

    #[must_use]
    pub const fn is_rolled(&self) -> bool {
        self.last_roll.is_some()
    }

    /// Return this die with a fresh result from `roller`.
    #[must_use]
    pub fn rolled(self, roller: &mut impl DieRoller) -> Self {
        let value = roller.roll(self.sides_count);
        debug_assert!((1..=self.sides_count.get()).contains(&value));
        Self {
            last_roll: Some(value),
            ..self
        }
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last_roll {
            Some(value) => write!(f, "{}: {value}", self.sides_count),
            None => write!(f, "{}: not rolled", self.sides_count),
        }
    }
}

/// A named set of dice rolled together.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Group {
    name: String,
    #[serde(default)]
    dice: Vec<Die>,
}

impl Group {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dice: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dice(name: impl Into<String>, dice: Vec<Die>) -> Self {
        Self {
            name: name.into(),
            dice,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Sum of every die's last roll.
    ///
    /// `None` unless the group has dice and all of them have been rolled.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        if self.dice.is_empty() {
            return None;
        }
        self.dice
            .iter()
            .map(|die| die.last_roll().map(u64::from))
            .sum()
    }
}

/// Ordered list of groups; the unit that is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    groups: Vec<Group>,
}

impl Collection {
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl From<Vec<Group>> for Collection {
    fn from(groups: Vec<Group>) -> Self {
        Self { groups }
    }
}
