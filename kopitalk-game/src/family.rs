//! Family member registry and pre-game roster validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{BOARD_LENGTH, PARTY_MAX, PARTY_MIN};

/// Role of a family member. Purely descriptive for turn resolution, but the
/// roster gate requires at least one junior and one senior role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Son,
    Daughter,
    Grandfather,
    Grandmother,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Son => "son",
            Self::Daughter => "daughter",
            Self::Grandfather => "grandfather",
            Self::Grandmother => "grandmother",
        }
    }

    /// Son or daughter.
    #[must_use]
    pub const fn is_junior(self) -> bool {
        matches!(self, Self::Son | Self::Daughter)
    }

    /// Grandfather or grandmother.
    #[must_use]
    pub const fn is_senior(self) -> bool {
        matches!(self, Self::Grandfather | Self::Grandmother)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "son" => Ok(Self::Son),
            "daughter" => Ok(Self::Daughter),
            "grandfather" => Ok(Self::Grandfather),
            "grandmother" => Ok(Self::Grandmother),
            _ => Err(()),
        }
    }
}

/// A participant in an active session with their mutable resource counters.
///
/// `position` stays inside `0..=BOARD_LENGTH`; `points` and `cash` carry no
/// floor and may go negative. `ezlink_balance` is tracked per member but never
/// mutated by any core operation (reserved for the transit top-up mini-app).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub points: i32,
    #[serde(default)]
    pub cash: i64,
    #[serde(default)]
    pub ezlink_balance: i64,
}

impl FamilyMember {
    /// Create a member with all counters zeroed, as setup does.
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
            position: 0,
            points: 0,
            cash: 0,
            ezlink_balance: 0,
        }
    }

    /// Move by `spaces` (negative allowed), clamped onto the board.
    pub fn advance(&mut self, spaces: i32) {
        self.position = (self.position + spaces).clamp(0, BOARD_LENGTH);
    }
}

/// Pre-game roster configuration: name and role, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub role: Role,
}

impl RosterEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Errors raised when a roster fails the setup gate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("family size {got} outside {PARTY_MIN}..={PARTY_MAX}")]
    PartySize { got: usize },
    #[error("member {index} has an empty name")]
    EmptyName { index: usize },
    #[error("at least one son or daughter is required")]
    NoJuniorMember,
    #[error("at least one grandfather or grandmother is required")]
    NoSeniorMember,
}

/// Validate a roster against the setup invariants.
///
/// Duplicate names are deliberately allowed: turn order, not name, is the
/// identity key for members.
///
/// # Errors
///
/// Returns a [`RosterError`] describing the first violated invariant.
pub fn validate_roster(entries: &[RosterEntry]) -> Result<(), RosterError> {
    if !(PARTY_MIN..=PARTY_MAX).contains(&entries.len()) {
        return Err(RosterError::PartySize { got: entries.len() });
    }
    for (index, entry) in entries.iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(RosterError::EmptyName { index });
        }
    }
    if !entries.iter().any(|entry| entry.role.is_junior()) {
        return Err(RosterError::NoJuniorMember);
    }
    if !entries.iter().any(|entry| entry.role.is_senior()) {
        return Err(RosterError::NoSeniorMember);
    }
    Ok(())
}
