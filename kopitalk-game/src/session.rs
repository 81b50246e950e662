//! Game session state and the setup-to-gameplay phase transition.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::constants::{
    BUDGET_EASY, BUDGET_EXPERT, BUDGET_HARD, BUDGET_MEDIUM, LOG_SETUP_COMPLETE,
};
use crate::family::{FamilyMember, RosterEntry, RosterError, validate_roster};

/// Difficulty only determines the starting family budget; it does not affect
/// any in-game probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    /// Fixed starting budget lookup.
    #[must_use]
    pub const fn starting_budget(self) -> i64 {
        match self {
            Self::Easy => BUDGET_EASY,
            Self::Medium => BUDGET_MEDIUM,
            Self::Hard => BUDGET_HARD,
            Self::Expert => BUDGET_EXPERT,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "expert" => Ok(Self::Expert),
            _ => Err(()),
        }
    }
}

/// Session phase. Strictly forward-progressing: there is no transition out of
/// `Gameplay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    FamilySetup,
    Gameplay,
}

impl GamePhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FamilySetup => "family_setup",
            Self::Gameplay => "gameplay",
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by [`GameSession::complete_setup`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("family setup already completed")]
    AlreadyStarted,
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// The full mutable state of one playthrough.
///
/// The session is a caller-held value: turn operations mutate it in place and
/// the caller commits it back to a [`crate::store::SessionStorage`]. Member
/// order defines turn order and is fixed once setup completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: String,
    pub difficulty: Difficulty,
    /// Shared pool, distinct from per-member cash. Only ever incremented by
    /// in-scope operations.
    pub family_budget: i64,
    pub family_members: SmallVec<[FamilyMember; 4]>,
    pub game_phase: GamePhase,
    pub current_player_index: usize,
    /// Reserved extension point; always `None` in practice.
    #[serde(default)]
    pub game_scenario: Option<serde_json::Value>,
    pub created_date: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    /// Gameplay log keys, in application order.
    #[serde(default)]
    pub logs: Vec<String>,
}

impl GameSession {
    /// Fresh session awaiting family setup: empty roster, medium-difficulty
    /// placeholder budget, turn pointer at zero.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            difficulty: Difficulty::Medium,
            family_budget: Difficulty::Medium.starting_budget(),
            family_members: SmallVec::new(),
            game_phase: GamePhase::FamilySetup,
            current_player_index: 0,
            game_scenario: None,
            created_date: now,
            last_updated: now,
            logs: Vec::new(),
        }
    }

    /// Complete family setup and transition to gameplay.
    ///
    /// On success the difficulty budget is assigned, every member starts with
    /// all counters zeroed, and the turn pointer resets. On failure the
    /// session is untouched and remains in `FamilySetup`.
    ///
    /// # Errors
    ///
    /// [`SetupError::AlreadyStarted`] when called after the transition, or a
    /// [`RosterError`] when the roster fails validation.
    pub fn complete_setup(
        &mut self,
        difficulty: Difficulty,
        roster: &[RosterEntry],
    ) -> Result<(), SetupError> {
        if self.game_phase != GamePhase::FamilySetup {
            return Err(SetupError::AlreadyStarted);
        }
        validate_roster(roster)?;

        self.difficulty = difficulty;
        self.family_budget = difficulty.starting_budget();
        self.family_members = roster
            .iter()
            .map(|entry| FamilyMember::new(entry.name.clone(), entry.role))
            .collect();
        self.current_player_index = 0;
        self.game_phase = GamePhase::Gameplay;
        self.logs.push(LOG_SETUP_COMPLETE.to_string());
        log::info!(
            "session {} entered gameplay: {} members, {} difficulty",
            self.id,
            self.family_members.len(),
            difficulty
        );
        self.touch();
        Ok(())
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.family_members.len()
    }

    /// Member whose turn it is, if the roster is populated.
    #[must_use]
    pub fn current_player(&self) -> Option<&FamilyMember> {
        self.family_members.get(self.current_player_index)
    }

    pub fn current_player_mut(&mut self) -> Option<&mut FamilyMember> {
        let index = self.current_player_index;
        self.family_members.get_mut(index)
    }

    /// Refresh `last_updated`. Every mutating operation calls this.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Role;

    fn roster() -> Vec<RosterEntry> {
        vec![
            RosterEntry::new("Ah Gong", Role::Grandfather),
            RosterEntry::new("Mei", Role::Daughter),
        ]
    }

    #[test]
    fn setup_assigns_budget_and_zeroes_counters() {
        let mut session = GameSession::new("game_1");
        session.complete_setup(Difficulty::Medium, &roster()).unwrap();

        assert_eq!(session.game_phase, GamePhase::Gameplay);
        assert_eq!(session.family_budget, 100);
        assert_eq!(session.current_player_index, 0);
        assert_eq!(session.member_count(), 2);
        for member in &session.family_members {
            assert_eq!(member.position, 0);
            assert_eq!(member.points, 0);
            assert_eq!(member.cash, 0);
            assert_eq!(member.ezlink_balance, 0);
        }
    }

    #[test]
    fn setup_rejects_invalid_roster_and_stays_in_setup() {
        let mut session = GameSession::new("game_1");
        let all_sons = vec![
            RosterEntry::new("Jun", Role::Son),
            RosterEntry::new("Wei", Role::Son),
            RosterEntry::new("Kai", Role::Son),
        ];
        let err = session.complete_setup(Difficulty::Easy, &all_sons).unwrap_err();
        assert_eq!(err, SetupError::Roster(RosterError::NoSeniorMember));
        assert_eq!(session.game_phase, GamePhase::FamilySetup);
        assert!(session.family_members.is_empty());
        // Failed setup keeps the placeholder budget, not the easy one.
        assert_eq!(session.family_budget, 100);
    }

    #[test]
    fn setup_cannot_run_twice() {
        let mut session = GameSession::new("game_1");
        session.complete_setup(Difficulty::Hard, &roster()).unwrap();
        let err = session.complete_setup(Difficulty::Easy, &roster()).unwrap_err();
        assert_eq!(err, SetupError::AlreadyStarted);
        assert_eq!(session.difficulty, Difficulty::Hard);
        assert_eq!(session.family_budget, 75);
    }

    #[test]
    fn difficulty_budget_table() {
        assert_eq!(Difficulty::Easy.starting_budget(), 150);
        assert_eq!(Difficulty::Medium.starting_budget(), 100);
        assert_eq!(Difficulty::Hard.starting_budget(), 75);
        assert_eq!(Difficulty::Expert.starting_budget(), 50);
    }

    #[test]
    fn difficulty_string_roundtrip() {
        for difficulty in [
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ] {
            assert_eq!(difficulty.as_str().parse::<Difficulty>(), Ok(difficulty));
        }
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn touch_refreshes_last_updated() {
        let mut session = GameSession::new("game_1");
        let before = session.last_updated;
        session.touch();
        assert!(session.last_updated >= before);
    }
}
