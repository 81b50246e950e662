//! KopiTalk Game Engine
//!
//! Platform-agnostic core game logic for the KopiTalk family board game.
//! This crate provides the session state machine, turn resolution, and
//! storage abstractions without UI or platform-specific dependencies.

pub mod analysis;
pub mod constants;
pub mod events;
pub mod family;
pub mod market;
pub mod session;
pub mod store;
pub mod trends;
pub mod turns;

// Re-export commonly used types
pub use analysis::{
    BoardAnalysis, BondingLevel, ConversationAnalysis, CreativityLevel, MalformedResult,
    VideoAnalysis, pick_topic, simulate_conversation, simulate_video,
};
pub use constants::{BOARD_LENGTH, DICE_MAX, DICE_MIN, PARTY_MAX, PARTY_MIN};
pub use events::{EventCatalog, EventEffect, EventKind, RandomEvent, pick_event};
pub use family::{FamilyMember, Role, RosterEntry, RosterError, validate_roster};
pub use market::{Market, MarketCatalog, MarketKind, ShoppingQuote, quote_shopping_trip};
pub use session::{Difficulty, GamePhase, GameSession, SetupError};
pub use store::{MemorySessionStore, SessionStorage};
pub use trends::{TikTokTrend, TrendCatalog, TrendDifficulty, pick_trend, roll_earnings};
pub use turns::TurnError;

use chrono::Utc;

/// Main engine for managing session lifecycle against a storage backend.
///
/// Turn operations live on [`GameSession`] itself; the engine covers
/// creation, lookup, and the explicit save-back that commits a caller-held
/// session to durable storage.
pub struct GameEngine<S>
where
    S: SessionStorage,
{
    storage: S,
}

impl<S> GameEngine<S>
where
    S: SessionStorage,
{
    /// Create a new engine over the provided storage.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Create and persist a fresh session awaiting family setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the new session cannot be saved.
    pub fn create_session(&self) -> Result<GameSession, S::Error> {
        let id = format!("game_{}", Utc::now().timestamp_millis());
        let session = GameSession::new(id);
        self.storage.save(&session)?;
        Ok(session)
    }

    /// Load a session by id. `Ok(None)` means no such session — callers
    /// redirect to a fresh-session flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub fn load_session(&self, session_id: &str) -> Result<Option<GameSession>, anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        self.storage.get(session_id).map_err(Into::into)
    }

    /// Commit a caller-held session back to storage (upsert by id).
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be saved.
    pub fn save_session(&self, session: &GameSession) -> Result<(), S::Error> {
        self.storage.save(session)
    }

    /// All stored sessions in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    pub fn list_sessions(&self) -> Result<Vec<GameSession>, S::Error> {
        self.storage.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_creates_and_roundtrips_session() {
        let engine = GameEngine::new(MemorySessionStore::new());
        let mut session = engine.create_session().unwrap();
        assert_eq!(session.game_phase, GamePhase::FamilySetup);
        assert!(session.id.starts_with("game_"));

        let roster = [
            RosterEntry::new("Ah Gong", Role::Grandfather),
            RosterEntry::new("Mei", Role::Daughter),
        ];
        session.complete_setup(Difficulty::Expert, &roster).unwrap();
        engine.save_session(&session).unwrap();

        let loaded = engine
            .load_session(&session.id)
            .unwrap()
            .expect("session exists");
        assert_eq!(loaded, session);
        assert_eq!(loaded.family_budget, 50);
        assert!(engine.load_session("game_missing").unwrap().is_none());
    }

    #[test]
    fn created_sessions_are_listed_immediately() {
        let engine = GameEngine::new(MemorySessionStore::new());
        let session = engine.create_session().unwrap();
        let listed = engine.list_sessions().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, session.id);
    }
}
