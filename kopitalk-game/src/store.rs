//! Durable keyed storage of game sessions.
//!
//! The store owns the flat collection of all sessions for one local device
//! and is the only place mutation is committed; the in-memory session the
//! caller holds is a copy that must be explicitly saved back. Semantics are
//! last-write-wins with no concurrency control — the store is a
//! single-process, single-writer abstraction, and multi-tab or multi-device
//! coordination is deliberately left to the platform shell.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use crate::session::GameSession;

/// Trait for abstracting session persistence.
/// Platform-specific implementations should provide this.
pub trait SessionStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All stored sessions, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn list(&self) -> Result<Vec<GameSession>, Self::Error>;

    /// Look up a session by id. Absence is a normal outcome, not an error:
    /// callers redirect to a fresh-session flow.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, session_id: &str) -> Result<Option<GameSession>, Self::Error>;

    /// Upsert by id: full replace when present, append when absent. No
    /// partial-field merge — callers supply the complete session.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn save(&self, session: &GameSession) -> Result<(), Self::Error>;
}

/// In-memory session store backed by a shared flat list.
///
/// This is the provided local implementation; platform shells that own a
/// durable slot (browser local storage, a file) mirror the collection
/// through [`export_json`](Self::export_json) /
/// [`import_json`](Self::import_json).
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    sessions: Rc<RefCell<Vec<GameSession>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the whole collection for handoff to a durable slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be serialized.
    pub fn export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.sessions.borrow())
    }

    /// Rebuild a store from a previously exported collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into sessions.
    pub fn import_json(json: &str) -> Result<Self, serde_json::Error> {
        let sessions: Vec<GameSession> = serde_json::from_str(json)?;
        Ok(Self {
            sessions: Rc::new(RefCell::new(sessions)),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.borrow().is_empty()
    }
}

impl SessionStorage for MemorySessionStore {
    type Error = Infallible;

    fn list(&self) -> Result<Vec<GameSession>, Self::Error> {
        Ok(self.sessions.borrow().clone())
    }

    fn get(&self, session_id: &str) -> Result<Option<GameSession>, Self::Error> {
        Ok(self
            .sessions
            .borrow()
            .iter()
            .find(|session| session.id == session_id)
            .cloned())
    }

    fn save(&self, session: &GameSession) -> Result<(), Self::Error> {
        let mut sessions = self.sessions.borrow_mut();
        if let Some(slot) = sessions.iter_mut().find(|stored| stored.id == session.id) {
            log::debug!("replacing stored session {}", session.id);
            *slot = session.clone();
        } else {
            log::debug!("appending new session {}", session.id);
            sessions.push(session.clone());
        }
        Ok(())
    }
}
