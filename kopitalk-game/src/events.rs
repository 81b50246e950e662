//! Random event catalog and selection.
//!
//! Events fire after a turn action and apply their effect to every family
//! member at once. The built-in catalog is embedded JSON; platform shells may
//! substitute their own (e.g. one produced by a hosted model) as long as the
//! shape matches.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

const DEFAULT_EVENTS_DATA: &str = include_str!("../assets/events.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Positive,
    Negative,
    FunnyFace,
    FunnyDance,
    SnackTime,
    DrinkTime,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::FunnyFace => "funny_face",
            Self::FunnyDance => "funny_dance",
            Self::SnackTime => "snack_time",
            Self::DrinkTime => "drink_time",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-member deltas carried by an event. Absent fields apply nothing.
/// Negative money and points are valid; movement is clamped onto the board
/// when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventEffect {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movement: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomEvent {
    /// Serialized as `type` for adapter-payload parity.
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<EventEffect>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct EventCatalog {
    #[serde(default)]
    pub events: Vec<RandomEvent>,
}

impl EventCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_EVENTS_DATA).unwrap_or_default()
    }
}

/// Shared built-in catalog.
#[must_use]
pub fn catalog() -> &'static EventCatalog {
    static CATALOG: OnceLock<EventCatalog> = OnceLock::new();
    CATALOG.get_or_init(EventCatalog::load_from_static)
}

/// Uniformly pick an event from the catalog. `None` only for an empty
/// catalog.
pub fn pick_event<'a, R>(catalog: &'a EventCatalog, rng: &mut R) -> Option<&'a RandomEvent>
where
    R: Rng + ?Sized,
{
    if catalog.events.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..catalog.events.len());
    catalog.events.get(index)
}
