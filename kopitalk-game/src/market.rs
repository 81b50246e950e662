//! Market catalog and shopping-trip quotes.
//!
//! Markets are descriptive data: where the family can shop and under what
//! conditions. The actual debit happens through
//! [`crate::session::GameSession::apply_market_transaction`], fed by a quote
//! from [`quote_shopping_trip`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::constants::{
    MARKET_COST_MAX, MARKET_COST_MIN, MARKET_RESALE_BASE, MARKET_RESALE_DIVISOR,
};

const DEFAULT_MARKETS_DATA: &str = include_str!("../assets/markets.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketKind {
    Supermarket,
    WetMarket,
    Online,
}

/// A shopping location available during gameplay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: String,
    pub name: String,
    /// Serialized as `type` for catalog-payload parity.
    #[serde(rename = "type")]
    pub kind: MarketKind,
    /// Stock availability percentage.
    pub availability: u8,
    pub pricing_multiplier: f32,
    pub queue_length: u32,
    #[serde(default)]
    pub special_conditions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct MarketCatalog {
    #[serde(default)]
    pub markets: Vec<Market>,
}

impl MarketCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_MARKETS_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn find(&self, market_id: &str) -> Option<&Market> {
        self.markets.iter().find(|market| market.id == market_id)
    }
}

/// Shared built-in catalog.
#[must_use]
pub fn catalog() -> &'static MarketCatalog {
    static CATALOG: OnceLock<MarketCatalog> = OnceLock::new();
    CATALOG.get_or_init(MarketCatalog::load_from_static)
}

/// A priced shopping trip: what it costs and what reselling brings back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShoppingQuote {
    pub cost: i64,
    pub resale_portion: i64,
}

impl ShoppingQuote {
    /// Net change to the shopper's cash when the trip is applied.
    #[must_use]
    pub const fn net(&self) -> i64 {
        self.resale_portion - self.cost
    }
}

/// Quote a shopping trip: cost lands in $20..=$49 and the resale portion is
/// a tenth of the cost plus a flat $5.
pub fn quote_shopping_trip<R>(rng: &mut R) -> ShoppingQuote
where
    R: Rng + ?Sized,
{
    let cost = rng.gen_range(MARKET_COST_MIN..=MARKET_COST_MAX);
    ShoppingQuote {
        cost,
        resale_portion: cost / MARKET_RESALE_DIVISOR + MARKET_RESALE_BASE,
    }
}
