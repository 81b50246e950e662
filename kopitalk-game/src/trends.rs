//! Trend challenge catalog for the video action.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const DEFAULT_TRENDS_DATA: &str = include_str!("../assets/trends.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDifficulty {
    Easy,
    Medium,
    Hard,
}

/// A viral trend the family can attempt on camera. Earnings bounds feed the
/// video-analysis adapters; harder trends pay better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TikTokTrend {
    pub id: String,
    pub name: String,
    pub difficulty: TrendDifficulty,
    pub min_earnings: i64,
    pub max_earnings: i64,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TrendCatalog {
    #[serde(default)]
    pub trends: Vec<TikTokTrend>,
}

impl TrendCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_TRENDS_DATA).unwrap_or_default()
    }

    #[must_use]
    pub fn find(&self, trend_id: &str) -> Option<&TikTokTrend> {
        self.trends.iter().find(|trend| trend.id == trend_id)
    }
}

/// Shared built-in catalog.
#[must_use]
pub fn catalog() -> &'static TrendCatalog {
    static CATALOG: OnceLock<TrendCatalog> = OnceLock::new();
    CATALOG.get_or_init(TrendCatalog::load_from_static)
}

/// Uniformly pick a trend suggestion. `None` only for an empty catalog.
pub fn pick_trend<'a, R>(catalog: &'a TrendCatalog, rng: &mut R) -> Option<&'a TikTokTrend>
where
    R: Rng + ?Sized,
{
    if catalog.trends.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..catalog.trends.len());
    catalog.trends.get(index)
}

/// Roll earnings inside a trend's payout bounds.
pub fn roll_earnings<R>(trend: &TikTokTrend, rng: &mut R) -> i64
where
    R: Rng + ?Sized,
{
    if trend.min_earnings >= trend.max_earnings {
        return trend.min_earnings;
    }
    rng.gen_range(trend.min_earnings..=trend.max_earnings)
}
