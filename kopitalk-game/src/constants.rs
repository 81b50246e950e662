//! Centralized balance and tuning constants for KopiTalk game logic.
//!
//! These values define the deterministic math for the core rules. Keeping
//! them together ensures that gameplay can only be adjusted via code changes
//! reviewed in version control, rather than through external assets.

// Log keys -----------------------------------------------------------------
pub(crate) const LOG_SETUP_COMPLETE: &str = "log.setup.complete";
pub(crate) const LOG_TURN_ADVANCE: &str = "log.turn.advance";
pub(crate) const LOG_DICE_ROLL: &str = "log.dice.roll";
pub(crate) const LOG_CONVERSATION: &str = "log.conversation";
pub(crate) const LOG_VIDEO: &str = "log.video";
pub(crate) const LOG_EVENT_PREFIX: &str = "log.event.";
pub(crate) const LOG_MARKET_PREFIX: &str = "log.market.";

// Board geometry -----------------------------------------------------------
/// Number of spaces on the board; positions are clamped into `0..=BOARD_LENGTH`.
pub const BOARD_LENGTH: i32 = 20;

// Roster bounds ------------------------------------------------------------
pub const PARTY_MIN: usize = 2;
pub const PARTY_MAX: usize = 4;

// Dice ---------------------------------------------------------------------
pub const DICE_MIN: i32 = 1;
pub const DICE_MAX: i32 = 6;

// Difficulty budgets -------------------------------------------------------
pub(crate) const BUDGET_EASY: i64 = 150;
pub(crate) const BUDGET_MEDIUM: i64 = 100;
pub(crate) const BUDGET_HARD: i64 = 75;
pub(crate) const BUDGET_EXPERT: i64 = 50;

// Scoring ------------------------------------------------------------------
pub(crate) const SCORE_MAX: i32 = 100;
pub(crate) const CONVERSATION_MOVEMENT_MAX: i32 = 5;
/// One point per ten quality (or performance) percent.
pub(crate) const SCORE_POINTS_DIVISOR: i32 = 10;
/// Shared budget gain per space of conversation movement.
pub(crate) const CONVERSATION_BUDGET_FACTOR: i64 = 2;

// Market simulation --------------------------------------------------------
pub(crate) const MARKET_COST_MIN: i64 = 20;
pub(crate) const MARKET_COST_MAX: i64 = 49;
pub(crate) const MARKET_RESALE_DIVISOR: i64 = 10;
pub(crate) const MARKET_RESALE_BASE: i64 = 5;

// Analysis fallback tuning -------------------------------------------------
pub(crate) const SIM_QUALITY_BASE_MIN: f64 = 50.0;
pub(crate) const SIM_QUALITY_BASE_MAX: f64 = 90.0;
pub(crate) const SIM_DURATION_BONUS_WINDOW_SECS: f64 = 60.0;
pub(crate) const SIM_DURATION_BONUS_MAX: f64 = 20.0;
pub(crate) const SIM_PERFORMANCE_BASE_MIN: f64 = 0.5;
pub(crate) const SIM_PERFORMANCE_BASE_MAX: f64 = 0.9;
pub(crate) const SIM_EFFORT_BONUS: f64 = 0.1;
pub(crate) const SIM_DESCRIPTION_EFFORT_LEN: usize = 50;
pub(crate) const SIM_DESCRIPTION_STRONG_LEN: usize = 100;
pub(crate) const SIM_VIDEO_SIZE_EFFORT_MB: f64 = 0.5;
pub(crate) const SIM_VIDEO_SIZE_STRONG_MB: f64 = 2.0;
pub(crate) const SIM_VIDEO_EARNINGS_SPAN: f64 = 6.0;
pub(crate) const SIM_VIDEO_EARNINGS_BASE: i64 = 5;
pub(crate) const SIM_VIDEO_EARNINGS_MAX: i64 = 10;
pub(crate) const BONDING_EXCELLENT_THRESHOLD: i32 = 80;
pub(crate) const BONDING_HIGH_THRESHOLD: i32 = 60;
pub(crate) const CREATIVITY_AMAZING_THRESHOLD: f64 = 0.8;
pub(crate) const CREATIVITY_GREAT_THRESHOLD: f64 = 0.6;
