//! Typed contracts for externally produced analysis results, plus the local
//! deterministic fallback generators.
//!
//! The core never performs audio/video analysis itself. Platform shells call
//! a hosted model (or skip it entirely) and hand the resolved payload to the
//! turn resolver, which validates shape and range before applying it. The
//! `simulate_*` functions reproduce the shells' offline fallback behaviour
//! behind an [`Rng`] generic so tests can pin outcomes with a seeded
//! generator.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{
    BONDING_EXCELLENT_THRESHOLD, BONDING_HIGH_THRESHOLD, CONVERSATION_MOVEMENT_MAX,
    CREATIVITY_AMAZING_THRESHOLD, CREATIVITY_GREAT_THRESHOLD, SCORE_MAX,
    SIM_DESCRIPTION_EFFORT_LEN, SIM_DESCRIPTION_STRONG_LEN, SIM_DURATION_BONUS_MAX,
    SIM_DURATION_BONUS_WINDOW_SECS, SIM_EFFORT_BONUS, SIM_PERFORMANCE_BASE_MAX,
    SIM_PERFORMANCE_BASE_MIN, SIM_QUALITY_BASE_MAX, SIM_QUALITY_BASE_MIN,
    SIM_VIDEO_EARNINGS_BASE, SIM_VIDEO_EARNINGS_MAX, SIM_VIDEO_EARNINGS_SPAN,
    SIM_VIDEO_SIZE_EFFORT_MB, SIM_VIDEO_SIZE_STRONG_MB,
};

/// Conversation prompts surfaced to families before recording.
pub const CONVERSATION_TOPICS: [&str; 12] = [
    "Share a childhood memory from your generation",
    "What technology surprised you the most in your lifetime?",
    "Tell me about your favorite family tradition",
    "What advice would you give to someone from a different generation?",
    "Describe how family meals were different when you were young",
    "What song or music brings back special memories?",
    "Share a story about your first job or school experience",
    "What games did you play as a child?",
    "Tell me about a historical event you remember",
    "What's the biggest change you've seen in your neighborhood?",
    "Share a funny family story or embarrassing moment",
    "What skills do you think each generation should learn from the other?",
];

const CONVERSATION_FEEDBACK: [&str; 4] = [
    "Great storytelling! The AI detected engaging conversation patterns.",
    "Good family bonding moment detected. Keep sharing those memories!",
    "Nice emotional connection! The discussion shows genuine interest.",
    "Excellent intergenerational dialogue. Both perspectives were valued.",
];

const FALLBACK_TOPICS: [&str; 3] = ["family stories", "shared memories", "generational wisdom"];

/// A payload field violated the documented shape/range contract. The core
/// rejects such payloads rather than clamping or coercing them; the caller
/// falls back to a locally generated substitute.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedResult {
    #[error("{field} must be between {min} and {max} (got {value})")]
    RangeViolation {
        field: &'static str,
        min: i32,
        max: i32,
        value: i32,
    },
    #[error("earnings must be non-negative (got {value})")]
    NegativeEarnings { value: i64 },
}

fn check_range(
    field: &'static str,
    value: i32,
    min: i32,
    max: i32,
) -> Result<(), MalformedResult> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(MalformedResult::RangeViolation {
            field,
            min,
            max,
            value,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BondingLevel {
    Low,
    #[default]
    Medium,
    High,
    Excellent,
}

impl BondingLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Excellent => "excellent",
        }
    }
}

impl fmt::Display for BondingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreativityLevel {
    Basic,
    #[default]
    Good,
    Great,
    Amazing,
}

impl CreativityLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Good => "good",
            Self::Great => "great",
            Self::Amazing => "amazing",
        }
    }
}

impl fmt::Display for CreativityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of analyzing a recorded family conversation.
///
/// Conversation is a whole-family activity: movement and quality points apply
/// to every member, and there is no per-member cash component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationAnalysis {
    /// Conversation quality percentage, `0..=100`.
    pub quality: i32,
    /// Board spaces awarded to every member, `0..=5`.
    pub movement: i32,
    pub feedback: String,
    #[serde(default)]
    pub topics_covered: Vec<String>,
    #[serde(default)]
    pub bonding_level: BondingLevel,
}

impl ConversationAnalysis {
    /// # Errors
    ///
    /// Returns [`MalformedResult`] when a field is outside its documented
    /// range.
    pub fn validate(&self) -> Result<(), MalformedResult> {
        check_range("quality", self.quality, 0, SCORE_MAX)?;
        check_range("movement", self.movement, 0, CONVERSATION_MOVEMENT_MAX)?;
        Ok(())
    }
}

/// Result of analyzing a recorded trend video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAnalysis {
    /// Performance percentage, `0..=100`.
    pub performance_score: i32,
    /// Whole-dollar earnings, distributed evenly across the family.
    pub earnings: i64,
    pub feedback: String,
    #[serde(default)]
    pub creativity_level: CreativityLevel,
}

impl VideoAnalysis {
    /// # Errors
    ///
    /// Returns [`MalformedResult`] when a field is outside its documented
    /// range.
    pub fn validate(&self) -> Result<(), MalformedResult> {
        check_range("performance_score", self.performance_score, 0, SCORE_MAX)?;
        if self.earnings < 0 {
            return Err(MalformedResult::NegativeEarnings {
                value: self.earnings,
            });
        }
        Ok(())
    }
}

/// Board photo assessment produced by the excluded setup flow. The core
/// defines the shape for adapter parity but never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardAnalysis {
    pub board_assessment: String,
    pub complexity: BoardComplexity,
    pub family_friendly: bool,
    #[serde(default)]
    pub module_suggestions: Vec<ModuleSuggestion>,
    #[serde(default)]
    pub strategic_tips: Vec<String>,
    pub estimated_game_time: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoardComplexity {
    Simple,
    #[default]
    Moderate,
    Complex,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSuggestion {
    pub module_type: String,
    pub placement: String,
    pub reason: String,
    pub priority: SuggestionPriority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Pick a conversation prompt.
pub fn pick_topic<R>(rng: &mut R) -> &'static str
where
    R: Rng + ?Sized,
{
    CONVERSATION_TOPICS[rng.gen_range(0..CONVERSATION_TOPICS.len())]
}

/// Local substitute for conversation analysis when no hosted model is
/// reachable. Quality lands in 50..=100 with a bonus for longer recordings;
/// movement derives from quality and is capped at the contract maximum.
#[allow(clippy::cast_possible_truncation)]
pub fn simulate_conversation<R>(rng: &mut R, duration_secs: u32) -> ConversationAnalysis
where
    R: Rng + ?Sized,
{
    let base = rng.gen_range(SIM_QUALITY_BASE_MIN..SIM_QUALITY_BASE_MAX);
    let duration_bonus =
        (f64::from(duration_secs) / SIM_DURATION_BONUS_WINDOW_SECS).min(1.0) * SIM_DURATION_BONUS_MAX;
    let quality = (base + duration_bonus).min(f64::from(SCORE_MAX)).round() as i32;
    let movement = (quality / 20 + 1).min(CONVERSATION_MOVEMENT_MAX);
    let bonding_level = if quality > BONDING_EXCELLENT_THRESHOLD {
        BondingLevel::Excellent
    } else if quality > BONDING_HIGH_THRESHOLD {
        BondingLevel::High
    } else {
        BondingLevel::Medium
    };
    let feedback = CONVERSATION_FEEDBACK[rng.gen_range(0..CONVERSATION_FEEDBACK.len())];

    ConversationAnalysis {
        quality,
        movement,
        feedback: feedback.to_string(),
        topics_covered: FALLBACK_TOPICS.iter().map(ToString::to_string).collect(),
        bonding_level,
    }
}

/// Local substitute for trend-video analysis. Performance starts in
/// 0.5..0.9 and earns bonuses for a detailed description and a recording of
/// plausible size; earnings land in $5..=$10.
#[allow(clippy::cast_possible_truncation)]
pub fn simulate_video<R>(rng: &mut R, video_size_mb: f64, description: &str) -> VideoAnalysis
where
    R: Rng + ?Sized,
{
    let mut performance = rng.gen_range(SIM_PERFORMANCE_BASE_MIN..SIM_PERFORMANCE_BASE_MAX);
    if description.len() > SIM_DESCRIPTION_EFFORT_LEN {
        performance += SIM_EFFORT_BONUS;
    }
    if description.len() > SIM_DESCRIPTION_STRONG_LEN {
        performance += SIM_EFFORT_BONUS;
    }
    if video_size_mb > SIM_VIDEO_SIZE_EFFORT_MB {
        performance += SIM_EFFORT_BONUS;
    }
    if video_size_mb > SIM_VIDEO_SIZE_STRONG_MB {
        performance += SIM_EFFORT_BONUS;
    }
    performance = performance.min(1.0);

    let earnings = ((performance * SIM_VIDEO_EARNINGS_SPAN).floor() as i64
        + SIM_VIDEO_EARNINGS_BASE)
        .min(SIM_VIDEO_EARNINGS_MAX);
    let performance_score = (performance * f64::from(SCORE_MAX)).round() as i32;
    let creativity_level = if performance > CREATIVITY_AMAZING_THRESHOLD {
        CreativityLevel::Amazing
    } else if performance > CREATIVITY_GREAT_THRESHOLD {
        CreativityLevel::Great
    } else {
        CreativityLevel::Good
    };

    VideoAnalysis {
        performance_score,
        earnings,
        feedback: format!(
            "Excellent creativity! Your trend interpretation was {performance_score}% on point."
        ),
        creativity_level,
    }
}
