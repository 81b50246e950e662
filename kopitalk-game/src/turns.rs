//! Turn resolution: folding action outcomes into the session.
//!
//! Every operation here is a synchronous state transition on a caller-held
//! [`GameSession`]; nothing advances the turn implicitly. The orchestrating
//! caller applies an action, lets any resulting event be acknowledged, then
//! calls [`GameSession::advance_turn`] explicitly and commits the session to
//! its store.

use thiserror::Error;

use crate::analysis::{ConversationAnalysis, MalformedResult, VideoAnalysis};
use crate::constants::{
    CONVERSATION_BUDGET_FACTOR, DICE_MAX, DICE_MIN, LOG_CONVERSATION, LOG_DICE_ROLL,
    LOG_EVENT_PREFIX, LOG_MARKET_PREFIX, LOG_TURN_ADVANCE, LOG_VIDEO, SCORE_POINTS_DIVISOR,
};
use crate::events::RandomEvent;
use crate::session::GameSession;

/// Errors raised while resolving a turn action. Every failure leaves the
/// session unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TurnError {
    #[error("dice roll {value} outside {DICE_MIN}..={DICE_MAX}")]
    DiceOutOfRange { value: i32 },
    #[error("cannot afford {required} with cash {available}")]
    InsufficientFunds { required: i64, available: i64 },
    #[error(transparent)]
    Malformed(#[from] MalformedResult),
}

impl GameSession {
    /// Move the current player by a die roll, clamped at the end of the
    /// board. Does not advance the turn.
    ///
    /// # Errors
    ///
    /// [`TurnError::DiceOutOfRange`] for rolls outside `1..=6`.
    pub fn apply_dice_roll(&mut self, roll: i32) -> Result<(), TurnError> {
        if !(DICE_MIN..=DICE_MAX).contains(&roll) {
            return Err(TurnError::DiceOutOfRange { value: roll });
        }
        if let Some(member) = self.current_player_mut() {
            member.advance(roll);
        }
        self.logs.push(LOG_DICE_ROLL.to_string());
        self.touch();
        Ok(())
    }

    /// Hand the turn to the next member, round-robin. No wraparound side
    /// effects. A no-op before setup populates the roster.
    pub fn advance_turn(&mut self) {
        if self.family_members.is_empty() {
            return;
        }
        self.current_player_index = (self.current_player_index + 1) % self.family_members.len();
        self.logs.push(LOG_TURN_ADVANCE.to_string());
        self.touch();
    }

    /// Fold a conversation result into the session.
    ///
    /// Conversation is a whole-family activity: every member moves and gains
    /// quality points, and the shared budget grows by twice the movement.
    /// Individual cash is untouched — this asymmetry versus dice and video
    /// actions is intentional.
    ///
    /// # Errors
    ///
    /// Rejects payloads outside the documented shape/range contract.
    pub fn apply_conversation_result(
        &mut self,
        result: &ConversationAnalysis,
    ) -> Result<(), TurnError> {
        result.validate()?;
        for member in &mut self.family_members {
            member.advance(result.movement);
            member.points += result.quality / SCORE_POINTS_DIVISOR;
        }
        self.family_budget += i64::from(result.movement) * CONVERSATION_BUDGET_FACTOR;
        self.logs.push(LOG_CONVERSATION.to_string());
        self.touch();
        Ok(())
    }

    /// Fold a trend-video result into the session.
    ///
    /// Earnings are split evenly across members (the remainder is dropped,
    /// not distributed) while the shared budget gains the full amount. Budget
    /// and per-member cash both increasing is deliberate double-accounting,
    /// kept as-is.
    ///
    /// # Errors
    ///
    /// Rejects payloads outside the documented shape/range contract.
    pub fn apply_video_result(&mut self, result: &VideoAnalysis) -> Result<(), TurnError> {
        result.validate()?;
        let count = self.family_members.len() as i64;
        if count > 0 {
            let share = result.earnings / count;
            for member in &mut self.family_members {
                member.cash += share;
                member.points += result.performance_score / SCORE_POINTS_DIVISOR;
            }
        }
        self.family_budget += result.earnings;
        self.logs.push(LOG_VIDEO.to_string());
        self.touch();
        Ok(())
    }

    /// Apply a random event's effect to every member. Events without an
    /// effect only leave a log entry. Cash and points carry no floor and may
    /// go negative; movement is clamped onto the board.
    pub fn apply_random_event(&mut self, event: &RandomEvent) {
        if let Some(effect) = &event.effect {
            for member in &mut self.family_members {
                member.cash += effect.money.unwrap_or(0);
                member.advance(effect.movement.unwrap_or(0));
                member.points += effect.points.unwrap_or(0);
            }
        }
        self.logs
            .push(format!("{}{}", LOG_EVENT_PREFIX, event.kind));
        self.touch();
    }

    /// Charge the current player for a shopping trip, crediting back the
    /// resale portion. The only turn operation with an explicit failure
    /// condition.
    ///
    /// # Errors
    ///
    /// [`TurnError::InsufficientFunds`] when the player's cash cannot cover
    /// the cost; no state is mutated in that case.
    pub fn apply_market_transaction(
        &mut self,
        market_id: &str,
        cost: i64,
        resale_portion: i64,
    ) -> Result<(), TurnError> {
        {
            let Some(member) = self.current_player_mut() else {
                return Ok(());
            };
            if member.cash < cost {
                return Err(TurnError::InsufficientFunds {
                    required: cost,
                    available: member.cash,
                });
            }
            member.cash = member.cash - cost + resale_portion;
        }
        self.logs.push(format!("{LOG_MARKET_PREFIX}{market_id}"));
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BondingLevel, CreativityLevel};
    use crate::constants::BOARD_LENGTH;
    use crate::events::{EventEffect, EventKind};
    use crate::family::{Role, RosterEntry};
    use crate::session::Difficulty;

    fn gameplay_session() -> GameSession {
        let mut session = GameSession::new("game_test");
        let roster = [
            RosterEntry::new("Ah Gong", Role::Grandfather),
            RosterEntry::new("Mei", Role::Daughter),
        ];
        session.complete_setup(Difficulty::Medium, &roster).unwrap();
        session
    }

    fn conversation(quality: i32, movement: i32) -> ConversationAnalysis {
        ConversationAnalysis {
            quality,
            movement,
            feedback: String::new(),
            topics_covered: vec![],
            bonding_level: BondingLevel::High,
        }
    }

    fn video(performance_score: i32, earnings: i64) -> VideoAnalysis {
        VideoAnalysis {
            performance_score,
            earnings,
            feedback: String::new(),
            creativity_level: CreativityLevel::Great,
        }
    }

    #[test]
    fn dice_roll_moves_current_player_only() {
        let mut session = gameplay_session();
        session.apply_dice_roll(6).unwrap();
        assert_eq!(session.family_members[0].position, 6);
        assert_eq!(session.family_members[1].position, 0);
        assert_eq!(session.current_player_index, 0, "dice must not advance turn");
    }

    #[test]
    fn dice_roll_clamps_at_board_end() {
        let mut session = gameplay_session();
        session.family_members[0].position = 18;
        session.apply_dice_roll(5).unwrap();
        assert_eq!(session.family_members[0].position, BOARD_LENGTH);
    }

    #[test]
    fn dice_roll_rejects_out_of_range() {
        let mut session = gameplay_session();
        assert_eq!(
            session.apply_dice_roll(0),
            Err(TurnError::DiceOutOfRange { value: 0 })
        );
        assert_eq!(
            session.apply_dice_roll(7),
            Err(TurnError::DiceOutOfRange { value: 7 })
        );
        assert_eq!(session.family_members[0].position, 0);
    }

    #[test]
    fn turn_rotation_wraps_round_robin() {
        let mut session = gameplay_session();
        session.advance_turn();
        assert_eq!(session.current_player_index, 1);
        session.advance_turn();
        assert_eq!(session.current_player_index, 0);
    }

    #[test]
    fn full_rotation_returns_to_start() {
        let mut session = GameSession::new("game_test");
        let roster = [
            RosterEntry::new("Ah Gong", Role::Grandfather),
            RosterEntry::new("Por Por", Role::Grandmother),
            RosterEntry::new("Mei", Role::Daughter),
            RosterEntry::new("Jun", Role::Son),
        ];
        session.complete_setup(Difficulty::Easy, &roster).unwrap();
        for _ in 0..session.member_count() {
            session.advance_turn();
        }
        assert_eq!(session.current_player_index, 0);
    }

    #[test]
    fn conversation_applies_to_every_member() {
        let mut session = gameplay_session();
        session.family_members[0].position = 6;
        session.apply_conversation_result(&conversation(80, 3)).unwrap();

        assert_eq!(session.family_members[0].position, 9);
        assert_eq!(session.family_members[1].position, 3);
        for member in &session.family_members {
            assert_eq!(member.points, 8);
            assert_eq!(member.cash, 0, "conversation must not touch cash");
        }
        assert_eq!(session.family_budget, 106);
    }

    #[test]
    fn conversation_movement_clamps_per_member() {
        let mut session = gameplay_session();
        session.family_members[0].position = 19;
        session.apply_conversation_result(&conversation(50, 4)).unwrap();
        assert_eq!(session.family_members[0].position, BOARD_LENGTH);
        assert_eq!(session.family_members[1].position, 4);
        // Budget gain is independent of clamping.
        assert_eq!(session.family_budget, 108);
    }

    #[test]
    fn malformed_conversation_leaves_session_unchanged() {
        let mut session = gameplay_session();
        let before = session.clone();
        let err = session
            .apply_conversation_result(&conversation(120, 3))
            .unwrap_err();
        assert!(matches!(err, TurnError::Malformed(_)));
        assert_eq!(session, before);
    }

    #[test]
    fn video_splits_earnings_and_double_counts_budget() {
        let mut session = gameplay_session();
        session.apply_video_result(&video(90, 9)).unwrap();

        // 9 / 2 = 4 each, remainder dropped.
        for member in &session.family_members {
            assert_eq!(member.cash, 4);
            assert_eq!(member.points, 9);
        }
        // Budget takes the full amount on top of the per-member shares.
        assert_eq!(session.family_budget, 109);
    }

    #[test]
    fn event_effect_applies_to_every_member() {
        let mut session = gameplay_session();
        let event = RandomEvent {
            kind: EventKind::FunnyDance,
            title: "Funny Dance".to_string(),
            description: String::new(),
            emoji: "💃".to_string(),
            effect: Some(EventEffect {
                money: Some(-3),
                movement: Some(2),
                points: Some(-12),
            }),
        };
        session.apply_random_event(&event);

        for member in &session.family_members {
            assert_eq!(member.cash, -3, "cash has no floor");
            assert_eq!(member.position, 2);
            assert_eq!(member.points, -12, "points have no floor");
        }
        assert!(session.logs.iter().any(|entry| entry == "log.event.funny_dance"));
    }

    #[test]
    fn event_without_effect_only_logs() {
        let mut session = gameplay_session();
        let before_members = session.family_members.clone();
        let event = RandomEvent {
            kind: EventKind::SnackTime,
            title: "Snack Time".to_string(),
            description: String::new(),
            emoji: "🍿".to_string(),
            effect: None,
        };
        session.apply_random_event(&event);
        assert_eq!(session.family_members, before_members);
        assert!(session.logs.iter().any(|entry| entry == "log.event.snack_time"));
    }

    #[test]
    fn market_transaction_debits_current_player_only() {
        let mut session = gameplay_session();
        session.family_members[0].cash = 40;
        session.family_members[1].cash = 40;
        session
            .apply_market_transaction("wet_market", 30, 8)
            .unwrap();
        assert_eq!(session.family_members[0].cash, 18);
        assert_eq!(session.family_members[1].cash, 40);
        assert_eq!(session.family_budget, 100, "shopping never debits the budget");
    }

    #[test]
    fn market_transaction_insufficient_funds_mutates_nothing() {
        let mut session = gameplay_session();
        session.family_members[0].cash = 10;
        let before = session.clone();
        let err = session
            .apply_market_transaction("causeway", 25, 7)
            .unwrap_err();
        assert_eq!(
            err,
            TurnError::InsufficientFunds {
                required: 25,
                available: 10,
            }
        );
        assert_eq!(session, before);
    }
}
