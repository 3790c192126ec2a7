use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CardId, TopicId};

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Errors that can occur while decoding a review outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    #[error("unknown review outcome: {0:?}")]
    Unknown(String),

    #[error("invalid review outcome value: {0}")]
    InvalidValue(u8),
}

//
// ─── OUTCOME ──────────────────────────────────────────────────────────────────
//

/// Self-reported recall quality for a single card review.
///
/// - `Wrong`: failed to recall; the card becomes due again immediately
/// - `Review`: partial recall; the card comes back after one day
/// - `Correct`: full recall; the review interval grows
///
/// An unrecognized outcome is a contract violation and is rejected rather
/// than mapped to a default, since it would corrupt scheduling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Wrong,
    Review,
    Correct,
}

impl Outcome {
    /// Parses the wire spelling of an outcome (`wrong`, `review`, `correct`).
    ///
    /// # Errors
    ///
    /// Returns `OutcomeError::Unknown` for any other string.
    pub fn parse(value: &str) -> Result<Self, OutcomeError> {
        match value {
            "wrong" => Ok(Self::Wrong),
            "review" => Ok(Self::Review),
            "correct" => Ok(Self::Correct),
            other => Err(OutcomeError::Unknown(other.to_owned())),
        }
    }

    /// Converts a numeric outcome (0-2) to an `Outcome`.
    ///
    /// # Errors
    ///
    /// Returns `OutcomeError::InvalidValue` if the value is not in 0-2.
    pub fn from_u8(value: u8) -> Result<Self, OutcomeError> {
        match value {
            0 => Ok(Self::Wrong),
            1 => Ok(Self::Review),
            2 => Ok(Self::Correct),
            _ => Err(OutcomeError::InvalidValue(value)),
        }
    }

    /// Wire spelling of this outcome.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wrong => "wrong",
            Self::Review => "review",
            Self::Correct => "correct",
        }
    }
}

//
// ─── REVIEW LOG ───────────────────────────────────────────────────────────────
//

/// Record of a single card review event.
///
/// Stores which card was reviewed, under which topic, when, and how the
/// recall went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewLog {
    pub card_id: CardId,
    pub topic_id: TopicId,
    pub outcome: Outcome,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewLog {
    #[must_use]
    pub fn new(
        card_id: CardId,
        topic_id: TopicId,
        outcome: Outcome,
        reviewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            card_id,
            topic_id,
            outcome,
            reviewed_at,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
