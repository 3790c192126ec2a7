use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{CardId, TopicId};

/// Difficulty levels run from 1 (introductory) to 10 (examination depth).
pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 10;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card row is missing a topic id")]
    BlankTopic,

    #[error("card row is missing a category")]
    BlankCategory,

    #[error("card row is missing a question")]
    BlankQuestion,

    #[error("card row is missing an answer")]
    BlankAnswer,
}

//
// ─── CATALOG ROW ───────────────────────────────────────────────────────────────
//

/// One row of the external catalog feed, before validation.
///
/// The feed guarantees nothing: any field may be empty or absent. Rows that
/// cannot provide the first four fields are excluded during ingest; a missing
/// or out-of-range level falls back to 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardRow {
    pub topic_id: String,
    pub category: String,
    pub question: String,
    pub answer: String,
    pub level: Option<u8>,
    pub details: Option<String>,
}

impl CardRow {
    #[must_use]
    pub fn new(
        topic_id: impl Into<String>,
        category: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            topic_id: topic_id.into(),
            category: category.into(),
            question: question.into(),
            answer: answer.into(),
            level: None,
            details: None,
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

//
// ─── CARD ──────────────────────────────────────────────────────────────────────
//

/// A single question/answer card.
///
/// Cards are immutable once built; a catalog refresh replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    topic_id: TopicId,
    category: String,
    question: String,
    answer: String,
    level: u8,
    details: Option<String>,
}

impl Card {
    /// Validates a catalog row into a card.
    ///
    /// # Errors
    ///
    /// Returns a `CardError` naming the first blank mandatory field.
    pub fn from_row(id: CardId, row: CardRow) -> Result<Self, CardError> {
        let topic_id = non_blank(row.topic_id).ok_or(CardError::BlankTopic)?;
        let category = non_blank(row.category).ok_or(CardError::BlankCategory)?;
        let question = non_blank(row.question).ok_or(CardError::BlankQuestion)?;
        let answer = non_blank(row.answer).ok_or(CardError::BlankAnswer)?;

        let level = row
            .level
            .map_or(MIN_LEVEL, |l| l.clamp(MIN_LEVEL, MAX_LEVEL));
        let details = row.details.and_then(non_blank);

        Ok(Self {
            id,
            topic_id: TopicId::new(topic_id),
            category,
            question,
            answer,
            level,
            details,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    #[must_use]
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_owned())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
