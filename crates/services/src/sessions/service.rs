use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;

use estude_core::model::{Card, Outcome, ProgressRecord, ReviewLog};

use super::plan::SessionPlan;
use super::progress::SessionProgress;
use crate::error::SessionError;
use crate::progress;

/// One bounded, ordered batch of cards being reviewed in one sitting.
///
/// The session owns its card order and cursor; every answered card flows
/// through the progress aggregator in strict answer order. Abandoning the
/// session mid-way is just dropping the value — cards not yet answered leave
/// no trace in scheduling state.
///
/// A session over an empty plan is complete from the start; the caller shows
/// its "nothing to review" state instead of a first card.
pub struct StudySession {
    cards: Vec<Card>,
    current: usize,
    reviews: Vec<ReviewLog>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl StudySession {
    /// Creates a session over a built plan.
    ///
    /// `started_at` should come from the services layer clock to keep time
    /// deterministic.
    #[must_use]
    pub fn new(plan: SessionPlan, started_at: DateTime<Utc>) -> Self {
        Self {
            cards: plan.cards,
            current: 0,
            reviews: Vec::new(),
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Review events recorded so far, in answer order.
    #[must_use]
    pub fn reviews(&self) -> &[ReviewLog] {
        &self.reviews
    }

    /// Total number of cards in this session.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Number of cards that have already been answered.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.reviews.len()
    }

    /// Number of remaining cards that have not been answered yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.current)
    }

    /// True when every card has been answered — immediately so for a session
    /// built from an empty plan.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.cards.len()
    }

    /// True when the plan matched nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total_cards(),
            answered: self.answered_count(),
            remaining: self.remaining(),
            is_complete: self.is_complete(),
        }
    }

    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.current)
    }

    /// Applies an outcome to the current card and advances the cursor.
    ///
    /// The record mutation goes through [`progress::record_review`], which
    /// also advances the card's scheduling state. `today`/`now` should come
    /// from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if every card has been answered.
    pub fn answer_current(
        &mut self,
        record: &mut ProgressRecord,
        outcome: Outcome,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<&ReviewLog, SessionError> {
        let Some(card) = self.cards.get(self.current) else {
            return Err(SessionError::Completed);
        };

        let log = progress::record_review(record, card.id(), card.topic_id(), outcome, today, now);
        self.reviews.push(log);

        self.current += 1;
        if self.current >= self.cards.len() {
            self.completed_at = Some(now);
        }

        self.reviews.last().ok_or(SessionError::Completed)
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("cards_len", &self.cards.len())
            .field("current", &self.current)
            .field("reviews_len", &self.reviews.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
