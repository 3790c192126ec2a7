use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Outcome;

/// Ease factor assigned to a card on its first review.
pub const DEFAULT_EASE: f64 = 2.5;

/// Lower bound for the ease factor; no outcome sequence can push ease below it.
pub const EASE_FLOOR: f64 = 1.3;

//
// ─── SRS STATE ─────────────────────────────────────────────────────────────────
//

/// Per-card scheduling state.
///
/// Created lazily on a card's first review and mutated only by [`advance`];
/// the state map accumulates monotonically and entries are never deleted.
///
/// # Fields
///
/// * `interval_days` - days until the card is due again
/// * `ease` - growth multiplier for the interval (floored at [`EASE_FLOOR`])
/// * `repetitions` - consecutive-correct streak; resets on any non-correct outcome
/// * `due_on` - calendar day the card becomes due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SrsState {
    pub interval_days: u32,
    pub ease: f64,
    pub repetitions: u32,
    pub due_on: NaiveDate,
}

impl SrsState {
    /// State of a card that has never been reviewed: due immediately.
    #[must_use]
    pub fn fresh(today: NaiveDate) -> Self {
        Self {
            interval_days: 0,
            ease: DEFAULT_EASE,
            repetitions: 0,
            due_on: today,
        }
    }

    /// Whether the card is due on the given day.
    #[must_use]
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_on <= today
    }
}

//
// ─── TRANSITION ────────────────────────────────────────────────────────────────
//

/// Computes the next scheduling state from the current one and a review outcome.
///
/// Pure and total: there is no randomness, no clock access, and no error
/// path. The caller owns persistence of the returned state.
///
/// Policy:
/// - `Correct` extends the consecutive-correct streak; the interval is 1 day
///   on the first correct, 4 days on the second, then grows by the previous
///   ease. Ease rises by 0.1.
/// - `Review` (partial recall) resets the streak, schedules 1 day out, and
///   drops ease by 0.15.
/// - `Wrong` resets the streak, makes the card due immediately, and drops
///   ease by 0.2.
///
/// # Examples
///
/// ```
/// # use estude_core::scheduler::{advance, DEFAULT_EASE};
/// # use estude_core::model::Outcome;
/// # use estude_core::time::fixed_today;
/// let today = fixed_today();
/// let state = advance(None, Outcome::Correct, today);
/// assert_eq!(state.interval_days, 1);
/// assert_eq!(state.repetitions, 1);
/// assert_eq!(state.ease, DEFAULT_EASE + 0.1);
/// ```
#[must_use]
pub fn advance(state: Option<&SrsState>, outcome: Outcome, today: NaiveDate) -> SrsState {
    let fresh = SrsState::fresh(today);
    let prev = state.unwrap_or(&fresh);

    let (interval_days, ease, repetitions) = match outcome {
        Outcome::Correct => {
            let repetitions = prev.repetitions + 1;
            let interval_days = match repetitions {
                1 => 1,
                2 => 4,
                _ => grown_interval(prev.interval_days, prev.ease),
            };
            (interval_days, floor_ease(prev.ease + 0.1), repetitions)
        }
        Outcome::Review => (1, floor_ease(prev.ease - 0.15), 0),
        Outcome::Wrong => (0, floor_ease(prev.ease - 0.2), 0),
    };

    SrsState {
        interval_days,
        ease,
        repetitions,
        due_on: today + Duration::days(i64::from(interval_days)),
    }
}

fn floor_ease(ease: f64) -> f64 {
    ease.max(EASE_FLOOR)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn grown_interval(interval_days: u32, ease: f64) -> u32 {
    // ease >= 1.3, so the interval never shrinks here.
    (f64::from(interval_days) * ease).round() as u32
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
