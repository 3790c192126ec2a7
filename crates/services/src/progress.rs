//! Progress aggregation over the stream of review events.
//!
//! These functions are the only writers of a [`ProgressRecord`]: one applies
//! a single reviewed card, the other applies the once-per-session day
//! rollover. Both take the current date and instant as parameters so calendar
//! decisions are deterministic under test. They are local, synchronous, and
//! cannot fail; persistence is the caller's separately-triggered concern.

use chrono::{DateTime, NaiveDate, Utc};

use estude_core::model::{CardId, Outcome, ProgressRecord, ReviewLog, TopicId};
use estude_core::scheduler;

/// What a session start did to the login streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Already logged in today; nothing moved.
    Unchanged,
    /// Logged in yesterday too; the streak grew to the carried value.
    Extended(u32),
    /// Gap of more than one day (or first-ever login); back to 1.
    Reset,
}

/// Applies one reviewed card to the record, in review order.
///
/// Increments the daily and lifetime counters, tallies the topic outcome,
/// bumps today's activity entry, stamps the access time, and advances the
/// card's scheduling state through [`scheduler::advance`].
///
/// Returns the review event for callers that keep a session log.
pub fn record_review(
    record: &mut ProgressRecord,
    card_id: &CardId,
    topic_id: &TopicId,
    outcome: Outcome,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> ReviewLog {
    let stats = &mut record.stats;

    stats.cards_today += 1;
    stats.cards_lifetime += 1;
    stats.last_access = now;
    *stats.activity.entry(today).or_insert(0) += 1;

    let next = scheduler::advance(stats.card_states.get(card_id), outcome, today);
    stats.card_states.insert(card_id.clone(), next);

    record.topics.entry(topic_id.clone()).or_default().record(outcome);

    ReviewLog::new(card_id.clone(), topic_id.clone(), outcome, now)
}

/// Applies the streak/day rollover, once per authenticated session.
///
/// Streak policy:
/// - last login today: unchanged;
/// - last login yesterday: streak + 1;
/// - anything older, or no login ever: streak = 1.
///
/// `cards_today` is reset to 0 whenever a new calendar day is detected here;
/// [`record_review`] never zeroes it.
pub fn on_session_start(
    record: &mut ProgressRecord,
    today: NaiveDate,
    now: DateTime<Utc>,
) -> StreakChange {
    let stats = &mut record.stats;

    let change = match stats.last_login {
        Some(last) if last == today => StreakChange::Unchanged,
        Some(last) if last.succ_opt() == Some(today) => {
            stats.streak += 1;
            StreakChange::Extended(stats.streak)
        }
        _ => {
            stats.streak = 1;
            StreakChange::Reset
        }
    };

    if stats.last_login != Some(today) {
        stats.cards_today = 0;
        stats.last_login = Some(today);
    }
    stats.last_access = now;

    change
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use estude_core::model::Profile;
    use estude_core::time::{fixed_now, fixed_today};

    fn record() -> ProgressRecord {
        ProgressRecord::new(Profile::guest())
    }

    #[test]
    fn review_bumps_every_counter_once() {
        let mut record = record();
        let today = fixed_today();
        let card = CardId::new("card-0");
        let topic = TopicId::new("bib");

        let log = record_review(&mut record, &card, &topic, Outcome::Correct, today, fixed_now());

        assert_eq!(log.outcome, Outcome::Correct);
        assert_eq!(record.stats.cards_today, 1);
        assert_eq!(record.stats.cards_lifetime, 1);
        assert_eq!(record.stats.activity_on(today), 1);
        assert_eq!(record.stats.last_access, fixed_now());
        assert_eq!(record.topic_stats(&topic).correct, 1);

        let state = record.stats.card_state(&card).unwrap();
        assert_eq!(state.repetitions, 1);
        assert_eq!(state.interval_days, 1);
    }

    #[test]
    fn lifetime_count_grows_by_exactly_the_number_of_events() {
        let mut record = record();
        let today = fixed_today();
        let topic = TopicId::new("antro");
        let before = record.stats.cards_lifetime;

        for i in 0..7 {
            let card = CardId::new(format!("card-{i}"));
            let outcome = if i % 2 == 0 { Outcome::Correct } else { Outcome::Wrong };
            record_review(&mut record, &card, &topic, outcome, today, fixed_now());
        }

        assert_eq!(record.stats.cards_lifetime, before + 7);
        assert_eq!(record.stats.activity_on(today), 7);
        assert_eq!(record.topic_stats(&topic).total_reviewed(), 7);
    }

    #[test]
    fn consecutive_reviews_of_one_card_compound_its_state() {
        let mut record = record();
        let today = fixed_today();
        let card = CardId::new("card-0");
        let topic = TopicId::new("bib");

        record_review(&mut record, &card, &topic, Outcome::Correct, today, fixed_now());
        record_review(&mut record, &card, &topic, Outcome::Correct, today, fixed_now());

        let state = record.stats.card_state(&card).unwrap();
        assert_eq!(state.repetitions, 2);
        assert_eq!(state.interval_days, 4);
    }

    #[test]
    fn first_ever_session_start_sets_streak_to_one() {
        let mut record = record();
        let today = fixed_today();

        let change = on_session_start(&mut record, today, fixed_now());

        assert_eq!(change, StreakChange::Reset);
        assert_eq!(record.stats.streak, 1);
        assert_eq!(record.stats.last_login, Some(today));
    }

    #[test]
    fn session_start_next_day_extends_the_streak() {
        let mut record = record();
        let today = fixed_today();
        record.stats.streak = 4;
        record.stats.last_login = Some(today.pred_opt().unwrap());

        let change = on_session_start(&mut record, today, fixed_now());

        assert_eq!(change, StreakChange::Extended(5));
        assert_eq!(record.stats.streak, 5);
    }

    #[test]
    fn session_start_after_a_gap_resets_the_streak() {
        let mut record = record();
        let today = fixed_today();
        record.stats.streak = 9;
        record.stats.last_login = Some(today - Duration::days(2));

        let change = on_session_start(&mut record, today, fixed_now());

        assert_eq!(change, StreakChange::Reset);
        assert_eq!(record.stats.streak, 1);
    }

    #[test]
    fn same_day_session_start_changes_nothing_but_the_access_time() {
        let mut record = record();
        let today = fixed_today();
        record.stats.streak = 4;
        record.stats.last_login = Some(today);
        record.stats.cards_today = 6;

        let change = on_session_start(&mut record, today, fixed_now());

        assert_eq!(change, StreakChange::Unchanged);
        assert_eq!(record.stats.streak, 4);
        assert_eq!(record.stats.cards_today, 6);
        assert_eq!(record.stats.last_access, fixed_now());
    }

    #[test]
    fn new_day_resets_cards_today() {
        let mut record = record();
        let yesterday = fixed_today().pred_opt().unwrap();
        record.stats.streak = 1;
        record.stats.last_login = Some(yesterday);
        record.stats.cards_today = 15;

        on_session_start(&mut record, fixed_today(), fixed_now());

        assert_eq!(record.stats.cards_today, 0);
    }
}
