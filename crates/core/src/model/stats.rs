use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::model::ids::{CardId, TopicId};
use crate::model::profile::Profile;
use crate::model::topic::TopicStats;
use crate::scheduler::SrsState;

//
// ─── USER STATS ───────────────────────────────────────────────────────────────
//

/// Lifetime and daily counters for one user.
///
/// Owned exclusively by that user's progress record; the external store's
/// merge-write behavior is the persistence adapter's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    /// Consecutive calendar days with at least one authenticated session.
    /// Zero only before the first-ever session start.
    pub streak: u32,
    /// Day of the most recent session start; `None` before the first one.
    pub last_login: Option<NaiveDate>,
    /// Instant of the most recent session start or review.
    pub last_access: DateTime<Utc>,
    /// Cards reviewed since the last day rollover.
    pub cards_today: u32,
    /// Total review actions ever recorded; never decreases.
    pub cards_lifetime: u64,
    /// Per-card scheduling state; entries accumulate and are never deleted.
    pub card_states: HashMap<CardId, SrsState>,
    /// Reviews per calendar day; append-only per date key.
    pub activity: BTreeMap<NaiveDate, u32>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            streak: 0,
            last_login: None,
            last_access: DateTime::<Utc>::UNIX_EPOCH,
            cards_today: 0,
            cards_lifetime: 0,
            card_states: HashMap::new(),
            activity: BTreeMap::new(),
        }
    }
}

impl UserStats {
    /// Scheduling state for a card, if it has ever been reviewed.
    #[must_use]
    pub fn card_state(&self, card_id: &CardId) -> Option<&SrsState> {
        self.card_states.get(card_id)
    }

    /// Reviews recorded on the given day.
    #[must_use]
    pub fn activity_on(&self, day: NaiveDate) -> u32 {
        self.activity.get(&day).copied().unwrap_or(0)
    }
}

//
// ─── PROGRESS RECORD ──────────────────────────────────────────────────────────
//

/// The complete progress state of one user: profile, counters, per-card SRS
/// state, and per-topic tallies.
///
/// This value is loaded once at session start, mutated only through the
/// aggregation functions in the services layer, and written back explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub profile: Profile,
    pub stats: UserStats,
    pub topics: HashMap<TopicId, TopicStats>,
}

impl ProgressRecord {
    /// Fresh record for a user with no persisted history.
    #[must_use]
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            stats: UserStats::default(),
            topics: HashMap::new(),
        }
    }

    /// Tally for a topic, zeroed if the topic has never been reviewed.
    #[must_use]
    pub fn topic_stats(&self, topic_id: &TopicId) -> TopicStats {
        self.topics.get(topic_id).copied().unwrap_or_default()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
