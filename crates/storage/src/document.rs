use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use estude_core::model::{CardId, Profile, ProgressRecord, Role, TopicId, TopicStats, UserId, UserStats};
use estude_core::scheduler::{DEFAULT_EASE, EASE_FLOOR, SrsState};
use estude_core::time::epoch_day;

//
// ─── LENIENT DECODING ──────────────────────────────────────────────────────────
//

/// Field-level coercions for numbers that may arrive as strings, floats, or
/// null after years of writes from different client versions. Corrupted
/// persisted data must degrade to a safe default, never fault the scheduler.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use estude_core::scheduler::DEFAULT_EASE;

    fn coerce_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = Value::deserialize(deserializer)?;
        // `as` saturates, so absurd magnitudes clamp instead of wrapping.
        Ok(coerce_f64(&value).map_or(0, |f| f.round() as u32))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_f64(&value).map_or(0, |f| f.round() as u64))
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_f64(&value).map_or(0, |f| f as i64))
    }

    pub fn ease<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(coerce_f64(&value)
            .filter(|f| f.is_finite())
            .unwrap_or(DEFAULT_EASE))
    }
}

/// A review count inside a map value, decoded with the same leniency as the
/// top-level counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountDoc(pub u32);

impl<'de> Deserialize<'de> for CountDoc {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::u32(deserializer).map(CountDoc)
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

/// Persisted progress document, exactly as the external store sees it.
///
/// Every field is optional on read: a first-ever load may find any subset of
/// this shape. Writing always emits the full, value-normalized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressDocument {
    pub profile: ProfileDoc,
    pub stats: StatsDoc,
    pub topics: Vec<TopicEntryDoc>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDoc {
    pub id: String,
    pub name: String,
    pub church: String,
    pub role: String,
    pub avatar_color: String,
    pub is_profile_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatsDoc {
    #[serde(deserialize_with = "lenient::u32")]
    pub streak: u32,
    pub last_login_date: Option<String>,
    #[serde(deserialize_with = "lenient::millis")]
    pub last_access_timestamp: i64,
    #[serde(deserialize_with = "lenient::u32")]
    pub cards_today: u32,
    #[serde(deserialize_with = "lenient::u64")]
    pub cards_lifetime: u64,
    pub card_states: HashMap<String, CardStateDoc>,
    pub activity_log: BTreeMap<String, CountDoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardStateDoc {
    #[serde(deserialize_with = "lenient::u32")]
    pub interval: u32,
    #[serde(deserialize_with = "lenient::ease")]
    pub ease: f64,
    #[serde(deserialize_with = "lenient::u32")]
    pub repetitions: u32,
    pub next_review: Option<String>,
}

impl Default for CardStateDoc {
    fn default() -> Self {
        Self {
            interval: 0,
            ease: DEFAULT_EASE,
            repetitions: 0,
            next_review: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicEntryDoc {
    pub id: String,
    pub stats: TopicStatsDoc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TopicStatsDoc {
    #[serde(deserialize_with = "lenient::u32")]
    pub wrong: u32,
    #[serde(deserialize_with = "lenient::u32")]
    pub review: u32,
    #[serde(deserialize_with = "lenient::u32")]
    pub correct: u32,
}

//
// ─── DOMAIN MAPPING ────────────────────────────────────────────────────────────
//

impl ProgressDocument {
    /// Serializes a progress record into the value-normalized wire form.
    #[must_use]
    pub fn from_record(record: &ProgressRecord, updated_at: DateTime<Utc>) -> Self {
        let mut topics: Vec<TopicEntryDoc> = record
            .topics
            .iter()
            .map(|(id, stats)| TopicEntryDoc {
                id: id.as_str().to_owned(),
                stats: TopicStatsDoc {
                    wrong: stats.wrong,
                    review: stats.review,
                    correct: stats.correct,
                },
            })
            .collect();
        topics.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            profile: ProfileDoc::from_profile(&record.profile),
            stats: StatsDoc::from_stats(&record.stats),
            topics,
            updated_at: Some(updated_at.to_rfc3339()),
        }
    }

    /// Reconstructs the domain record, substituting defaults for anything the
    /// document does not carry. `fallback` supplies identity-provider fields
    /// when the stored profile is incomplete.
    #[must_use]
    pub fn into_record(self, fallback: Profile) -> ProgressRecord {
        let topics = self
            .topics
            .into_iter()
            .filter(|entry| !entry.id.trim().is_empty())
            .map(|entry| {
                (
                    TopicId::new(entry.id),
                    TopicStats {
                        wrong: entry.stats.wrong,
                        review: entry.stats.review,
                        correct: entry.stats.correct,
                    },
                )
            })
            .collect();

        ProgressRecord {
            profile: self.profile.into_profile(fallback),
            stats: self.stats.into_stats(),
            topics,
        }
    }
}

impl ProfileDoc {
    fn from_profile(profile: &Profile) -> Self {
        Self {
            id: profile.id.as_str().to_owned(),
            name: profile.name.clone(),
            church: profile.church.clone(),
            role: profile.role.as_str().to_owned(),
            avatar_color: profile.avatar_color.clone(),
            is_profile_complete: profile.is_profile_complete,
            email: profile.email.clone(),
            phone: profile.phone.clone(),
        }
    }

    fn into_profile(self, fallback: Profile) -> Profile {
        Profile {
            id: non_empty(self.id).map_or(fallback.id, UserId::new),
            name: non_empty(self.name).unwrap_or(fallback.name),
            church: non_empty(self.church).unwrap_or(fallback.church),
            role: Role::parse(&self.role),
            avatar_color: non_empty(self.avatar_color).unwrap_or(fallback.avatar_color),
            is_profile_complete: self.is_profile_complete,
            email: self.email.or(fallback.email),
            phone: self.phone.or(fallback.phone),
        }
    }
}

impl StatsDoc {
    fn from_stats(stats: &UserStats) -> Self {
        Self {
            streak: stats.streak,
            last_login_date: stats.last_login.map(|d| d.format("%Y-%m-%d").to_string()),
            last_access_timestamp: stats.last_access.timestamp_millis(),
            cards_today: stats.cards_today,
            cards_lifetime: stats.cards_lifetime,
            card_states: stats
                .card_states
                .iter()
                .map(|(id, state)| (id.as_str().to_owned(), CardStateDoc::from_state(state)))
                .collect(),
            activity_log: stats
                .activity
                .iter()
                .map(|(day, count)| (day.format("%Y-%m-%d").to_string(), CountDoc(*count)))
                .collect(),
        }
    }

    fn into_stats(self) -> UserStats {
        let last_login = self.last_login_date.as_deref().and_then(parse_day);
        // A record that has logged in at least once always carries a streak.
        let streak = if last_login.is_some() {
            self.streak.max(1)
        } else {
            self.streak
        };

        let last_access = Utc
            .timestamp_millis_opt(self.last_access_timestamp)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        UserStats {
            streak,
            last_login,
            last_access,
            cards_today: self.cards_today,
            cards_lifetime: self.cards_lifetime,
            card_states: self
                .card_states
                .into_iter()
                .filter(|(id, _)| !id.trim().is_empty())
                .map(|(id, doc)| (CardId::new(id), doc.into_state()))
                .collect(),
            activity: self
                .activity_log
                .into_iter()
                .filter_map(|(key, count)| parse_day(&key).map(|day| (day, count.0)))
                .collect(),
        }
    }
}

impl CardStateDoc {
    fn from_state(state: &SrsState) -> Self {
        Self {
            interval: state.interval_days,
            ease: state.ease,
            repetitions: state.repetitions,
            next_review: Some(state.due_on.format("%Y-%m-%d").to_string()),
        }
    }

    fn into_state(self) -> SrsState {
        SrsState {
            interval_days: self.interval,
            ease: self.ease.max(EASE_FLOOR),
            repetitions: self.repetitions,
            // An unreadable due date makes the card due immediately rather
            // than parking it in the future.
            due_on: self.next_review.as_deref().and_then(parse_day).unwrap_or_else(epoch_day),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Accepts both plain ISO dates and full timestamps; older clients persisted
/// either.
fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| value.parse::<DateTime<Utc>>().ok().map(|dt| dt.date_naive()))
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
