use serde::{Deserialize, Serialize};

use crate::model::ids::TopicId;
use crate::model::outcome::Outcome;

//
// ─── TOPIC ────────────────────────────────────────────────────────────────────
//

/// Presentation metadata for a study topic.
///
/// The roster is fixed by the curriculum; per-topic card totals come from the
/// catalog and per-topic outcome tallies live in [`TopicStats`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    pub category: String,
    pub icon: String,
    pub color: String,
}

impl Topic {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: TopicId::new(id),
            name: name.into(),
            category: category.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// The built-in theology roster.
#[must_use]
pub fn builtin_topics() -> Vec<Topic> {
    let doctrines = "1 - Doutrinas Teológicas";
    vec![
        Topic::new("antro", "Antropologia e Hamartiologia", doctrines, "person", "blue"),
        Topic::new("bib", "Bibliologia", doctrines, "menu_book", "blue"),
        Topic::new("theo", "Doutrina de Deus", doctrines, "psychology_alt", "blue"),
        Topic::new("cris", "Cristologia", doctrines, "redeem", "blue"),
        Topic::new("pneu", "Pneumatologia", doctrines, "air", "blue"),
        Topic::new("sote", "Soteriologia", doctrines, "auto_awesome", "blue"),
        Topic::new("ecles", "Eclesiologia", doctrines, "church", "blue"),
        Topic::new("escat", "Escatologia", doctrines, "hourglass_empty", "blue"),
        Topic::new(
            "rel",
            "Ética Pastoral e Casuística",
            "2 - Ética Pastoral e Casuística",
            "groups",
            "emerald",
        ),
        Topic::new(
            "hist_orig",
            "Origem e História dos Batistas",
            "3 - Origem e História dos Batistas",
            "history_edu",
            "purple",
        ),
    ]
}

//
// ─── TOPIC STATS ──────────────────────────────────────────────────────────────
//

/// Per-topic outcome tally.
///
/// Counts accumulate for the lifetime of the progress record; they are never
/// reset or decremented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicStats {
    pub wrong: u32,
    pub review: u32,
    pub correct: u32,
}

impl TopicStats {
    /// Tallies one reviewed card.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Wrong => self.wrong += 1,
            Outcome::Review => self.review += 1,
            Outcome::Correct => self.correct += 1,
        }
    }

    /// Total number of reviews tallied under this topic.
    #[must_use]
    pub fn total_reviewed(&self) -> u32 {
        self.wrong + self.review + self.correct
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
