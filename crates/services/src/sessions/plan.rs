use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashMap;

use chrono::NaiveDate;
use estude_core::model::{Card, CardId, Catalog, StudySettings, TopicId};
use estude_core::scheduler::SrsState;
use estude_core::time::epoch_day;

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Optional topic/level restriction on the candidate set.
///
/// An unset axis means "all"; both axes may be combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionFilter {
    pub topic: Option<TopicId>,
    pub level: Option<u8>,
}

impl SessionFilter {
    /// No restriction: the whole catalog is eligible.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_topic(topic: TopicId) -> Self {
        Self {
            topic: Some(topic),
            level: None,
        }
    }

    #[must_use]
    pub fn for_level(level: u8) -> Self {
        Self {
            topic: None,
            level: Some(level),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    fn matches(&self, card: &Card) -> bool {
        self.topic.as_ref().is_none_or(|t| card.topic_id() == t)
            && self.level.is_none_or(|l| card.level() == l)
    }
}

//
// ─── PLAN ──────────────────────────────────────────────────────────────────────
//

/// Selection result for a session build.
///
/// `cards` is already in presentation order; which cards made the cut was
/// decided by due order before the shuffle.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub cards: Vec<Card>,
    /// Selected cards that have never been reviewed.
    pub unseen_selected: usize,
    /// Selected cards with recorded scheduling state.
    pub scheduled_selected: usize,
}

impl SessionPlan {
    /// Total number of cards in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Returns true when no cards matched the filter.
    ///
    /// An empty plan is the normal "nothing to review" outcome, not a fault.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

//
// ─── BUILDER ───────────────────────────────────────────────────────────────────
//

/// Assembles the bounded, ordered batch of cards for one study session.
pub struct SessionBuilder<'a> {
    settings: &'a StudySettings,
}

impl<'a> SessionBuilder<'a> {
    #[must_use]
    pub fn new(settings: &'a StudySettings) -> Self {
        Self { settings }
    }

    /// Builds a session plan from the catalog and the per-card SRS states.
    ///
    /// Selection: filter, then ascending due date — a card with no recorded
    /// state counts as due at the epoch, so never-seen cards come first, in
    /// catalog order among themselves — then truncate to the session size.
    /// The surviving subset alone is shuffled with the caller's `rng`;
    /// ordering decides membership, not presentation.
    pub fn build<R: Rng + ?Sized>(
        &self,
        catalog: &Catalog,
        card_states: &HashMap<CardId, SrsState>,
        filter: &SessionFilter,
        rng: &mut R,
    ) -> SessionPlan {
        let mut candidates: Vec<Card> = catalog
            .iter()
            .filter(|card| filter.matches(card))
            .cloned()
            .collect();

        // Stable sort keeps catalog order within equal due dates.
        candidates.sort_by_key(|card| due_key(card_states.get(card.id())));
        candidates.truncate(self.limit());

        let unseen_selected = candidates
            .iter()
            .filter(|card| !card_states.contains_key(card.id()))
            .count();
        let scheduled_selected = candidates.len() - unseen_selected;

        candidates.as_mut_slice().shuffle(rng);

        SessionPlan {
            cards: candidates,
            unseen_selected,
            scheduled_selected,
        }
    }

    fn limit(&self) -> usize {
        usize::try_from(self.settings.session_size()).unwrap_or(usize::MAX)
    }
}

fn due_key(state: Option<&SrsState>) -> NaiveDate {
    state.map_or_else(epoch_day, |s| s.due_on)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use estude_core::model::{CardRow, Outcome};
    use estude_core::scheduler::advance;
    use estude_core::time::fixed_today;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::from_rows(vec![
            CardRow::new("antro", "Doutrinas", "Q0", "A0").with_level(1),
            CardRow::new("antro", "Doutrinas", "Q1", "A1").with_level(2),
            CardRow::new("bib", "Doutrinas", "Q2", "A2").with_level(1),
            CardRow::new("bib", "Doutrinas", "Q3", "A3").with_level(3),
            CardRow::new("escat", "Doutrinas", "Q4", "A4").with_level(1),
        ])
        .catalog
    }

    fn settings(size: u32) -> StudySettings {
        StudySettings::default().with_session_size(size).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn cap_is_respected_and_cards_come_from_the_catalog() {
        let catalog = catalog();
        let settings = settings(2);
        let plan = SessionBuilder::new(&settings).build(
            &catalog,
            &HashMap::new(),
            &SessionFilter::all(),
            &mut rng(),
        );

        assert_eq!(plan.total(), 2);
        let ids: HashSet<_> = plan.cards.iter().map(|c| c.id().clone()).collect();
        assert_eq!(ids.len(), 2, "no duplicates");
        for card in &plan.cards {
            assert!(catalog.get(card.id()).is_some());
        }
    }

    #[test]
    fn topic_filter_excludes_everything_else() {
        let catalog = catalog();
        let settings = settings(10);
        let filter = SessionFilter::for_topic(TopicId::new("bib"));
        let plan =
            SessionBuilder::new(&settings).build(&catalog, &HashMap::new(), &filter, &mut rng());

        assert_eq!(plan.total(), 2);
        assert!(plan.cards.iter().all(|c| c.topic_id() == &TopicId::new("bib")));
    }

    #[test]
    fn level_filter_combines_with_topic_filter() {
        let catalog = catalog();
        let settings = settings(10);
        let filter = SessionFilter::for_topic(TopicId::new("bib")).with_level(3);
        let plan =
            SessionBuilder::new(&settings).build(&catalog, &HashMap::new(), &filter, &mut rng());

        assert_eq!(plan.total(), 1);
        assert_eq!(plan.cards[0].question(), "Q3");
    }

    #[test]
    fn empty_candidate_set_yields_an_empty_plan() {
        let catalog = catalog();
        let settings = settings(10);
        let filter = SessionFilter::for_level(9);
        let plan =
            SessionBuilder::new(&settings).build(&catalog, &HashMap::new(), &filter, &mut rng());

        assert!(plan.is_empty());
        assert_eq!(plan.total(), 0);
    }

    #[test]
    fn never_seen_cards_win_over_scheduled_ones() {
        let catalog = catalog();
        let settings = settings(3);
        let today = fixed_today();

        // Q0 and Q2 have been answered and sit in the future; the rest are unseen.
        let mut states = HashMap::new();
        let reviewed = advance(None, Outcome::Correct, today);
        states.insert(CardId::new("card-0"), reviewed.clone());
        states.insert(CardId::new("card-2"), reviewed);

        let plan = SessionBuilder::new(&settings).build(
            &catalog,
            &states,
            &SessionFilter::all(),
            &mut rng(),
        );

        assert_eq!(plan.unseen_selected, 3);
        assert_eq!(plan.scheduled_selected, 0);
        let questions: HashSet<_> = plan.cards.iter().map(|c| c.question()).collect();
        assert_eq!(questions, HashSet::from(["Q1", "Q3", "Q4"]));
    }

    #[test]
    fn scheduled_cards_are_taken_in_due_order() {
        let catalog = catalog();
        let settings = settings(2);
        let today = fixed_today();

        // Every card reviewed; card-3 overdue, card-1 due today, others later.
        let mut states = HashMap::new();
        for (id, days_out) in [("card-0", 4), ("card-2", 2), ("card-4", 9)] {
            let mut state = advance(None, Outcome::Correct, today);
            state.due_on = today + chrono::Duration::days(days_out);
            states.insert(CardId::new(id), state);
        }
        let mut overdue = advance(None, Outcome::Wrong, today);
        overdue.due_on = today - chrono::Duration::days(3);
        states.insert(CardId::new("card-3"), overdue);
        let mut due_today = advance(None, Outcome::Correct, today);
        due_today.due_on = today;
        states.insert(CardId::new("card-1"), due_today);

        let plan = SessionBuilder::new(&settings).build(
            &catalog,
            &states,
            &SessionFilter::all(),
            &mut rng(),
        );

        let questions: HashSet<_> = plan.cards.iter().map(|c| c.question()).collect();
        assert_eq!(questions, HashSet::from(["Q3", "Q1"]));
        assert_eq!(plan.scheduled_selected, 2);
    }

    #[test]
    fn ties_fall_back_to_catalog_order() {
        let catalog = catalog();
        let settings = settings(2);

        // All unseen: all tied at the epoch, so selection is the first two rows.
        let plan = SessionBuilder::new(&settings).build(
            &catalog,
            &HashMap::new(),
            &SessionFilter::all(),
            &mut rng(),
        );

        let questions: HashSet<_> = plan.cards.iter().map(|c| c.question()).collect();
        assert_eq!(questions, HashSet::from(["Q0", "Q1"]));
    }

    #[test]
    fn seeded_rng_makes_the_permutation_reproducible() {
        let catalog = catalog();
        let settings = settings(5);

        let first = SessionBuilder::new(&settings).build(
            &catalog,
            &HashMap::new(),
            &SessionFilter::all(),
            &mut StdRng::seed_from_u64(99),
        );
        let second = SessionBuilder::new(&settings).build(
            &catalog,
            &HashMap::new(),
            &SessionFilter::all(),
            &mut StdRng::seed_from_u64(99),
        );

        assert_eq!(first, second);
    }
}
