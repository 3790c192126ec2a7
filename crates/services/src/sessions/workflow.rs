use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;

use estude_core::Clock;
use estude_core::model::{Catalog, Outcome, Profile, ProgressRecord, ReviewLog, StudySettings};
use storage::{ProgressDocument, ProgressRepository};

use super::plan::{SessionBuilder, SessionFilter};
use super::service::StudySession;
use crate::error::SessionError;
use crate::progress::{self, StreakChange};

/// Orchestrates sign-in, session assembly, and explicit persistence.
///
/// The service itself holds no progress state: the record is an explicit
/// value handed back to the caller, mutated only through session answers, and
/// written back when the caller decides (typically once per finished batch).
#[derive(Clone)]
pub struct StudyLoopService {
    clock: Clock,
    store: Arc<dyn ProgressRepository>,
    settings: StudySettings,
    shuffle_seed: Option<u64>,
}

impl StudyLoopService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn ProgressRepository>) -> Self {
        Self {
            clock,
            store,
            settings: StudySettings::default(),
            shuffle_seed: None,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: StudySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Fixes the presentation shuffle, making session order reproducible.
    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &StudySettings {
        &self.settings
    }

    /// Current time according to the service clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Loads (or creates) the user's progress record and applies the
    /// once-per-session day rollover, persisting the rolled-over record.
    ///
    /// `profile` carries the identity-provider fields; stored profile data
    /// wins where present.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the store cannot be reached.
    pub async fn sign_in(
        &self,
        profile: Profile,
    ) -> Result<(ProgressRecord, StreakChange), SessionError> {
        let stored = self.store.load(&profile.id).await?;
        let mut record = match stored {
            Some(document) => document.into_record(profile),
            None => ProgressRecord::new(profile),
        };

        let change = progress::on_session_start(&mut record, self.clock.today(), self.clock.now());
        self.save(&record).await?;

        log::debug!(
            "signed in {} (streak {}, lifetime {})",
            record.profile.id,
            record.stats.streak,
            record.stats.cards_lifetime
        );
        Ok((record, change))
    }

    /// Assembles a study session from the catalog and the user's SRS state.
    ///
    /// An empty result is a complete session the caller renders as "nothing
    /// to review".
    #[must_use]
    pub fn start_session(
        &self,
        catalog: &Catalog,
        record: &ProgressRecord,
        filter: &SessionFilter,
    ) -> StudySession {
        let builder = SessionBuilder::new(&self.settings);
        let plan = match self.shuffle_seed {
            Some(seed) => builder.build(
                catalog,
                &record.stats.card_states,
                filter,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => builder.build(catalog, &record.stats.card_states, filter, &mut rand::rng()),
        };

        StudySession::new(plan, self.clock.now())
    }

    /// Applies an outcome to the session's current card.
    ///
    /// Mutates only the in-memory record; call [`save`](Self::save) when the
    /// batch settles.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` if the session is finished.
    pub fn answer_current(
        &self,
        session: &mut StudySession,
        record: &mut ProgressRecord,
        outcome: Outcome,
    ) -> Result<ReviewLog, SessionError> {
        session
            .answer_current(record, outcome, self.clock.today(), self.clock.now())
            .cloned()
    }

    /// Writes the record back to the store in its value-normalized wire form.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the write fails.
    pub async fn save(&self, record: &ProgressRecord) -> Result<(), SessionError> {
        let document = ProgressDocument::from_record(record, self.clock.now());
        self.store.save(&record.profile.id, &document).await?;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
