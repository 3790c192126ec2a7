use thiserror::Error;

use crate::model::{CardError, OutcomeError, SettingsError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error(transparent)]
    Outcome(#[from] OutcomeError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
