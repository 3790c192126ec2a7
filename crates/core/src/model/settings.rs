use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Session sizes offered by the intensity picker.
pub const SESSION_SIZE_CHOICES: [u32; 3] = [5, 10, 15];

/// Ticks a council-mode card stays hidden before the answer auto-reveals.
pub const COUNCIL_REVEAL_TICKS: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("session size must be > 0")]
    InvalidSessionSize,

    #[error("council reveal ticks must be > 0")]
    InvalidCouncilTicks,
}

/// Study configuration for session assembly and council-mode pacing.
///
/// Any positive session size is accepted; the UI offers
/// [`SESSION_SIZE_CHOICES`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySettings {
    session_size: u32,
    council_reveal_ticks: u32,
}

impl Default for StudySettings {
    fn default() -> Self {
        Self {
            session_size: 10,
            council_reveal_ticks: COUNCIL_REVEAL_TICKS,
        }
    }
}

impl StudySettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter is zero.
    pub fn new(session_size: u32, council_reveal_ticks: u32) -> Result<Self, SettingsError> {
        if session_size == 0 {
            return Err(SettingsError::InvalidSessionSize);
        }
        if council_reveal_ticks == 0 {
            return Err(SettingsError::InvalidCouncilTicks);
        }
        Ok(Self {
            session_size,
            council_reveal_ticks,
        })
    }

    /// Settings with a different session size.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSessionSize` if the size is zero.
    pub fn with_session_size(mut self, session_size: u32) -> Result<Self, SettingsError> {
        if session_size == 0 {
            return Err(SettingsError::InvalidSessionSize);
        }
        self.session_size = session_size;
        Ok(self)
    }

    #[must_use]
    pub fn session_size(&self) -> u32 {
        self.session_size
    }

    #[must_use]
    pub fn council_reveal_ticks(&self) -> u32 {
        self.council_reveal_ticks
    }
}
