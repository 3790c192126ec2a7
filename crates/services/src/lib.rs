#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod error;
pub mod progress;
pub mod sessions;

pub use estude_core::Clock;

pub use catalog_service::ingest_catalog;
pub use error::SessionError;
pub use progress::StreakChange;
pub use sessions::{
    CouncilPacer, CouncilTick, SessionBuilder, SessionFilter, SessionPlan, SessionProgress,
    StudyLoopService, StudySession,
};
