#![forbid(unsafe_code)]

pub mod document;
pub mod json_file;
pub mod repository;

pub use document::ProgressDocument;
pub use json_file::JsonFileRepository;
pub use repository::{InMemoryRepository, ProgressRepository, StorageError};
