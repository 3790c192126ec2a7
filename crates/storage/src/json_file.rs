use async_trait::async_trait;
use std::fs::{File, OpenOptions, create_dir_all};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};

use estude_core::model::UserId;

use crate::document::ProgressDocument;
use crate::repository::{ProgressRepository, StorageError};

/// Progress store backed by one pretty-printed JSON file per user.
///
/// This is the opportunistic local adapter: it mirrors the shape the cloud
/// store holds so a record written here can be merged upstream unchanged.
pub struct JsonFileRepository {
    data_dir: PathBuf,
}

impl JsonFileRepository {
    /// Opens (and creates if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        create_dir_all(&data_dir).map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(Self { data_dir })
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, user: &UserId) -> PathBuf {
        self.data_dir.join(format!("{user}.json"))
    }
}

#[async_trait]
impl ProgressRepository for JsonFileRepository {
    async fn load(&self, user: &UserId) -> Result<Option<ProgressDocument>, StorageError> {
        let path = self.document_path(user);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(document) => Ok(Some(document)),
            Err(err) => {
                // A mangled file counts as a first load; the next save rewrites it.
                log::warn!("discarding unreadable progress document {}: {err}", path.display());
                Ok(None)
            }
        }
    }

    async fn save(&self, user: &UserId, document: &ProgressDocument) -> Result<(), StorageError> {
        let path = self.document_path(user);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| StorageError::Io(e.to_string()))?;

        serde_json::to_writer_pretty(BufWriter::new(file), document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        log::debug!("saved progress document {}", path.display());
        Ok(())
    }
}
