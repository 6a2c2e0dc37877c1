use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, value_objects::UserId},
    food_analysis::{entities::AnalysisRecord, ports::AnalysisHistoryRepository},
};

/// History log stored as one pretty-printed JSON array per user.
///
/// Appends rewrite the whole file through a temporary sibling and a rename, so
/// readers never see a half-written log. Appends are serialised within the
/// process; nothing guards against a second process writing the same file.
#[derive(Debug, Clone)]
pub struct JsonFileHistoryRepository {
    root: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileHistoryRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    fn file_path(&self, user_id: &UserId) -> PathBuf {
        self.root.join(format!("{}.json", user_id.as_str()))
    }

    async fn read_log(path: &Path) -> Result<Vec<AnalysisRecord>, CoreError> {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                error!("Failed to read history file {}: {}", path.display(), e);
                return Err(CoreError::StorageError(format!(
                    "Failed to read history: {}",
                    e
                )));
            }
        };

        if content.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&content).map_err(|e| {
            error!("Corrupt history file {}: {}", path.display(), e);
            CoreError::StorageError(format!("Failed to parse history: {}", e))
        })
    }

    async fn write_log(path: &Path, records: &[AnalysisRecord]) -> Result<(), CoreError> {
        let storage_error = |e: std::io::Error| {
            error!("Failed to write history file {}: {}", path.display(), e);
            CoreError::StorageError(format!("Failed to write history: {}", e))
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(storage_error)?;
        }

        let json = serde_json::to_vec_pretty(records).map_err(|e| {
            error!("Failed to serialise history: {}", e);
            CoreError::StorageError(format!("Failed to serialise history: {}", e))
        })?;

        let tmp_path = path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(storage_error)?;
        tokio::fs::rename(&tmp_path, path)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}

impl AnalysisHistoryRepository for JsonFileHistoryRepository {
    #[instrument(skip(self, record), fields(user_id = %record.user_id, analysis_id = %record.id))]
    async fn append(&self, record: AnalysisRecord) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;

        let path = self.file_path(&record.user_id);
        let mut records = Self::read_log(&path).await?;
        records.push(record);
        Self::write_log(&path, &records).await
    }

    async fn list(&self, user_id: &UserId) -> Result<Vec<AnalysisRecord>, CoreError> {
        Self::read_log(&self.file_path(user_id)).await
    }

    async fn get_by_id(
        &self,
        user_id: &UserId,
        analysis_id: Uuid,
    ) -> Result<Option<AnalysisRecord>, CoreError> {
        let records = Self::read_log(&self.file_path(user_id)).await?;
        Ok(records.into_iter().find(|r| r.id == analysis_id))
    }
}
