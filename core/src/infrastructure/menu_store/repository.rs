use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use bytes::Bytes;
use serde::{Serialize, de::DeserializeOwned};
use tokio::fs;
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_random_string},
    menu::{entities::UploadedMenuRecord, ports::MenuStore},
    menu_analysis::entities::AnalysisRecord,
};

pub const LATEST_UPLOAD_FILE: &str = "lastUploadedMenu.json";
pub const LATEST_ANALYSIS_FILE: &str = "menuAnalysis.json";

/// Menu store backed by a single directory.
///
/// Layout: `<id>.<ext>` raw file, `<id>.menu.json` upload record,
/// `<id>.analysis.json` analysis record, plus the two "latest" documents.
/// JSON documents are written to a temporary file and renamed into place.
#[derive(Debug, Clone)]
pub struct FsMenuStore {
    root: PathBuf,
    public_path: String,
}

impl FsMenuStore {
    pub fn new(root: impl Into<PathBuf>, public_path: impl Into<String>) -> Self {
        let public_path = public_path.into();
        Self {
            root: root.into(),
            public_path: public_path.trim_end_matches('/').to_string(),
        }
    }

    fn upload_record_path(&self, menu_id: Uuid) -> PathBuf {
        self.root.join(format!("{menu_id}.menu.json"))
    }

    fn analysis_record_path(&self, menu_id: Uuid) -> PathBuf {
        self.root.join(format!("{menu_id}.analysis.json"))
    }

    /// Local path of an uploaded file. Only bare file names are accepted.
    fn menu_file_path(&self, record: &UploadedMenuRecord) -> Result<PathBuf, CoreError> {
        let file_name = record.file_name();
        let is_bare_name = !file_name.is_empty()
            && !file_name.starts_with('.')
            && !file_name.contains(['/', '\\']);

        if !is_bare_name {
            error!(file_path = %record.file_path, "Refusing stored file path");
            return Err(CoreError::Storage(format!(
                "invalid stored file path: {}",
                record.file_path
            )));
        }

        Ok(self.root.join(file_name))
    }

    async fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), CoreError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document");
        let temp_path = self
            .root
            .join(format!(".{}.{}.tmp", file_name, generate_random_string(8)));

        fs::write(&temp_path, contents).await.map_err(|e| {
            error!("Failed to write {}: {}", temp_path.display(), e);
            CoreError::Storage(format!("failed to write {}: {}", file_name, e))
        })?;

        fs::rename(&temp_path, path).await.map_err(|e| {
            error!("Failed to move {} into place: {}", file_name, e);
            CoreError::Storage(format!("failed to write {}: {}", file_name, e))
        })
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), CoreError> {
        let contents = serde_json::to_vec(value)
            .map_err(|e| CoreError::Storage(format!("failed to encode record: {}", e)))?;

        self.write_atomic(path, &contents).await
    }

    async fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, CoreError> {
        let contents = match fs::read(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                return Err(CoreError::Storage(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        serde_json::from_slice(&contents).map(Some).map_err(|e| {
            error!("Failed to parse {}: {}", path.display(), e);
            CoreError::Storage(format!("failed to parse {}: {}", path.display(), e))
        })
    }
}

impl MenuStore for FsMenuStore {
    fn public_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_path, file_name)
    }

    async fn ensure_ready(&self) -> Result<(), CoreError> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            error!("Failed to create store directory {}: {}", self.root.display(), e);
            CoreError::Storage(format!("failed to create store directory: {}", e))
        })
    }

    async fn save_upload(&self, record: UploadedMenuRecord, payload: Bytes) -> Result<(), CoreError> {
        let file_path = self.menu_file_path(&record)?;

        fs::write(&file_path, &payload).await.map_err(|e| {
            error!("Failed to write menu file {}: {}", file_path.display(), e);
            CoreError::Storage(format!("failed to write menu file: {}", e))
        })?;

        self.write_json(&self.upload_record_path(record.menu_id), &record)
            .await?;
        self.write_json(&self.root.join(LATEST_UPLOAD_FILE), &record)
            .await
    }

    async fn get_upload(&self, menu_id: Uuid) -> Result<Option<UploadedMenuRecord>, CoreError> {
        self.read_json(&self.upload_record_path(menu_id)).await
    }

    async fn latest_upload(&self) -> Result<Option<UploadedMenuRecord>, CoreError> {
        self.read_json(&self.root.join(LATEST_UPLOAD_FILE)).await
    }

    async fn read_menu_file(&self, record: UploadedMenuRecord) -> Result<Option<Bytes>, CoreError> {
        let file_path = self.menu_file_path(&record)?;

        match fs::read(&file_path).await {
            Ok(contents) => Ok(Some(Bytes::from(contents))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read menu file {}: {}", file_path.display(), e);
                Err(CoreError::Storage(format!("failed to read menu file: {}", e)))
            }
        }
    }

    async fn save_analysis(&self, record: AnalysisRecord) -> Result<(), CoreError> {
        self.write_json(&self.analysis_record_path(record.menu_id), &record)
            .await?;
        self.write_json(&self.root.join(LATEST_ANALYSIS_FILE), &record)
            .await
    }

    async fn get_analysis(&self, menu_id: Uuid) -> Result<Option<AnalysisRecord>, CoreError> {
        self.read_json(&self.analysis_record_path(menu_id)).await
    }

    async fn latest_analysis(&self) -> Result<Option<AnalysisRecord>, CoreError> {
        self.read_json(&self.root.join(LATEST_ANALYSIS_FILE)).await
    }
}
