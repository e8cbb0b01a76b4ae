use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::{
    chat::ports::CompletionProvider,
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    menu::{
        entities::{MenuMediaType, UploadedMenuRecord},
        ports::{MenuService, MenuStore},
        value_objects::UploadMenuInput,
    },
    menu_analysis::ports::{TextExtractor, VisionClient},
};

impl<MS, TE, VC, CP> MenuService for Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    #[instrument(skip(self, input), fields(original_name = %input.original_name))]
    async fn upload_menu(&self, input: UploadMenuInput) -> Result<UploadedMenuRecord, CoreError> {
        let media_type = input
            .mime_type
            .as_deref()
            .and_then(MenuMediaType::from_mime)
            .ok_or_else(|| {
                tracing::warn!(mime_type = ?input.mime_type, "Rejected menu upload with disallowed type");
                CoreError::InvalidMediaType
            })?;

        if input.file_data.is_empty() {
            return Err(CoreError::EmptyFile);
        }

        if input.file_data.len() > self.max_upload_bytes {
            return Err(CoreError::FileTooLarge {
                max_bytes: self.max_upload_bytes,
            });
        }

        let mut hasher = Sha256::new();
        hasher.update(&input.file_data);
        let checksum_sha256 = format!("{:x}", hasher.finalize());

        let menu_id = generate_uuid_v7();
        let file_name = format!(
            "{}.{}",
            menu_id,
            media_type.stored_extension(&input.original_name)
        );

        let record = UploadedMenuRecord {
            menu_id,
            file_path: self.menu_store.public_path(&file_name),
            mime_type: media_type.mime_type().to_string(),
            original_name: input.original_name,
            uploaded_at: Utc::now(),
            size_bytes: input.file_data.len() as u64,
            checksum_sha256,
        };

        self.menu_store.ensure_ready().await?;
        self.menu_store
            .save_upload(record.clone(), input.file_data)
            .await?;

        tracing::info!(
            menu_id = %record.menu_id,
            file_path = %record.file_path,
            size = record.size_bytes,
            "Menu uploaded"
        );

        Ok(record)
    }
}
