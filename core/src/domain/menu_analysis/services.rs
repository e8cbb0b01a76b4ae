use tracing::instrument;
use uuid::Uuid;

use crate::domain::{
    chat::ports::CompletionProvider,
    common::{entities::app_errors::CoreError, services::Service},
    menu::{
        entities::{MenuMediaType, UploadedMenuRecord},
        ports::MenuStore,
    },
    menu_analysis::{
        entities::{
            AnalysisRecord, IMAGE_TEXT_PLACEHOLDER, MENU_EXTRACTION_INSTRUCTION, MenuStatus,
            MenuText, PDF_TEXT_PLACEHOLDER,
        },
        ports::{MenuAnalysisService, TextExtractor, VisionClient},
        value_objects::AnalyzeMenuInput,
    },
};

const MENU_ID_NOT_FOUND: &str = "Menu not found with provided ID!";
const NO_RECENT_MENU: &str = "No recently uploaded menu found!";
const MENU_FILE_NOT_FOUND: &str = "Menu file not found!";
const ANALYSIS_NOT_FOUND: &str = "No analysis found for this menu!";

fn parse_menu_id(raw: &str, message: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CoreError::NotFound(message.to_string()))
}

impl<MS, TE, VC, CP> Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    /// Resolves the menu to analyze. An unreadable record counts as "nothing
    /// uploaded" rather than a fault.
    async fn resolve_menu(&self, menu_id: Option<&str>) -> Result<UploadedMenuRecord, CoreError> {
        match menu_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(raw) => {
                let menu_id = parse_menu_id(raw, MENU_ID_NOT_FOUND)?;
                self.menu_store
                    .get_upload(menu_id)
                    .await
                    .unwrap_or_else(|e| {
                        tracing::warn!(error = %e, %menu_id, "Unreadable menu record");
                        None
                    })
                    .ok_or_else(|| CoreError::NotFound(MENU_ID_NOT_FOUND.to_string()))
            }
            None => self
                .menu_store
                .latest_upload()
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Unreadable latest upload pointer");
                    None
                })
                .ok_or_else(|| CoreError::NotFound(NO_RECENT_MENU.to_string())),
        }
    }
}

impl<MS, TE, VC, CP> MenuAnalysisService for Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    #[instrument(skip(self), fields(menu_id = ?input.menu_id))]
    async fn analyze_menu(&self, input: AnalyzeMenuInput) -> Result<AnalysisRecord, CoreError> {
        // 1. Resolve the menu record
        let menu = self.resolve_menu(input.menu_id.as_deref()).await?;

        let media_type = menu.media_type().ok_or(CoreError::InvalidMediaType)?;

        // 2. Load the stored file
        let payload = self
            .menu_store
            .read_menu_file(menu.clone())
            .await?
            .ok_or_else(|| {
                tracing::error!(file_path = %menu.file_path, "Menu file missing from store");
                CoreError::NotFound(MENU_FILE_NOT_FOUND.to_string())
            })?;

        tracing::info!(
            menu_id = %menu.menu_id,
            media_type = media_type.mime_type(),
            size = payload.len(),
            "Extracting menu text"
        );

        // 3. Extract text
        let menu_content = match media_type {
            MenuMediaType::Pdf => MenuText::from(self.text_extractor.extract_text(payload).await?)
                .into_content(PDF_TEXT_PLACEHOLDER),
            MenuMediaType::Png | MenuMediaType::Jpeg | MenuMediaType::Webp => MenuText::from(
                self.vision_client
                    .transcribe_image(MENU_EXTRACTION_INSTRUCTION.to_string(), media_type, payload)
                    .await?,
            )
            .into_content(IMAGE_TEXT_PLACEHOLDER),
        };

        // 4. Persist
        let record = AnalysisRecord::new(&menu, menu_content);
        self.menu_store.save_analysis(record.clone()).await?;

        tracing::info!(
            menu_id = %record.menu_id,
            chars = record.menu_content.chars().count(),
            "Menu analyzed"
        );

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn get_menu_status(&self) -> Result<MenuStatus, CoreError> {
        let status = match self.menu_store.latest_analysis().await? {
            Some(record) if record.has_content() => MenuStatus::Found(record),
            _ => MenuStatus::NotFound,
        };

        Ok(status)
    }

    #[instrument(skip(self))]
    async fn get_menu_analysis(&self, menu_id: String) -> Result<AnalysisRecord, CoreError> {
        let menu_id = parse_menu_id(&menu_id, ANALYSIS_NOT_FOUND)?;

        self.menu_store
            .get_analysis(menu_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(ANALYSIS_NOT_FOUND.to_string()))
    }
}
