use std::future::Future;

use bytes::Bytes;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    menu::{entities::UploadedMenuRecord, value_objects::UploadMenuInput},
    menu_analysis::entities::AnalysisRecord,
};

/// Port for the menu file store.
///
/// Every upload and analysis is kept per menu id, and the most recent of each
/// is also mirrored into a "latest" slot that the status and chat paths read.
#[cfg_attr(test, mockall::automock)]
pub trait MenuStore: Send + Sync {
    /// Public URL path for a stored file name
    fn public_path(&self, file_name: &str) -> String;

    /// Create the store directory if it does not exist yet
    fn ensure_ready(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Persist the raw file, its record and the latest-upload pointer
    fn save_upload(
        &self,
        record: UploadedMenuRecord,
        payload: Bytes,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_upload(
        &self,
        menu_id: Uuid,
    ) -> impl Future<Output = Result<Option<UploadedMenuRecord>, CoreError>> + Send;

    fn latest_upload(
        &self,
    ) -> impl Future<Output = Result<Option<UploadedMenuRecord>, CoreError>> + Send;

    /// Raw bytes of the uploaded file, `None` when it is gone from disk
    fn read_menu_file(
        &self,
        record: UploadedMenuRecord,
    ) -> impl Future<Output = Result<Option<Bytes>, CoreError>> + Send;

    /// Persist an analysis under its menu id and as the latest analysis
    fn save_analysis(
        &self,
        record: AnalysisRecord,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn get_analysis(
        &self,
        menu_id: Uuid,
    ) -> impl Future<Output = Result<Option<AnalysisRecord>, CoreError>> + Send;

    fn latest_analysis(
        &self,
    ) -> impl Future<Output = Result<Option<AnalysisRecord>, CoreError>> + Send;
}

/// Service trait for menu uploads
#[cfg_attr(test, mockall::automock)]
pub trait MenuService: Send + Sync {
    fn upload_menu(
        &self,
        input: UploadMenuInput,
    ) -> impl Future<Output = Result<UploadedMenuRecord, CoreError>> + Send;
}
