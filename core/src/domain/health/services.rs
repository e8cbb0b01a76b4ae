use crate::domain::{
    chat::ports::CompletionProvider,
    common::{entities::app_errors::CoreError, services::Service},
    health::{entities::StoreHealthStatus, ports::HealthCheckService},
    menu::ports::MenuStore,
    menu_analysis::ports::{TextExtractor, VisionClient},
};

impl<MS, TE, VC, CP> HealthCheckService for Service<MS, TE, VC, CP>
where
    MS: MenuStore,
    TE: TextExtractor,
    VC: VisionClient,
    CP: CompletionProvider,
{
    async fn readness(&self) -> Result<StoreHealthStatus, CoreError> {
        self.menu_store.ensure_ready().await?;

        let menu_loaded = self
            .menu_store
            .latest_analysis()
            .await
            .map(|record| record.is_some_and(|r| r.has_content()))
            .unwrap_or(false);

        Ok(StoreHealthStatus {
            status: "UP".to_string(),
            menu_loaded,
        })
    }
}
