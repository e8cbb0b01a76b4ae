#[derive(Debug, Clone, Default)]
pub struct AnalyzeMenuInput {
    /// Explicit menu to analyze; the latest upload is used when absent.
    pub menu_id: Option<String>,
}
