use bytes::Bytes;

#[derive(Debug, Clone)]
pub struct UploadMenuInput {
    pub original_name: String,
    pub mime_type: Option<String>,
    pub file_data: Bytes,
}
