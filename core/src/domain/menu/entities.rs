use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Media types accepted for menu uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuMediaType {
    Png,
    Jpeg,
    Webp,
    Pdf,
}

impl MenuMediaType {
    /// Parses a declared MIME type against the upload allow-list.
    /// Parameters such as `; charset=binary` are ignored.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" | "jpe" => Some(Self::Jpeg),
            "webp" => Some(Self::Webp),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn canonical_extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Webp => "webp",
            Self::Pdf => "pdf",
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, Self::Pdf)
    }

    /// Extension used for the stored copy: the original one when it agrees
    /// with the declared type, the canonical one otherwise.
    pub fn stored_extension(&self, original_name: &str) -> String {
        original_name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .filter(|extension| Self::from_extension(extension) == Some(*self))
            .unwrap_or_else(|| self.canonical_extension().to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMenuRecord {
    pub menu_id: Uuid,
    /// Public path of the stored file, e.g. `/uploads/<menu_id>.pdf`.
    pub file_path: String,
    pub mime_type: String,
    pub original_name: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub checksum_sha256: String,
}

impl UploadedMenuRecord {
    pub fn file_name(&self) -> &str {
        self.file_path
            .rsplit('/')
            .next()
            .unwrap_or(self.file_path.as_str())
    }

    /// Media type derived from the stored file's extension.
    pub fn media_type(&self) -> Option<MenuMediaType> {
        self.file_name()
            .rsplit_once('.')
            .and_then(|(_, extension)| MenuMediaType::from_extension(extension))
    }
}
