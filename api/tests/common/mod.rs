#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use axum_test::{
    TestResponse, TestServer,
    multipart::{MultipartForm, Part},
};
use menuchat_api::{
    application::http::server::http_server::{router, state},
    args::{Args, ChatProviderArg, LlmArgs, LogArgs, ServerArgs, StorageArgs},
};
use serde_json::{Value, json};
use tempfile::TempDir;
use test_context::AsyncTestContext;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path_regex, query_param},
};

pub const MAX_UPLOAD_BYTES: usize = 1024;
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-menu-image";

const VISION_PATH: &str = r"^/v1beta/models/gemini-vision:generateContent$";
const CHAT_PATH: &str = r"^/v1beta/models/gemini-chat:streamGenerateContent$";

pub fn test_args(uploads_dir: &Path, gemini_base_url: String) -> Args {
    Args {
        server: ServerArgs {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            host: "127.0.0.1".to_string(),
            port: 0,
            root_path: String::new(),
            metrics: false,
        },
        log: LogArgs {
            filter: "info".to_string(),
            json: false,
        },
        storage: StorageArgs {
            uploads_dir: uploads_dir.to_path_buf(),
            public_path: "/uploads".to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
        },
        llm: LlmArgs {
            gemini_api_key: Some("test-key".to_string()),
            gemini_base_url,
            gemini_vision_model: "gemini-vision".to_string(),
            gemini_chat_model: "gemini-chat".to_string(),
            openai_api_key: None,
            openai_base_url: "http://127.0.0.1:9".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            chat_provider: ChatProviderArg::Gemini,
            temperature: 0.7,
            max_output_tokens: 2048,
        },
    }
}

/// Server wired to a temporary upload directory and a fake Gemini API.
pub struct MenuChatContext {
    pub server: TestServer,
    pub gemini: MockServer,
    pub uploads: TempDir,
}

impl AsyncTestContext for MenuChatContext {
    async fn setup() -> Self {
        let uploads = TempDir::new().unwrap();
        let gemini = MockServer::start().await;
        let args = test_args(uploads.path(), format!("{}/v1beta", gemini.uri()));

        let app_state = state(Arc::new(args)).await.unwrap();
        let server = TestServer::new(router(app_state).unwrap()).unwrap();

        Self {
            server,
            gemini,
            uploads,
        }
    }
}

/// Single-page PDF drawing `text` in Helvetica, with a correct xref table.
pub fn one_line_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 24 Tf 72 700 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
         /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{object}\nendobj\n", index + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

pub fn candidate(text: &str) -> Value {
    json!({
        "candidates": [
            { "content": { "role": "model", "parts": [{ "text": text }] } }
        ]
    })
}

impl MenuChatContext {
    pub async fn upload(&self, file_name: &str, mime_type: &str, bytes: &[u8]) -> TestResponse {
        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name)
            .mime_type(mime_type);

        self.server
            .post("/api/upload-menu")
            .multipart(MultipartForm::new().add_part("menuFile", part))
            .await
    }

    pub async fn upload_png(&self, file_name: &str) -> Value {
        let response = self.upload(file_name, "image/png", PNG_BYTES).await;
        response.assert_status_ok();
        response.json::<Value>()
    }

    pub async fn mock_vision_response(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path_regex(VISION_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.gemini)
            .await;
    }

    pub async fn mock_vision_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path_regex(VISION_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream exploded"))
            .mount(&self.gemini)
            .await;
    }

    /// Streams each payload as one server-sent event.
    pub async fn mock_chat_events(&self, payloads: Vec<Value>) {
        let body: String = payloads
            .iter()
            .map(|payload| format!("data: {}\r\n\r\n", payload))
            .collect();

        Mock::given(method("POST"))
            .and(path_regex(CHAT_PATH))
            .and(query_param("alt", "sse"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
            .mount(&self.gemini)
            .await;
    }

    pub async fn mock_chat_chunks(&self, chunks: &[&str]) {
        self.mock_chat_events(chunks.iter().map(|chunk| candidate(chunk)).collect())
            .await;
    }

    pub async fn mock_chat_failure(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path_regex(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("model overloaded"))
            .mount(&self.gemini)
            .await;
    }

    /// JSON bodies sent to the fake Gemini API whose path ends with `suffix`.
    pub async fn gemini_requests(&self, suffix: &str) -> Vec<Value> {
        self.gemini
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path().ends_with(suffix))
            .map(|request| request.body_json::<Value>().unwrap())
            .collect()
    }

    pub async fn analyze_latest(&self) -> TestResponse {
        self.server.post("/api/analyze-menu").json(&json!({})).await
    }
}
