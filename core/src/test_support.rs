use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures::{StreamExt, stream};
use tempfile::TempDir;

use crate::{
    domain::{
        chat::{
            entities::{CompletionRequest, SamplingOptions},
            ports::{CompletionProvider, CompletionStream},
        },
        common::{entities::app_errors::CoreError, services::Service},
        menu::entities::MenuMediaType,
        menu_analysis::ports::{TextExtractor, VisionClient},
    },
    infrastructure::menu_store::FsMenuStore,
};

pub(crate) const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// PDF extractor returning a canned answer.
#[derive(Clone, Default)]
pub(crate) struct StubTextExtractor {
    response: Arc<Mutex<Option<String>>>,
    calls: Arc<Mutex<usize>>,
}

impl StubTextExtractor {
    pub(crate) fn respond_with(&self, text: Option<String>) {
        *self.response.lock().unwrap() = text;
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl TextExtractor for StubTextExtractor {
    async fn extract_text(&self, _payload: Bytes) -> Result<Option<String>, CoreError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.response.lock().unwrap().clone())
    }
}

/// Vision client recording every call.
#[derive(Clone)]
pub(crate) struct StubVisionClient {
    response: Arc<Mutex<Result<Option<String>, CoreError>>>,
    calls: Arc<Mutex<Vec<(String, MenuMediaType, Bytes)>>>,
}

impl Default for StubVisionClient {
    fn default() -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(None))),
            calls: Arc::default(),
        }
    }
}

impl StubVisionClient {
    pub(crate) fn respond_with(&self, text: Option<String>) {
        *self.response.lock().unwrap() = Ok(text);
    }

    pub(crate) fn fail_with(&self, error: CoreError) {
        *self.response.lock().unwrap() = Err(error);
    }

    pub(crate) fn calls(&self) -> Vec<(String, MenuMediaType, Bytes)> {
        self.calls.lock().unwrap().clone()
    }
}

impl VisionClient for StubVisionClient {
    async fn transcribe_image(
        &self,
        instruction: String,
        media_type: MenuMediaType,
        image_data: Bytes,
    ) -> Result<Option<String>, CoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((instruction, media_type, image_data));
        self.response.lock().unwrap().clone()
    }
}

/// Completion provider that replays fixed chunks and keeps the requests it saw.
#[derive(Clone)]
pub(crate) struct RecordingCompletionProvider {
    response: Arc<Mutex<Result<Vec<String>, CoreError>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl Default for RecordingCompletionProvider {
    fn default() -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(Vec::new()))),
            requests: Arc::default(),
        }
    }
}

impl RecordingCompletionProvider {
    pub(crate) fn respond_with(&self, chunks: Vec<&str>) {
        *self.response.lock().unwrap() = Ok(chunks.into_iter().map(str::to_string).collect());
    }

    pub(crate) fn fail_with(&self, error: CoreError) {
        *self.response.lock().unwrap() = Err(error);
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CompletionProvider for RecordingCompletionProvider {
    async fn stream_chat(&self, request: CompletionRequest) -> Result<CompletionStream, CoreError> {
        self.requests.lock().unwrap().push(request);
        let chunks = self.response.lock().unwrap().clone()?;

        Ok(stream::iter(chunks.into_iter().map(Ok)).boxed())
    }
}

pub(crate) type TestService =
    Service<FsMenuStore, StubTextExtractor, StubVisionClient, RecordingCompletionProvider>;

/// Service over a temporary directory with stubbed model providers.
pub(crate) struct TestContext {
    pub(crate) service: TestService,
    pub(crate) store: FsMenuStore,
    pub(crate) extractor: StubTextExtractor,
    pub(crate) vision: StubVisionClient,
    pub(crate) provider: RecordingCompletionProvider,
    pub(crate) dir: TempDir,
}

impl TestContext {
    pub(crate) fn new() -> Self {
        Self::with_max_upload_bytes(DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub(crate) fn with_max_upload_bytes(max_upload_bytes: usize) -> Self {
        let dir = TempDir::new().unwrap();
        let store = FsMenuStore::new(dir.path(), "/uploads");
        let extractor = StubTextExtractor::default();
        let vision = StubVisionClient::default();
        let provider = RecordingCompletionProvider::default();

        let service = Service::new(
            store.clone(),
            extractor.clone(),
            vision.clone(),
            provider.clone(),
            SamplingOptions::default(),
            max_upload_bytes,
        );

        Self {
            service,
            store,
            extractor,
            vision,
            provider,
            dir,
        }
    }

    /// Names of the files currently in the store directory.
    pub(crate) fn stored_files(&self) -> Vec<String> {
        std::fs::read_dir(self.dir.path())
            .map(|entries| {
                entries
                    .filter_map(Result::ok)
                    .map(|entry| entry.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
