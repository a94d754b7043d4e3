use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use scribe_engine::{
    extract_text, list_stage_files, CompletionModel, CompletionRequest, Engine, EngineError,
    NotificationSink, ResultSet, StageStore, EXTRACTION_ERROR_PREFIX, EXTRACTION_PROMPT,
    NO_TEXT_EXTRACTED,
};

struct FakeStore {
    listing: Result<Vec<String>, EngineError>,
}

#[async_trait::async_trait]
impl StageStore for FakeStore {
    async fn list(&self, _stage_path: &str) -> Result<Vec<String>, EngineError> {
        self.listing.clone()
    }

    async fn read(&self, _stage_path: &str, file_name: &str) -> Result<Vec<u8>, EngineError> {
        Ok(file_name.as_bytes().to_vec())
    }
}

#[derive(Default)]
struct FakeModel {
    answer: Option<Result<ResultSet, EngineError>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

#[async_trait::async_trait]
impl CompletionModel for FakeModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<ResultSet, EngineError> {
        self.requests.lock().unwrap().push(request.clone());
        self.answer.clone().unwrap_or_else(|| Ok(ResultSet::default()))
    }
}

#[derive(Default)]
struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl NotificationSink for CollectingSink {
    fn error(&self, message: String) {
        self.messages.lock().unwrap().push(message);
    }
}

fn keys(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|k| k.to_string()).collect()
}

fn model_answering(answer: Result<ResultSet, EngineError>) -> FakeModel {
    FakeModel {
        answer: Some(answer),
        ..FakeModel::default()
    }
}

#[tokio::test]
async fn listing_strips_key_prefixes() {
    let store = FakeStore {
        listing: Ok(keys(&["a/b/c/scan.png", "image_files/note1.png", "top.txt"])),
    };
    let sink = CollectingSink::default();

    let names = list_stage_files(&store, "stage.folder.files", &sink).await;

    assert_eq!(names, vec!["scan.png", "note1.png", "top.txt"]);
    assert!(sink.messages.lock().unwrap().is_empty());
}

#[tokio::test]
async fn listing_failures_become_one_notification_and_no_files() {
    let failures = [
        EngineError::Network("connection refused".to_string()),
        EngineError::InvalidStagePath("bad path".to_string()),
        EngineError::Statement {
            status: 422,
            code: "002003".to_string(),
            message: "does not exist or not authorized".to_string(),
        },
    ];
    for failure in failures {
        let store = FakeStore {
            listing: Err(failure.clone()),
        };
        let sink = CollectingSink::default();

        let names = list_stage_files(&store, "stage.folder.files", &sink).await;

        assert!(names.is_empty());
        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], format!("Error accessing stage: {failure}"));
    }
}

#[tokio::test]
async fn extraction_sends_fixed_prompt_and_returns_first_cell() {
    let model = model_answering(Ok(ResultSet::new(vec![vec![Some(
        "\\frac{a}{b}".to_string(),
    )]])));

    let text = extract_text(&model, "claude-3-5-sonnet", "stage.folder.files", "note1.png").await;

    assert_eq!(text, "\\frac{a}{b}");
    let requests = model.requests.lock().unwrap();
    assert_eq!(
        requests.as_slice(),
        &[CompletionRequest {
            model: "claude-3-5-sonnet".to_string(),
            prompt: EXTRACTION_PROMPT.to_string(),
            stage_path: "stage.folder.files".to_string(),
            file_name: "note1.png".to_string(),
        }]
    );
}

#[tokio::test]
async fn extraction_failures_are_prefixed_strings() {
    let failures = [
        EngineError::Timeout("operation timed out".to_string()),
        EngineError::StatementPending {
            handle: "01b2".to_string(),
        },
        EngineError::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        },
    ];
    for failure in failures {
        let model = model_answering(Err(failure.clone()));
        let text = extract_text(&model, "m", "s.f.f", "note1.png").await;

        assert!(text.starts_with(EXTRACTION_ERROR_PREFIX), "{text}");
        assert_eq!(text, format!("Error extracting text: {failure}"));
    }
}

#[tokio::test]
async fn empty_or_null_results_mean_no_text() {
    for result in [ResultSet::default(), ResultSet::new(vec![vec![None]])] {
        let model = model_answering(Ok(result));
        let text = extract_text(&model, "m", "s.f.f", "note1.png").await;
        assert_eq!(text, NO_TEXT_EXTRACTED);
    }
}

#[tokio::test]
async fn extra_rows_are_ignored() {
    let model = model_answering(Ok(ResultSet::new(vec![
        vec![Some("first".to_string()), Some("ignored".to_string())],
        vec![Some("second".to_string())],
    ])));
    assert_eq!(extract_text(&model, "m", "s.f.f", "x.png").await, "first");
}

#[tokio::test]
async fn engine_wires_both_collaborators() {
    let store = Arc::new(FakeStore {
        listing: Ok(keys(&["stage/note1.png", "stage/readme.txt"])),
    });
    let model = Arc::new(model_answering(Ok(ResultSet::new(vec![vec![Some(
        "hello".to_string(),
    )]]))));
    let engine = Engine::new(store, model.clone(), "claude-3-5-sonnet");
    let sink = CollectingSink::default();

    assert_eq!(engine.model_name(), "claude-3-5-sonnet");
    assert_eq!(
        engine.list_files("stage.folder.files", &sink).await,
        vec!["note1.png", "readme.txt"]
    );
    assert_eq!(
        engine.read_file("stage.folder.files", "note1.png").await,
        Ok(b"note1.png".to_vec())
    );
    assert_eq!(
        engine.extract_text("stage.folder.files", "note1.png").await,
        "hello"
    );
    assert_eq!(model.requests.lock().unwrap().len(), 1);
}
