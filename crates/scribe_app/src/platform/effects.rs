use std::collections::VecDeque;
use std::sync::Mutex;

use scribe_core::{update, AppState, Effect, Msg, Notification};
use scribe_engine::{Engine, NotificationSink};
use scribe_logging::{scribe_debug, scribe_warn};

/// Performs effects against the engine and drives render passes.
pub struct EffectRunner {
    engine: Engine,
}

impl EffectRunner {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Applies `msgs` in order. The answers to a message's effects are applied before the
    /// next queued message, so a pass reads top to bottom like the page it renders.
    pub async fn run_pass(&self, mut state: AppState, msgs: Vec<Msg>) -> AppState {
        let mut inbox: VecDeque<Msg> = msgs.into();
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;

            let mut answers = Vec::new();
            for effect in effects {
                answers.extend(self.perform(effect).await);
            }
            for answer in answers.into_iter().rev() {
                inbox.push_front(answer);
            }
        }
        state
    }

    async fn perform(&self, effect: Effect) -> Vec<Msg> {
        match effect {
            Effect::ListFiles { stage_path } => {
                let sink = CollectingSink::default();
                let files = self.engine.list_files(&stage_path, &sink).await;
                let mut msgs: Vec<Msg> = sink
                    .take()
                    .into_iter()
                    .map(|message| Msg::Notify(Notification::error(message)))
                    .collect();
                msgs.push(Msg::FilesListed(files));
                msgs
            }
            Effect::LoadPreview { stage_path, file } => {
                match self.engine.read_file(&stage_path, &file).await {
                    Ok(bytes) => {
                        scribe_debug!("Preview of {} is {} bytes", file, bytes.len());
                        vec![Msg::PreviewLoaded { file, bytes }]
                    }
                    Err(err) => {
                        scribe_warn!("Preview of {} failed: {}", file, err);
                        vec![Msg::PreviewFailed {
                            file,
                            message: err.to_string(),
                        }]
                    }
                }
            }
            Effect::ExtractText { stage_path, file } => {
                let text = self.engine.extract_text(&stage_path, &file).await;
                vec![Msg::TextExtracted { file, text }]
            }
        }
    }
}

#[derive(Default)]
struct CollectingSink {
    messages: Mutex<Vec<String>>,
}

impl CollectingSink {
    fn take(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut messages) => messages.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }
}

impl NotificationSink for CollectingSink {
    fn error(&self, message: String) {
        match self.messages.lock() {
            Ok(mut messages) => messages.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;
    use scribe_core::{AppState, Msg, PreviewView, Severity, NO_FILES_INFO};
    use scribe_engine::{
        CompletionModel, CompletionRequest, Engine, EngineError, ResultSet, StageStore,
    };

    use super::EffectRunner;

    const STAGE: &str = "stage.folder.files";

    struct FakeStage {
        listing: Result<Vec<String>, EngineError>,
        reads: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl StageStore for FakeStage {
        async fn list(&self, _stage_path: &str) -> Result<Vec<String>, EngineError> {
            self.listing.clone()
        }

        async fn read(&self, _stage_path: &str, file_name: &str) -> Result<Vec<u8>, EngineError> {
            self.reads.lock().unwrap().push(file_name.to_string());
            if file_name == "broken.png" {
                return Err(EngineError::Http {
                    status: 403,
                    message: "403 Forbidden".to_string(),
                });
            }
            Ok(vec![7; 3])
        }
    }

    struct FakeModel {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl CompletionModel for FakeModel {
        async fn complete(&self, request: &CompletionRequest) -> Result<ResultSet, EngineError> {
            self.calls.lock().unwrap().push(request.file_name.clone());
            Ok(ResultSet::new(vec![vec![Some(format!(
                "text of {}",
                request.file_name
            ))]]))
        }
    }

    fn runner(listing: Result<Vec<&str>, EngineError>) -> (EffectRunner, Arc<FakeStage>, Arc<FakeModel>) {
        let stage = Arc::new(FakeStage {
            listing: listing.map(|keys| keys.into_iter().map(|k| format!("files/{k}")).collect()),
            reads: Mutex::new(Vec::new()),
        });
        let model = Arc::new(FakeModel {
            calls: Mutex::new(Vec::new()),
        });
        let engine = Engine::new(stage.clone(), model.clone(), "claude-3-5-sonnet");
        (EffectRunner::new(engine), stage, model)
    }

    fn rerun(selection: Option<&str>, force: bool) -> Msg {
        Msg::RerunRequested {
            selection: selection.map(ToOwned::to_owned),
            force_extraction: force,
        }
    }

    fn fresh() -> AppState {
        AppState::new(STAGE, "claude-3-5-sonnet")
    }

    #[tokio::test]
    async fn plain_pass_lists_and_previews_without_extracting() {
        let (runner, stage, model) = runner(Ok(vec!["note1.png", "readme.txt"]));

        let state = runner.run_pass(fresh(), vec![rerun(None, false)]).await;
        let view = state.view();

        assert_eq!(view.files, vec!["note1.png", "readme.txt"]);
        assert_eq!(view.selected.as_deref(), Some("note1.png"));
        assert_eq!(
            view.preview,
            PreviewView::Image {
                mime: "image/png",
                bytes: vec![7; 3]
            }
        );
        assert!(view.show_extract_button);
        assert_eq!(view.extracted_text, None);
        assert_eq!(stage.reads.lock().unwrap().as_slice(), ["note1.png"]);
        assert!(model.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn extract_click_runs_after_the_listing() {
        let (runner, _stage, model) = runner(Ok(vec!["note1.png", "readme.txt"]));

        let state = runner
            .run_pass(fresh(), vec![rerun(Some("note1.png"), false), Msg::ExtractClicked])
            .await;
        let view = state.view();

        assert_eq!(view.extracted_text.as_deref(), Some("text of note1.png"));
        assert!(!view.busy);
        assert_eq!(model.calls.lock().unwrap().as_slice(), ["note1.png"]);
    }

    #[tokio::test]
    async fn gated_file_is_not_extracted_without_override() {
        let (runner, _stage, model) = runner(Ok(vec!["note1.png", "readme.txt"]));

        let state = runner
            .run_pass(fresh(), vec![rerun(Some("readme.txt"), false), Msg::ExtractClicked])
            .await;
        assert_eq!(state.view().extracted_text, None);
        assert!(model.calls.lock().unwrap().is_empty());

        let state = runner
            .run_pass(fresh(), vec![rerun(Some("readme.txt"), true), Msg::ExtractClicked])
            .await;
        assert_eq!(
            state.view().extracted_text.as_deref(),
            Some("text of readme.txt")
        );
    }

    #[tokio::test]
    async fn listing_failure_is_one_error_and_the_empty_stage_info() {
        let (runner, stage, _model) = runner(Err(EngineError::Network("refused".to_string())));

        let state = runner.run_pass(fresh(), vec![rerun(None, false)]).await;
        let view = state.view();

        assert!(view.files.is_empty());
        assert_eq!(view.notifications.len(), 1);
        assert_eq!(view.notifications[0].severity, Severity::Error);
        assert_eq!(
            view.notifications[0].text,
            "Error accessing stage: network error: refused"
        );
        assert_eq!(view.info.as_deref(), Some(NO_FILES_INFO));
        assert!(stage.reads.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn preview_failure_keeps_extraction_available() {
        let (runner, _stage, _model) = runner(Ok(vec!["broken.png"]));

        let state = runner.run_pass(fresh(), vec![rerun(None, false)]).await;
        let view = state.view();

        assert!(matches!(view.preview, PreviewView::Failed { .. }));
        assert_eq!(
            view.notifications[0].text,
            "Error loading preview: http status 403: 403 Forbidden"
        );
        assert!(view.show_extract_button);
    }
}
