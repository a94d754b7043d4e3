use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RerunRequested {
            selection,
            force_extraction,
        } => {
            state.begin_pass(selection, force_extraction);
            vec![Effect::ListFiles {
                stage_path: state.stage_path().to_string(),
            }]
        }
        Msg::FilesListed(files) => match state.apply_listing(files) {
            Some(file) => vec![load_preview(&state, file)],
            None => Vec::new(),
        },
        Msg::Notify(notification) => {
            state.push_notification(notification);
            Vec::new()
        }
        Msg::PreviewLoaded { file, bytes } => {
            state.apply_preview(&file, bytes);
            Vec::new()
        }
        Msg::PreviewFailed { file, message } => {
            state.apply_preview_failure(&file, message);
            Vec::new()
        }
        Msg::ExtractClicked => match state.start_extraction() {
            Some(file) => vec![Effect::ExtractText {
                stage_path: state.stage_path().to_string(),
                file,
            }],
            None => Vec::new(),
        },
        Msg::TextExtracted { file, text } => {
            state.finish_extraction(&file, text);
            Vec::new()
        }
    };

    (state, effects)
}

fn load_preview(state: &AppState, file: String) -> Effect {
    Effect::LoadPreview {
        stage_path: state.stage_path().to_string(),
        file,
    }
}
