use std::sync::Once;

use pretty_assertions::assert_eq;
use scribe_core::{update, AppState, Effect, Msg, PreviewView, Severity};

const STAGE: &str = "stage.folder.files";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(scribe_logging::initialize_for_tests);
}

fn listed_with(selection: &str, files: &[&str], force: bool) -> AppState {
    init_logging();
    let (state, _) = update(
        AppState::new(STAGE, "claude-3-5-sonnet"),
        Msg::RerunRequested {
            selection: Some(selection.to_string()),
            force_extraction: force,
        },
    );
    let (state, _) = update(
        state,
        Msg::FilesListed(files.iter().map(|f| f.to_string()).collect()),
    );
    state
}

#[test]
fn image_preview_carries_bytes_and_mime() {
    let state = listed_with("note1.png", &["note1.png"], false);
    let (state, _) = update(
        state,
        Msg::PreviewLoaded {
            file: "note1.png".to_string(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        },
    );

    assert_eq!(
        state.view().preview,
        PreviewView::Image {
            mime: "image/png",
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    );
}

#[test]
fn non_image_preview_only_reports_size() {
    let state = listed_with("readme.txt", &["readme.txt"], false);
    let (state, _) = update(
        state,
        Msg::PreviewLoaded {
            file: "readme.txt".to_string(),
            bytes: b"hello".to_vec(),
        },
    );

    assert_eq!(state.view().preview, PreviewView::NotAnImage { byte_len: 5 });
}

#[test]
fn stale_preview_is_dropped() {
    let state = listed_with("note1.png", &["note1.png", "note2.png"], false);
    let (state, _) = update(
        state,
        Msg::PreviewLoaded {
            file: "note2.png".to_string(),
            bytes: vec![1, 2, 3],
        },
    );

    assert_eq!(state.view().preview, PreviewView::None);
}

#[test]
fn preview_failure_becomes_error_notification() {
    let state = listed_with("note1.png", &["note1.png"], false);
    let (state, _) = update(
        state,
        Msg::PreviewFailed {
            file: "note1.png".to_string(),
            message: "http status 403".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(
        view.preview,
        PreviewView::Failed {
            message: "http status 403".to_string()
        }
    );
    assert_eq!(view.notifications.len(), 1);
    assert_eq!(view.notifications[0].severity, Severity::Error);
    assert_eq!(
        view.notifications[0].text,
        "Error loading preview: http status 403"
    );
    // The preview failing does not close the gate.
    assert!(view.show_extract_button);
}

#[test]
fn extraction_round_trip_shows_text_and_clears_busy() {
    let state = listed_with("note1.png", &["note1.png"], false);
    let (state, effects) = update(state, Msg::ExtractClicked);
    assert_eq!(
        effects,
        vec![Effect::ExtractText {
            stage_path: STAGE.to_string(),
            file: "note1.png".to_string(),
        }]
    );
    let view = state.view();
    assert!(view.busy);
    assert_eq!(view.spinner_label, "Extracting text using claude-3-5-sonnet...");

    // A second click while busy is swallowed.
    let (state, effects) = update(state, Msg::ExtractClicked);
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::TextExtracted {
            file: "note1.png".to_string(),
            text: "$E = mc^2$".to_string(),
        },
    );
    let view = state.view();
    assert!(!view.busy);
    assert_eq!(view.extracted_text.as_deref(), Some("$E = mc^2$"));
}

#[test]
fn extraction_text_lives_only_until_the_next_interaction() {
    let state = listed_with("note1.png", &["note1.png", "note2.png"], false);
    let (state, _) = update(state, Msg::ExtractClicked);
    let (state, _) = update(
        state,
        Msg::TextExtracted {
            file: "note1.png".to_string(),
            text: "hello".to_string(),
        },
    );
    assert!(state.view().extracted_text.is_some());

    let (state, _) = update(
        state,
        Msg::RerunRequested {
            selection: Some("note2.png".to_string()),
            force_extraction: false,
        },
    );
    assert_eq!(state.view().extracted_text, None);

    let (state, _) = update(
        state,
        Msg::RerunRequested {
            selection: Some("note1.png".to_string()),
            force_extraction: false,
        },
    );
    assert_eq!(state.view().extracted_text, None);
}

#[test]
fn error_strings_are_displayed_like_any_other_text() {
    let state = listed_with("scan.pdf", &["scan.pdf"], true);
    let (state, effects) = update(state, Msg::ExtractClicked);
    assert_eq!(effects.len(), 1);

    let (state, _) = update(
        state,
        Msg::TextExtracted {
            file: "scan.pdf".to_string(),
            text: "Error extracting text: http status 422".to_string(),
        },
    );
    assert_eq!(
        state.view().extracted_text.as_deref(),
        Some("Error extracting text: http status 422")
    );
}
