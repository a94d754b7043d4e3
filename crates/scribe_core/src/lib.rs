//! Scribe core: pure render-pass state machine and view-model helpers.
mod effect;
mod file_kind;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use file_kind::{file_extension, is_image_file_name, mime_for_file_name, IMAGE_EXTENSIONS};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{
    not_an_image_warning, AppViewModel, ExtractionGate, Notification, PreviewView, Severity,
    NO_FILES_INFO,
};
