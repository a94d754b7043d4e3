pub const NO_FILES_INFO: &str =
    "No files found in the specified stage or the stage doesn't exist.";

pub fn not_an_image_warning(file_name: &str) -> String {
    format!(
        "Selected file '{file_name}' doesn't appear to be an image. \
         Select a file with an image extension or check 'Force extraction'."
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Error,
    Warning,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
}

impl Notification {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            text: text.into(),
        }
    }
}

/// Whether the extract button may be shown for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionGate {
    #[default]
    NoSelection,
    /// Image extension; no override needed.
    Open,
    /// Not an image and the override checkbox is clear.
    NeedsOverride,
    /// Not an image but the user forced extraction.
    Overridden,
}

impl ExtractionGate {
    pub fn allows_extraction(self) -> bool {
        matches!(self, ExtractionGate::Open | ExtractionGate::Overridden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewView {
    #[default]
    None,
    Image { mime: &'static str, bytes: Vec<u8> },
    NotAnImage { byte_len: u64 },
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub stage_path: String,
    pub files: Vec<String>,
    pub selected: Option<String>,
    pub preview: PreviewView,
    pub gate: ExtractionGate,
    pub show_force_checkbox: bool,
    pub force_extraction: bool,
    pub show_extract_button: bool,
    pub warning: Option<String>,
    pub info: Option<String>,
    pub notifications: Vec<Notification>,
    pub busy: bool,
    pub spinner_label: String,
    pub extracted_text: Option<String>,
}
