use crate::file_kind::{is_image_file_name, mime_for_file_name};
use crate::view_model::{
    not_an_image_warning, AppViewModel, ExtractionGate, Notification, PreviewView, NO_FILES_INFO,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    stage_path: String,
    model_label: String,
    files: Vec<String>,
    listed: bool,
    requested_selection: Option<String>,
    selected: Option<String>,
    force_extraction: bool,
    preview: PreviewView,
    notifications: Vec<Notification>,
    busy: bool,
    extracted_text: Option<String>,
}

impl AppState {
    pub fn new(stage_path: impl Into<String>, model_label: impl Into<String>) -> Self {
        Self {
            stage_path: stage_path.into(),
            model_label: model_label.into(),
            ..Self::default()
        }
    }

    pub fn stage_path(&self) -> &str {
        &self.stage_path
    }

    pub fn gate(&self) -> ExtractionGate {
        match self.selected.as_deref() {
            None => ExtractionGate::NoSelection,
            Some(name) if is_image_file_name(name) => ExtractionGate::Open,
            Some(_) if self.force_extraction => ExtractionGate::Overridden,
            Some(_) => ExtractionGate::NeedsOverride,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let gate = self.gate();
        let warning = match (gate, self.selected.as_deref()) {
            (ExtractionGate::NeedsOverride, Some(name)) => Some(not_an_image_warning(name)),
            _ => None,
        };
        let info = (self.listed && self.files.is_empty()).then(|| NO_FILES_INFO.to_string());

        AppViewModel {
            stage_path: self.stage_path.clone(),
            files: self.files.clone(),
            selected: self.selected.clone(),
            preview: self.preview.clone(),
            gate,
            show_force_checkbox: matches!(
                gate,
                ExtractionGate::NeedsOverride | ExtractionGate::Overridden
            ),
            force_extraction: self.force_extraction,
            show_extract_button: gate.allows_extraction(),
            warning,
            info,
            notifications: self.notifications.clone(),
            busy: self.busy,
            spinner_label: format!("Extracting text using {}...", self.model_label),
            extracted_text: self.extracted_text.clone(),
        }
    }

    /// Resets everything a rerun recomputes; keeps only the submitted widget values.
    pub(crate) fn begin_pass(&mut self, selection: Option<String>, force_extraction: bool) {
        self.files.clear();
        self.listed = false;
        self.requested_selection = selection;
        self.selected = None;
        self.force_extraction = force_extraction;
        self.preview = PreviewView::None;
        self.notifications.clear();
        self.busy = false;
        self.extracted_text = None;
    }

    /// Stores a listing and resolves the selection against it.
    ///
    /// A requested name that is not in the listing falls back to the first entry.
    pub(crate) fn apply_listing(&mut self, files: Vec<String>) -> Option<String> {
        let requested = self
            .requested_selection
            .take()
            .or_else(|| self.selected.clone());
        let selected = match requested {
            Some(name) if files.contains(&name) => Some(name),
            _ => files.first().cloned(),
        };
        if selected != self.selected {
            self.clear_selection_outputs();
        }
        self.files = files;
        self.listed = true;
        self.selected = selected.clone();
        selected
    }

    pub(crate) fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub(crate) fn apply_preview(&mut self, file: &str, bytes: Vec<u8>) {
        if self.selected.as_deref() != Some(file) {
            return;
        }
        self.preview = if is_image_file_name(file) {
            PreviewView::Image {
                mime: mime_for_file_name(file),
                bytes,
            }
        } else {
            PreviewView::NotAnImage {
                byte_len: bytes.len() as u64,
            }
        };
    }

    pub(crate) fn apply_preview_failure(&mut self, file: &str, message: String) {
        if self.selected.as_deref() != Some(file) {
            return;
        }
        self.notifications
            .push(Notification::error(format!("Error loading preview: {message}")));
        self.preview = PreviewView::Failed { message };
    }

    /// Marks the extraction as in flight; returns the file to extract when the gate allows it.
    pub(crate) fn start_extraction(&mut self) -> Option<String> {
        if self.busy || !self.gate().allows_extraction() {
            return None;
        }
        let file = self.selected.clone()?;
        self.busy = true;
        self.extracted_text = None;
        Some(file)
    }

    pub(crate) fn finish_extraction(&mut self, file: &str, text: String) {
        if !self.busy {
            return;
        }
        self.busy = false;
        if self.selected.as_deref() == Some(file) {
            self.extracted_text = Some(text);
        }
    }

    fn clear_selection_outputs(&mut self) {
        self.preview = PreviewView::None;
        self.extracted_text = None;
        self.busy = false;
    }
}
