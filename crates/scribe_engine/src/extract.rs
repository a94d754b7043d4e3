use scribe_logging::{scribe_debug, scribe_info, scribe_warn, truncate_for_log, MAX_LOGGED_TEXT};

use crate::{EngineError, ResultSet};

pub const EXTRACTION_PROMPT: &str = "Please extract the text from this sample. \
    If there are equations, please have them nicely formatted in LaTeX.";
pub const NO_TEXT_EXTRACTED: &str = "No text extracted";
pub const EXTRACTION_ERROR_PREFIX: &str = "Error extracting text:";

/// One prompt plus one staged file, addressed to a named model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub stage_path: String,
    pub file_name: String,
}

/// Hosted multimodal model; the generated text is the first cell of the first row.
#[async_trait::async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<ResultSet, EngineError>;
}

/// Transcribes `file_name` with the fixed LaTeX-aware prompt.
///
/// Always returns display text: the transcription, [`NO_TEXT_EXTRACTED`], or a message
/// starting with [`EXTRACTION_ERROR_PREFIX`].
pub async fn extract_text(
    model: &dyn CompletionModel,
    model_name: &str,
    stage_path: &str,
    file_name: &str,
) -> String {
    let request = CompletionRequest {
        model: model_name.to_string(),
        prompt: EXTRACTION_PROMPT.to_string(),
        stage_path: stage_path.to_string(),
        file_name: file_name.to_string(),
    };

    scribe_info!("Extracting text from @{}/{} with {}", stage_path, file_name, model_name);
    match model.complete(&request).await {
        Ok(result) => {
            if result.rows.len() > 1 || result.rows.first().is_some_and(|row| row.len() > 1) {
                scribe_debug!(
                    "Completion returned {} row(s); only the first cell is used",
                    result.rows.len()
                );
            }
            match result.first_value() {
                Some(text) => {
                    scribe_debug!("Extracted: {}", truncate_for_log(text, MAX_LOGGED_TEXT));
                    text.to_string()
                }
                None => NO_TEXT_EXTRACTED.to_string(),
            }
        }
        Err(err) => {
            scribe_warn!("Extraction of {} failed: {}", file_name, err);
            format!("{EXTRACTION_ERROR_PREFIX} {err}")
        }
    }
}
