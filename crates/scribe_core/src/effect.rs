/// Remote work requested by `update`; the runner performs it and answers with a `Msg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Enumerate the stage; answered by `Msg::FilesListed` (plus `Msg::Notify` on failure).
    ListFiles { stage_path: String },
    /// Stream the raw bytes of one staged file; answered by `PreviewLoaded`/`PreviewFailed`.
    LoadPreview { stage_path: String, file: String },
    /// Ask the completion model for the file's text; answered by `Msg::TextExtracted`.
    ExtractText { stage_path: String, file: String },
}
