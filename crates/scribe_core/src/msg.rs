#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A new render pass started with the widget values submitted by the page.
    RerunRequested {
        selection: Option<String>,
        force_extraction: bool,
    },
    /// The stage lister answered (empty on failure).
    FilesListed(Vec<String>),
    /// A collaborator reported something the user should see.
    Notify(crate::Notification),
    /// Raw bytes of the selected file arrived.
    PreviewLoaded { file: String, bytes: Vec<u8> },
    /// Reading the selected file failed.
    PreviewFailed { file: String, message: String },
    /// User pressed the extract button.
    ExtractClicked,
    /// The extractor answered; `text` may be an error string.
    TextExtracted { file: String, text: String },
}
