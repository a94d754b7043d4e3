use thiserror::Error;

/// Failure of a call to one of the remote collaborators.
///
/// The `Display` text is shown to users after the listing/extraction prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid stage path '{0}'")]
    InvalidStagePath(String),
    #[error("http status {status}: {message}")]
    Http { status: u16, message: String },
    #[error("statement failed with code {code} (http {status}): {message}")]
    Statement {
        status: u16,
        code: String,
        message: String,
    },
    #[error("statement {handle} is still running")]
    StatementPending { handle: String },
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("response too large (max {max_bytes}, actual {actual:?})")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl EngineError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return EngineError::Timeout(err.to_string());
        }
        EngineError::Network(err.to_string())
    }
}

/// Rows of a statement result; every cell is text or SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First column of the first row, `None` when empty or NULL.
    pub fn first_value(&self) -> Option<&str> {
        self.rows.first()?.first()?.as_deref()
    }

    /// First column of every row, skipping NULLs.
    pub fn first_column(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(|row| row.first().and_then(|cell| cell.as_deref()))
    }
}
