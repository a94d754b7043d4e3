//! Scribe engine: stage listing, text extraction and the Snowflake SQL API binding.
mod download;
mod engine;
mod extract;
mod snowflake;
mod sql;
mod sql_api;
mod stage;
mod types;

pub use download::{DownloadSettings, PresignedDownloader};
pub use engine::Engine;
pub use extract::{
    extract_text, CompletionModel, CompletionRequest, EXTRACTION_ERROR_PREFIX, EXTRACTION_PROMPT,
    NO_TEXT_EXTRACTED,
};
pub use snowflake::SnowflakeConnection;
pub use sql::{
    complete_statement, list_statement, presigned_url_statement, quote_literal, stage_file,
    validate_stage_path,
};
pub use sql_api::{ConnectionSettings, SqlApiClient};
pub use stage::{file_name_from_key, list_stage_files, NotificationSink, StageStore};
pub use types::{EngineError, ResultSet};
