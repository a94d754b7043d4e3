use scribe_logging::scribe_debug;

use crate::download::{DownloadSettings, PresignedDownloader};
use crate::extract::{CompletionModel, CompletionRequest};
use crate::sql::{complete_statement, list_statement, presigned_url_statement};
use crate::sql_api::{ConnectionSettings, SqlApiClient};
use crate::stage::StageStore;
use crate::{EngineError, ResultSet};

/// Explicit connection serving as both the stage store and the completion model.
#[derive(Debug, Clone)]
pub struct SnowflakeConnection {
    sql: SqlApiClient,
    downloader: PresignedDownloader,
}

impl SnowflakeConnection {
    pub fn new(
        connection: ConnectionSettings,
        download: DownloadSettings,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            sql: SqlApiClient::new(connection)?,
            downloader: PresignedDownloader::new(download)?,
        })
    }
}

#[async_trait::async_trait]
impl StageStore for SnowflakeConnection {
    async fn list(&self, stage_path: &str) -> Result<Vec<String>, EngineError> {
        let result = self.sql.execute(&list_statement(stage_path)?).await?;
        Ok(result.first_column().map(ToOwned::to_owned).collect())
    }

    async fn read(&self, stage_path: &str, file_name: &str) -> Result<Vec<u8>, EngineError> {
        let statement = presigned_url_statement(
            stage_path,
            file_name,
            self.downloader.settings().url_expiry_secs,
        )?;
        let result = self.sql.execute(&statement).await?;
        let url = result.first_value().ok_or_else(|| {
            EngineError::MalformedResponse(format!("no presigned url for '{file_name}'"))
        })?;
        scribe_debug!("Reading @{}/{} through presigned url", stage_path, file_name);
        self.downloader.download(url).await
    }
}

#[async_trait::async_trait]
impl CompletionModel for SnowflakeConnection {
    async fn complete(&self, request: &CompletionRequest) -> Result<ResultSet, EngineError> {
        let statement = complete_statement(
            &request.model,
            &request.prompt,
            &request.stage_path,
            &request.file_name,
        )?;
        self.sql.execute(&statement).await
    }
}
