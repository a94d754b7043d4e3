use std::sync::Arc;

use crate::download::DownloadSettings;
use crate::extract::{extract_text, CompletionModel};
use crate::snowflake::SnowflakeConnection;
use crate::sql_api::ConnectionSettings;
use crate::stage::{list_stage_files, NotificationSink, StageStore};
use crate::EngineError;

/// The two collaborators plus the model name, shared by every render pass.
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn StageStore>,
    model: Arc<dyn CompletionModel>,
    model_name: String,
}

impl Engine {
    pub fn new(
        store: Arc<dyn StageStore>,
        model: Arc<dyn CompletionModel>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            model,
            model_name: model_name.into(),
        }
    }

    /// Builds an engine whose store and model are one Snowflake connection.
    pub fn connect(
        connection: ConnectionSettings,
        download: DownloadSettings,
        model_name: impl Into<String>,
    ) -> Result<Self, EngineError> {
        let snowflake = Arc::new(SnowflakeConnection::new(connection, download)?);
        Ok(Self::new(snowflake.clone(), snowflake, model_name))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub async fn list_files(&self, stage_path: &str, sink: &dyn NotificationSink) -> Vec<String> {
        list_stage_files(self.store.as_ref(), stage_path, sink).await
    }

    pub async fn read_file(&self, stage_path: &str, file_name: &str) -> Result<Vec<u8>, EngineError> {
        self.store.read(stage_path, file_name).await
    }

    pub async fn extract_text(&self, stage_path: &str, file_name: &str) -> String {
        extract_text(self.model.as_ref(), &self.model_name, stage_path, file_name).await
    }
}
