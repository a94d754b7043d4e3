use scribe_logging::{scribe_info, scribe_warn};

use crate::EngineError;

/// Storage backend holding the staged files.
#[async_trait::async_trait]
pub trait StageStore: Send + Sync {
    /// Full object keys (first field of every listing row), in listing order.
    async fn list(&self, stage_path: &str) -> Result<Vec<String>, EngineError>;

    /// Raw bytes of one file in the stage.
    async fn read(&self, stage_path: &str, file_name: &str) -> Result<Vec<u8>, EngineError>;
}

/// Side channel for user-visible errors raised while listing.
pub trait NotificationSink: Send + Sync {
    fn error(&self, message: String);
}

/// Text after the last `/` of an object key.
pub fn file_name_from_key(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Lists bare file names in `stage_path`.
///
/// Never fails: any error yields an empty list and exactly one notification on `sink`.
pub async fn list_stage_files(
    store: &dyn StageStore,
    stage_path: &str,
    sink: &dyn NotificationSink,
) -> Vec<String> {
    match store.list(stage_path).await {
        Ok(keys) => {
            let names: Vec<String> = keys
                .iter()
                .map(|key| file_name_from_key(key).to_string())
                .collect();
            scribe_info!("Listed {} file(s) in @{}", names.len(), stage_path);
            names
        }
        Err(err) => {
            scribe_warn!("Listing @{} failed: {}", stage_path, err);
            sink.error(format!("Error accessing stage: {err}"));
            Vec::new()
        }
    }
}
