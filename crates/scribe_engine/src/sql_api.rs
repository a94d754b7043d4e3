use std::time::Duration;

use reqwest::header::ACCEPT;
use scribe_logging::{redact_secret, scribe_debug, scribe_warn, truncate_for_log, MAX_LOGGED_TEXT};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{EngineError, ResultSet};

const STATEMENTS_PATH: &str = "api/v2/statements";
const TOKEN_TYPE_HEADER: &str = "X-Snowflake-Authorization-Token-Type";

/// Connection to a Snowflake account's SQL API.
#[derive(Clone)]
pub struct ConnectionSettings {
    /// e.g. `https://myorg-myaccount.snowflakecomputing.com`
    pub account_url: String,
    pub token: String,
    /// `PROGRAMMATIC_ACCESS_TOKEN`, `OAUTH` or `KEYPAIR_JWT`.
    pub token_type: String,
    pub warehouse: Option<String>,
    pub database: Option<String>,
    pub schema: Option<String>,
    pub role: Option<String>,
    pub connect_timeout: Duration,
    /// Server-side statement timeout; the HTTP timeout adds a small margin on top.
    pub statement_timeout: Duration,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            account_url: String::new(),
            token: String::new(),
            token_type: "PROGRAMMATIC_ACCESS_TOKEN".to_string(),
            warehouse: None,
            database: None,
            schema: None,
            role: None,
            connect_timeout: Duration::from_secs(10),
            statement_timeout: Duration::from_secs(120),
        }
    }
}

impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("account_url", &self.account_url)
            .field("token", &redact_secret(&self.token))
            .field("token_type", &self.token_type)
            .field("warehouse", &self.warehouse)
            .field("database", &self.database)
            .field("schema", &self.schema)
            .field("role", &self.role)
            .field("connect_timeout", &self.connect_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct StatementRequest<'a> {
    statement: &'a str,
    timeout: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schema: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    data: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    statement_handle: Option<String>,
}

/// Runs single statements synchronously; only the first result partition is read.
#[derive(Debug, Clone)]
pub struct SqlApiClient {
    http: reqwest::Client,
    endpoint: Url,
    settings: ConnectionSettings,
}

impl SqlApiClient {
    pub fn new(settings: ConnectionSettings) -> Result<Self, EngineError> {
        let base = Url::parse(&settings.account_url).map_err(|err| {
            EngineError::Config(format!("account url '{}': {err}", settings.account_url))
        })?;
        let endpoint = base
            .join(STATEMENTS_PATH)
            .map_err(|err| EngineError::Config(err.to_string()))?;

        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.statement_timeout + Duration::from_secs(5))
            .user_agent(concat!("stage_scribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(EngineError::from_reqwest)?;

        scribe_debug!("SQL API endpoint {} settings {:?}", endpoint, settings);
        Ok(Self {
            http,
            endpoint,
            settings,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn execute(&self, statement: &str) -> Result<ResultSet, EngineError> {
        let body = StatementRequest {
            statement,
            timeout: self.settings.statement_timeout.as_secs(),
            database: self.settings.database.as_deref(),
            schema: self.settings.schema.as_deref(),
            warehouse: self.settings.warehouse.as_deref(),
            role: self.settings.role.as_deref(),
        };

        let mut request = self
            .http
            .post(self.endpoint.clone())
            .header(ACCEPT, "application/json")
            .header(TOKEN_TYPE_HEADER, &self.settings.token_type)
            .json(&body);
        if !self.settings.token.is_empty() {
            request = request.bearer_auth(&self.settings.token);
        }

        scribe_debug!("Executing statement: {}", truncate_for_log(statement, MAX_LOGGED_TEXT));
        let response = request.send().await.map_err(EngineError::from_reqwest)?;
        let status = response.status();
        let text = response.text().await.map_err(EngineError::from_reqwest)?;
        let parsed: Option<StatementResponse> = serde_json::from_str(&text).ok();

        match status.as_u16() {
            200 => {
                let parsed = parsed.ok_or_else(|| {
                    EngineError::MalformedResponse(truncate_for_log(&text, MAX_LOGGED_TEXT))
                })?;
                let rows = parsed.data.unwrap_or_default();
                scribe_debug!("Statement returned {} row(s)", rows.len());
                Ok(ResultSet::new(rows))
            }
            202 => {
                let handle = parsed
                    .and_then(|p| p.statement_handle)
                    .unwrap_or_else(|| "<unknown>".to_string());
                scribe_warn!("Statement {} did not finish within the request", handle);
                Err(EngineError::StatementPending { handle })
            }
            code => {
                let err = match parsed {
                    Some(StatementResponse {
                        code: Some(sql_code),
                        message,
                        ..
                    }) => EngineError::Statement {
                        status: code,
                        code: sql_code,
                        message: message.unwrap_or_default(),
                    },
                    _ => EngineError::Http {
                        status: code,
                        message: status
                            .canonical_reason()
                            .unwrap_or("unexpected status")
                            .to_string(),
                    },
                };
                scribe_warn!(
                    "Statement failed: {} body={}",
                    err,
                    truncate_for_log(&text, MAX_LOGGED_TEXT)
                );
                Err(err)
            }
        }
    }
}
