use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Form, Router};
use log::LevelFilter;
use scribe_core::{AppState, Msg};
use scribe_engine::Engine;
use scribe_logging::{scribe_debug, scribe_info};
use serde::Deserialize;
use tokio::net::TcpListener;

use super::config::{self, AppConfig, TOKEN_ENV};
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;
use super::ui::render::RenderOptions;

/// What the command line decided before the config file is read.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: Option<PathBuf>,
    pub bind: Option<String>,
    pub log_destination: LogDestination,
    pub log_level: LevelFilter,
}

pub async fn run_app(options: RunOptions) -> anyhow::Result<()> {
    logging::initialize(options.log_destination, options.log_level);

    let mut config = config::load(options.config_path.as_deref())?;
    config.apply_token(std::env::var(TOKEN_ENV).ok());
    if let Some(bind) = options.bind {
        config.bind = bind;
    }
    config.validate()?;
    scribe_debug!("Effective config: {:?}", config);

    let engine = Engine::connect(
        config.connection_settings(),
        config.download_settings(),
        config.model.clone(),
    )
    .context("building the Snowflake connection")?;

    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.bind))?;
    let context = Arc::new(AppContext::new(config, engine));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    scribe_info!("Serving on http://{}", addr);
    axum::serve(listener, router(context))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    scribe_info!("Server stopped");
    Ok(())
}

/// Immutable per-process context shared by all render passes.
pub struct AppContext {
    config: AppConfig,
    runner: EffectRunner,
}

impl AppContext {
    pub fn new(config: AppConfig, engine: Engine) -> Self {
        Self {
            config,
            runner: EffectRunner::new(engine),
        }
    }

    /// One rerun of the page: fresh state, the submitted messages, then HTML.
    pub async fn render_pass(&self, msgs: Vec<Msg>) -> String {
        let state = AppState::new(&self.config.stage_path, self.runner.engine().model_name());
        let state = self.runner.run_pass(state, msgs).await;
        let view = state.view();
        scribe_debug!(
            "Render pass: {} files, selected {:?}, gate {:?}",
            view.files.len(),
            view.selected,
            view.gate
        );
        ui::render::render(
            &view,
            RenderOptions {
                render_math: self.config.render_math,
            },
        )
    }
}

/// Widget values carried by the page: the selector and the override checkbox.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    file: Option<String>,
    force: Option<String>,
}

impl PageParams {
    fn force_extraction(&self) -> bool {
        matches!(self.force.as_deref(), Some("on" | "true" | "1"))
    }

    fn rerun(self) -> Msg {
        let force_extraction = self.force_extraction();
        Msg::RerunRequested {
            selection: self.file.filter(|name| !name.is_empty()),
            force_extraction,
        }
    }
}

pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route(ui::constants::ROUTE_INDEX, get(index))
        .route(ui::constants::ROUTE_EXTRACT, post(extract))
        .route(ui::constants::ROUTE_HEALTH, get(|| async { "OK" }))
        .with_state(context)
}

async fn index(
    State(context): State<Arc<AppContext>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    Html(context.render_pass(vec![params.rerun()]).await)
}

async fn extract(
    State(context): State<Arc<AppContext>>,
    Form(params): Form<PageParams>,
) -> Html<String> {
    scribe_info!("Extraction requested for {:?}", params.file);
    Html(
        context
            .render_pass(vec![params.rerun(), Msg::ExtractClicked])
            .await,
    )
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; serve until the process is killed.
        std::future::pending::<()>().await;
    }
    scribe_info!("Shutdown requested");
}
