use anyhow::Result;
use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use std::sync::Arc;

use crate::config::settings::Settings;
use crate::models::session::SessionRow;
use crate::stats::aggregate;
use crate::store::session_log;
use crate::ui::render;
use crate::ui::theme::PageConfig;

/// The dashboard server. Holds configuration only, never data: every
/// request runs a full load, aggregate, and render pass over the log.
#[derive(Clone)]
pub struct DashboardApp {
    settings: Arc<Settings>,
    page: Arc<PageConfig>,
}

impl DashboardApp {
    pub fn new(settings: Settings, page: PageConfig) -> Self {
        Self {
            settings: Arc::new(settings),
            page: Arc::new(page),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(dashboard))
            .route("/api/health", get(health))
            .with_state(self.clone())
    }

    pub async fn run(self) -> Result<()> {
        let addr = self.settings.bind_addr.clone();
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        log::info!("Dashboard listening on http://{}", addr);
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// One full render pass: discover the log, load and normalize it,
    /// aggregate, and produce the page. The two expected halt states render
    /// as warning pages; anything else propagates to the 500 adapter.
    fn render_pass(&self) -> Result<String> {
        let candidates = &self.settings.sessions_log_candidates;
        let log_path = match session_log::find_sessions_log(candidates) {
            Some(path) => path,
            None => {
                log::debug!("No sessions log among {} candidates", candidates.len());
                return Ok(render::missing_log_page(&self.page, candidates));
            }
        };

        let records = session_log::load_sessions(&log_path)?;
        if records.is_empty() {
            log::debug!("{} holds no valid records", log_path.display());
            return Ok(render::no_records_page(&self.page, &log_path));
        }

        let rows = SessionRow::from_records(records);
        let stats = aggregate::summary_stats(&rows);
        let series = aggregate::focus_timeseries(&rows);
        let distractions = aggregate::distraction_breakdown(&rows);
        let app_activities = aggregate::app_activity_breakdown(&rows);
        log::debug!("Rendering {} sessions from {}", rows.len(), log_path.display());
        render::dashboard_page(
            &self.page,
            &stats,
            &series,
            &distractions,
            &app_activities,
            &rows,
        )
    }
}

async fn dashboard(State(app): State<DashboardApp>) -> Result<Html<String>, RenderError> {
    Ok(Html(app.render_pass()?))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Maps a failed render pass to a plain 500. The server keeps serving; the
/// failure only affects this response.
struct RenderError(anyhow::Error);

impl IntoResponse for RenderError {
    fn into_response(self) -> Response {
        log::error!("Render pass failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "dashboard render failed").into_response()
    }
}

impl<E> From<E> for RenderError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("Ctrl-C received, shutting down"),
        Err(e) => log::error!("Failed to listen for shutdown signal: {}", e),
    }
}
