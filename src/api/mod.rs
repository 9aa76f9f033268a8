// HTTP 路由：成功回 JSON，錯誤依 ErrorCategory 回純文字與狀態碼

use crate::core::tracker::{IssTracker, LocationReport, NowReport, Page, SpeedReport};
use crate::domain::model::{OemHeader, OemMetadata, StateVector};
use crate::domain::ports::{FeedSource, Geocoder};
use crate::utils::error::{ErrorCategory, TrackerError};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::net::TcpListener;

type ApiResult<T> = std::result::Result<Json<T>, TrackerError>;

type SharedTracker<F, G> = State<Arc<IssTracker<F, G>>>;

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::Request => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Upstream => StatusCode::BAD_GATEWAY,
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!("❌ Request failed: {} (Category: {:?})", self, self.category());
        } else {
            tracing::info!("Request rejected: {}", self);
        }

        (status, format!("{}\n", self.user_friendly_message())).into_response()
    }
}

pub fn router<F, G>(tracker: Arc<IssTracker<F, G>>) -> Router
where
    F: FeedSource + 'static,
    G: Geocoder + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/epochs", get(list_epochs::<F, G>))
        .route("/epochs/:epoch", get(get_epoch::<F, G>))
        .route("/epochs/:epoch/speed", get(epoch_speed::<F, G>))
        .route("/epochs/:epoch/location", get(epoch_location::<F, G>))
        .route("/now", get(now::<F, G>))
        .route("/comment", get(comment::<F, G>))
        .route("/header", get(header::<F, G>))
        .route("/metadata", get(metadata::<F, G>))
        .with_state(tracker)
}

/// 啟動 HTTP 服務，收到 Ctrl-C / SIGTERM 後等待進行中的請求完成再結束
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    tracing::info!("🚀 Listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining in-flight requests");
}

async fn health() -> &'static str {
    "ok"
}

async fn list_epochs<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Vec<StateVector>> {
    let page = Page::from_query(
        params.get("offset").map(String::as_str),
        params.get("limit").map(String::as_str),
    )?;
    tracing::debug!("Listing epochs: {:?}", page);

    Ok(Json(tracker.list_epochs(page).await?))
}

async fn get_epoch<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
    Path(epoch): Path<String>,
) -> ApiResult<StateVector> {
    Ok(Json(tracker.epoch(&epoch).await?))
}

async fn epoch_speed<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
    Path(epoch): Path<String>,
) -> ApiResult<SpeedReport> {
    Ok(Json(tracker.epoch_speed(&epoch).await?))
}

async fn epoch_location<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
    Path(epoch): Path<String>,
) -> ApiResult<LocationReport> {
    Ok(Json(tracker.epoch_location(&epoch).await?))
}

async fn now<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
) -> ApiResult<NowReport> {
    Ok(Json(tracker.now().await?))
}

async fn comment<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
) -> ApiResult<Vec<String>> {
    Ok(Json(tracker.comments().await?))
}

async fn header<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
) -> ApiResult<OemHeader> {
    Ok(Json(tracker.header().await?))
}

async fn metadata<F: FeedSource, G: Geocoder>(
    State(tracker): SharedTracker<F, G>,
) -> ApiResult<OemMetadata> {
    Ok(Json(tracker.metadata().await?))
}
