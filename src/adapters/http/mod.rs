pub mod error;
pub mod handlers;

use crate::core::service::PredictionService;
use crate::domain::model::{PredictionRequest, Region};
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use error::ValidatedJson;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service: Arc::new(service),
            started_at: Utc::now(),
        }
    }
}

/// Builds the router: `GET /health` plus one `POST /predict/{region}` per region.
pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health));

    for region in Region::ALL {
        router = router.route(
            &format!("/predict/{}", region),
            post(
                move |State(state): State<AppState>,
                      ValidatedJson(request): ValidatedJson<PredictionRequest>| async move {
                    handlers::predict(&state, region, request)
                },
            ),
        );
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
