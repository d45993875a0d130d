pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::contractors::handlers::handle_list_contractors;
use crate::recommendations::handlers::handle_generate_recommendations;
use crate::state::AppState;

/// Every response, errors included, carries `Access-Control-Allow-Origin: *`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/contractors", get(handle_list_contractors))
        .route("/recommendations", post(handle_generate_recommendations))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
