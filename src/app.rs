use axum::Router;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::models::weather_source::WeatherSourceHandle;
use crate::routes::dashboard;

// Anything that goes in here must be a handle or pointer that can be cloned.
// The underlying state itself should be shared.
#[derive(Clone)]
pub struct AppState {
    pub source: WeatherSourceHandle,
    pub settings: Arc<Settings>,
}

pub fn create_app(state: AppState, assets_path: &str) -> Router {
    let mut app = Router::new()
        .merge(dashboard::routes(state))
        .layer(TraceLayer::new_for_http());

    log::debug!("serving assets from {}", assets_path);
    let assets_service = ServeDir::new(assets_path);
    app = app.fallback_service(assets_service);
    app
}
