use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::{Router, routing::get};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

use crate::app::AppState;
use crate::dashboard::controller::DashboardController;
use crate::dashboard::page::{LivePage, Page};
use crate::dashboard::{ElementId, Surface, UiEvent};
use crate::error::InternalError;
use crate::routes::index::{SOCKET_PATH, render_main};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_index))
        .route("/search", get(get_search))
        .route(SOCKET_PATH, get(dashboard_handle_upgrade))
        .with_state(state)
}

fn create_controller<P: Surface>(
    state: &AppState,
    page: Arc<Mutex<P>>,
) -> DashboardController<P> {
    DashboardController::new(
        state.source.clone(),
        page,
        state.settings.default_city.clone(),
    )
}

async fn get_index(State(state): State<AppState>) -> Result<impl IntoResponse, InternalError> {
    let page = Arc::new(Mutex::new(Page::new()));
    create_controller(&state, page.clone()).initialize().await;
    let content = page.lock().await.render(false)?;
    Ok(Html(render_main(content)?))
}

#[derive(Deserialize, Debug)]
struct SearchQuery {
    #[serde(default)]
    city: String,
}

async fn get_search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, InternalError> {
    let page = Arc::new(Mutex::new(Page::new()));
    page.lock()
        .await
        .set_input_value(ElementId::CityInput, &query.city);
    let controller = create_controller(&state, page.clone());
    controller.bind_events().await;
    controller.search_weather(&query.city).await;

    let content = page.lock().await.render(false)?;
    let content = if headers.get("hx-request").is_some() {
        content
    } else {
        render_main(content)?
    };
    Ok(Html(content))
}

/// What htmx sends over the socket when a bound element fires: the values of
/// the included inputs plus the request headers it would have used.
#[derive(Deserialize, Debug)]
struct ClientMessage {
    #[serde(default)]
    city: String,
    key: Option<String>,
    #[serde(rename = "HEADERS", default)]
    headers: HashMap<String, serde_json::Value>,
}

impl ClientMessage {
    fn event(&self) -> Option<UiEvent> {
        let trigger = self.headers.get("HX-Trigger")?.as_str()?;
        let element = ElementId::from_html_id(trigger)?;
        Some(match &self.key {
            Some(key) => UiEvent::KeyPress {
                element,
                key: key.clone(),
            },
            None => UiEvent::Click(element),
        })
    }
}

async fn dashboard_handle_upgrade(
    upgrade: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    log::debug!("Setting up dashboard websocket");
    upgrade.on_upgrade(move |socket| dashboard_handle_websocket(socket, state))
}

async fn dashboard_handle_websocket(mut socket: WebSocket, state: AppState) {
    let (updates, mut pending) = mpsc::unbounded_channel();
    let page = Arc::new(Mutex::new(LivePage::new(updates)));
    let controller = Arc::new(create_controller(&state, page.clone()));
    // The browser already shows the page served over http, only the events
    // need binding here.
    controller.bind_events().await;

    loop {
        tokio::select! {
            update = pending.recv() => {
                let Some(html) = update else {
                    return;
                };
                // No-one is listening anymore.
                if socket.send(Message::Text(html.into())).await.is_err() {
                    return;
                }
            }
            message = socket.recv() => match message {
                Some(Ok(Message::Text(text))) => {
                    let message: ClientMessage = match serde_json::from_str(text.as_str()) {
                        Ok(message) => message,
                        Err(err) => {
                            log::warn!("Ignoring malformed dashboard message: {}", err);
                            continue;
                        }
                    };
                    let Some(event) = message.event() else {
                        log::debug!("Ignoring dashboard message without a known trigger");
                        continue;
                    };
                    page.lock()
                        .await
                        .set_input_value(ElementId::CityInput, &message.city);
                    let Some(input) = controller.search_input(&event).await else {
                        continue;
                    };
                    let controller = controller.clone();
                    tokio::spawn(async move { controller.search_weather(&input).await });
                }
                Some(Ok(Message::Close(_))) | None => return,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    log::debug!("Dashboard websocket closed: {}", err);
                    return;
                }
            }
        }
    }
}
