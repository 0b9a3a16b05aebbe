use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

use crate::dashboard::renderer::render;
use crate::dashboard::{ElementId, EventKind, Surface, UiEvent};
use crate::models::weather_source::WeatherSourceHandle;
use crate::models::weather_types::{DisplayState, WeatherError};

pub const DEFAULT_CITY: &str = "London";
pub const EMPTY_CITY_MESSAGE: &str = "Please enter a city name";
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch weather data. Please try again.";

/// Drives one page: listens to its search events, fetches the weather and
/// draws the result.
///
/// Searches are numbered as they start. Only the newest search may draw its
/// result, so a slow search can't overwrite the answer to a later one.
pub struct DashboardController<P: Surface> {
    source: WeatherSourceHandle,
    page: Arc<Mutex<P>>,
    default_city: String,
    latest_search: AtomicU64,
}

impl<P: Surface> DashboardController<P> {
    pub fn new(source: WeatherSourceHandle, page: Arc<Mutex<P>>, default_city: String) -> Self {
        DashboardController {
            source,
            page,
            default_city,
            latest_search: AtomicU64::new(0),
        }
    }

    /// Binds the search events and loads the default city.
    pub async fn initialize(&self) {
        self.bind_events().await;
        log::debug!("Loading default city {}", self.default_city);
        self.acquire_weather(&self.default_city).await;
    }

    pub async fn bind_events(&self) {
        let mut page = self.page.lock().await;
        page.subscribe(ElementId::SearchButton, EventKind::Click);
        page.subscribe(ElementId::CityInput, EventKind::KeyPress);
    }

    /// The city input as it is when `event` fires, or `None` if the event
    /// doesn't start a search.
    pub async fn search_input(&self, event: &UiEvent) -> Option<String> {
        match event {
            UiEvent::Click(ElementId::SearchButton) => {}
            UiEvent::KeyPress {
                element: ElementId::CityInput,
                key,
            } if key == "Enter" => {}
            event => {
                log::trace!("Ignoring event {:?}", event);
                return None;
            }
        }
        Some(self.page.lock().await.input_value(ElementId::CityInput))
    }

    pub async fn search_weather(&self, raw_input: &str) {
        let city = raw_input.trim();
        if city.is_empty() {
            let search = self.start_search();
            self.show(search, &DisplayState::Error(EMPTY_CITY_MESSAGE.to_string()))
                .await;
            return;
        }
        self.acquire_weather(city).await;
    }

    pub async fn acquire_weather(&self, city: &str) {
        let search = self.start_search();
        self.show(search, &DisplayState::Loading).await;

        let state = match self.fetch(city).await {
            Ok(state) => state,
            Err(err) => {
                log::warn!("Failed to fetch weather for {}: {}", city, err);
                DisplayState::Error(FETCH_FAILED_MESSAGE.to_string())
            }
        };
        self.show(search, &state).await;
    }

    async fn fetch(&self, city: &str) -> Result<DisplayState, WeatherError> {
        let (current, forecast) = tokio::try_join!(
            self.source.fetch_current(city),
            self.source.fetch_forecast(city)
        )?;
        Ok(DisplayState::Loaded(current, forecast))
    }

    fn start_search(&self) -> u64 {
        self.latest_search.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn show(&self, search: u64, state: &DisplayState) {
        let mutations = render(state, Utc::now());
        let mut page = self.page.lock().await;
        // Checked under the page lock so a newer search can't slip in between.
        if self.latest_search.load(Ordering::SeqCst) != search {
            log::debug!("Discarding result of superseded search {}", search);
            return;
        }
        page.apply(&mutations);
    }
}
