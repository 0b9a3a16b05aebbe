use chrono::{DateTime, Utc};

use crate::dashboard::{ElementId, ForecastEntry, Mutation};
use crate::models::weather_types::{CurrentConditions, DisplayState, ForecastDay, ForecastSet};

pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";
pub const MS_TO_KMH: f64 = 3.6;

const REGIONS: [ElementId; 3] = [ElementId::Loading, ElementId::Error, ElementId::WeatherData];

pub fn large_icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}@2x.png")
}

pub fn small_icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}.png")
}

/// Rounds to the nearest integer with halves going up, the way browsers do.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Everything that has to change on the page to show `state`. `now` is the
/// date shown next to the city name.
pub fn render(state: &DisplayState, now: DateTime<Utc>) -> Vec<Mutation> {
    match state {
        DisplayState::Loading => show_only(ElementId::Loading),
        DisplayState::Error(message) => {
            let mut mutations = vec![Mutation::SetText {
                element: ElementId::ErrorMessage,
                text: format!("❌ {message}"),
            }];
            mutations.extend(show_only(ElementId::Error));
            mutations
        }
        DisplayState::Loaded(current, forecast) => {
            let mut mutations = render_current(current, now);
            mutations.push(render_forecast(forecast));
            mutations.extend(show_only(ElementId::WeatherData));
            mutations
        }
    }
}

fn show_only(visible: ElementId) -> Vec<Mutation> {
    REGIONS
        .into_iter()
        .map(|element| Mutation::SetHidden {
            element,
            hidden: element != visible,
        })
        .collect()
}

fn text(element: ElementId, text: String) -> Mutation {
    Mutation::SetText { element, text }
}

fn render_current(current: &CurrentConditions, now: DateTime<Utc>) -> Vec<Mutation> {
    vec![
        text(ElementId::CityName, current.location_name.clone()),
        text(
            ElementId::CurrentDate,
            now.format("%A, %B %-d, %Y").to_string(),
        ),
        text(
            ElementId::CurrentTemp,
            format!("{}°C", round_half_up(current.temperature_c)),
        ),
        text(
            ElementId::WeatherDescription,
            current.condition.description.clone(),
        ),
        text(
            ElementId::FeelsLike,
            format!("{}°C", round_half_up(current.feels_like_c)),
        ),
        text(ElementId::Humidity, format!("{}%", current.humidity_pct)),
        text(
            ElementId::WindSpeed,
            format!("{} km/h", round_half_up(current.wind_speed_ms * MS_TO_KMH)),
        ),
        text(ElementId::Pressure, format!("{} hPa", current.pressure_hpa)),
        Mutation::SetAttribute {
            element: ElementId::WeatherIcon,
            name: "src",
            value: large_icon_url(&current.condition.icon_code),
        },
        Mutation::SetAttribute {
            element: ElementId::WeatherIcon,
            name: "alt",
            value: current.condition.description.clone(),
        },
    ]
}

fn render_forecast(forecast: &ForecastSet) -> Mutation {
    Mutation::ReplaceChildren {
        element: ElementId::ForecastContainer,
        children: forecast.days().iter().map(forecast_entry).collect(),
    }
}

fn forecast_entry(day: &ForecastDay) -> ForecastEntry {
    let label = match DateTime::from_timestamp(day.epoch_seconds, 0) {
        Some(date) => date.format("%a").to_string(),
        None => String::new(),
    };
    ForecastEntry {
        day: label,
        icon_url: small_icon_url(&day.condition.icon_code),
        summary: day.condition.summary.clone(),
        high: format!("{}°", round_half_up(day.temp_max_c)),
        low: format!("{}°", round_half_up(day.temp_min_c)),
    }
}
