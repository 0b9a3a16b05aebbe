// Records shaped like the OpenWeatherMap 2.5 `weather` and `forecast`
// responses, and their conversion into the dashboard's own types.
use serde::{Deserialize, Serialize};

use crate::models::weather_types::{
    Condition, CurrentConditions, ForecastCondition, ForecastDay, ForecastSet, WeatherError,
};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WeatherEntry {
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrentWeatherResponse {
    pub name: String,
    pub main: CurrentMain,
    pub weather: Vec<WeatherEntry>,
    pub wind: Wind,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForecastMain {
    pub temp_max: f64,
    pub temp_min: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForecastItem {
    pub dt: i64,
    pub main: ForecastMain,
    pub weather: Vec<WeatherEntry>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

impl TryFrom<CurrentWeatherResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(response: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        // Only the first entry is the primary condition.
        let weather = response
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingCondition)?;
        Ok(CurrentConditions {
            location_name: response.name,
            temperature_c: response.main.temp,
            feels_like_c: response.main.feels_like,
            humidity_pct: response.main.humidity.min(100),
            pressure_hpa: response.main.pressure,
            wind_speed_ms: response.wind.speed,
            condition: Condition {
                summary: weather.main,
                description: weather.description,
                icon_code: weather.icon,
            },
        })
    }
}

impl TryFrom<ForecastItem> for ForecastDay {
    type Error = WeatherError;

    fn try_from(item: ForecastItem) -> Result<Self, Self::Error> {
        let weather = item
            .weather
            .into_iter()
            .next()
            .ok_or(WeatherError::MissingCondition)?;
        Ok(ForecastDay {
            epoch_seconds: item.dt,
            temp_max_c: item.main.temp_max,
            temp_min_c: item.main.temp_min,
            condition: ForecastCondition {
                summary: weather.main,
                icon_code: weather.icon,
            },
        })
    }
}

impl TryFrom<ForecastResponse> for ForecastSet {
    type Error = WeatherError;

    fn try_from(response: ForecastResponse) -> Result<Self, Self::Error> {
        let days = response
            .list
            .into_iter()
            .map(ForecastDay::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        ForecastSet::try_from(days)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CURRENT_JSON: &str = r#"{
        "name": "Paris",
        "main": {"temp": 21.6, "feels_like": 20.2, "humidity": 55, "pressure": 1013},
        "weather": [
            {"main": "Clouds", "description": "broken clouds", "icon": "04d"},
            {"main": "Mist", "description": "mist", "icon": "50d"}
        ],
        "wind": {"speed": 4.1}
    }"#;

    fn forecast_item(dt: i64) -> serde_json::Value {
        serde_json::json!({
            "dt": dt,
            "main": {"temp_max": 18.0, "temp_min": 9.5},
            "weather": [{"main": "Rain", "icon": "10d"}]
        })
    }

    #[test]
    fn test_current_response_is_normalized() {
        let response: CurrentWeatherResponse = serde_json::from_str(CURRENT_JSON).unwrap();
        let current = CurrentConditions::try_from(response).unwrap();
        assert_eq!(current.location_name, "Paris");
        assert_eq!(current.temperature_c, 21.6);
        assert_eq!(current.feels_like_c, 20.2);
        assert_eq!(current.humidity_pct, 55);
        assert_eq!(current.pressure_hpa, 1013);
        assert_eq!(current.wind_speed_ms, 4.1);
        assert_eq!(
            current.condition,
            Condition {
                summary: "Clouds".to_string(),
                description: "broken clouds".to_string(),
                icon_code: "04d".to_string(),
            }
        );
    }

    #[test]
    fn test_current_response_without_condition_fails() {
        let mut response: CurrentWeatherResponse = serde_json::from_str(CURRENT_JSON).unwrap();
        response.weather.clear();
        assert_eq!(
            CurrentConditions::try_from(response),
            Err(WeatherError::MissingCondition)
        );
    }

    #[test]
    fn test_forecast_response_is_normalized() {
        let list: Vec<_> = (1..=5)
            .map(|n| forecast_item(1_700_000_000 + n * 86_400))
            .collect();
        let json = serde_json::json!({ "list": list });
        let response: ForecastResponse = serde_json::from_value(json).unwrap();
        let forecast = ForecastSet::try_from(response).unwrap();
        assert_eq!(forecast.days().len(), 5);
        let first = &forecast.days()[0];
        assert_eq!(first.epoch_seconds, 1_700_086_400);
        assert_eq!(first.temp_max_c, 18.0);
        assert_eq!(first.temp_min_c, 9.5);
        assert_eq!(first.condition.summary, "Rain");
        assert_eq!(first.condition.icon_code, "10d");
    }

    #[test]
    fn test_forecast_response_with_too_many_entries_fails() {
        let list: Vec<_> = (1..=8).map(|n| forecast_item(n * 10_800)).collect();
        let json = serde_json::json!({ "list": list });
        let response: ForecastResponse = serde_json::from_value(json).unwrap();
        assert_eq!(
            ForecastSet::try_from(response),
            Err(WeatherError::ForecastLength(8))
        );
    }
}
