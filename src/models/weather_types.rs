use thiserror::Error;

/// Number of days covered by a forecast.
pub const FORECAST_DAYS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub summary: String,
    pub description: String,
    pub icon_code: String,
}

/// Snapshot of the present weather at one location.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: i32,
    pub wind_speed_ms: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCondition {
    pub summary: String,
    pub icon_code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDay {
    pub epoch_seconds: i64,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub condition: ForecastCondition,
}

/// Exactly `FORECAST_DAYS` forecast days in strictly increasing time order.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSet {
    days: Vec<ForecastDay>,
}

impl ForecastSet {
    pub fn days(&self) -> &[ForecastDay] {
        &self.days
    }
}

impl TryFrom<Vec<ForecastDay>> for ForecastSet {
    type Error = WeatherError;

    fn try_from(days: Vec<ForecastDay>) -> Result<Self, Self::Error> {
        if days.len() != FORECAST_DAYS {
            return Err(WeatherError::ForecastLength(days.len()));
        }
        if days
            .windows(2)
            .any(|pair| pair[0].epoch_seconds >= pair[1].epoch_seconds)
        {
            return Err(WeatherError::ForecastOrder);
        }
        Ok(ForecastSet { days })
    }
}

/// What the dashboard is currently showing. Exactly one region is visible
/// for each variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Loading,
    Error(String),
    Loaded(CurrentConditions, ForecastSet),
}

#[derive(Debug, Error, PartialEq)]
pub enum WeatherError {
    #[error("weather record has no condition entry")]
    MissingCondition,
    #[error("expected five forecast days, got {0}")]
    ForecastLength(usize),
    #[error("forecast days are not in increasing time order")]
    ForecastOrder,
}

#[cfg(test)]
mod test {
    use super::*;

    fn day(epoch_seconds: i64) -> ForecastDay {
        ForecastDay {
            epoch_seconds,
            temp_max_c: 20.0,
            temp_min_c: 10.0,
            condition: ForecastCondition {
                summary: "Rain".to_string(),
                icon_code: "10d".to_string(),
            },
        }
    }

    #[test]
    fn test_forecast_set_accepts_five_increasing_days() {
        let days: Vec<_> = (1..=5).map(|n| day(n * 86_400)).collect();
        let forecast = ForecastSet::try_from(days.clone()).unwrap();
        assert_eq!(forecast.days(), days.as_slice());
    }

    #[test]
    fn test_forecast_set_rejects_wrong_length() {
        let days: Vec<_> = (1..=4).map(|n| day(n * 86_400)).collect();
        assert_eq!(
            ForecastSet::try_from(days),
            Err(WeatherError::ForecastLength(4))
        );
        assert_eq!(
            ForecastSet::try_from(Vec::new()),
            Err(WeatherError::ForecastLength(0))
        );
    }

    #[test]
    fn test_forecast_set_rejects_unordered_days() {
        let days = vec![day(1), day(2), day(2), day(3), day(4)];
        assert_eq!(ForecastSet::try_from(days), Err(WeatherError::ForecastOrder));
        let days = vec![day(5), day(4), day(3), day(2), day(1)];
        assert_eq!(ForecastSet::try_from(days), Err(WeatherError::ForecastOrder));
    }
}
