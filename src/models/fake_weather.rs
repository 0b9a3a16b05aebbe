use crate::models::openweathermap::{
    CurrentMain, CurrentWeatherResponse, ForecastItem, ForecastMain, ForecastResponse,
    WeatherEntry, Wind,
};
use crate::models::weather_source::WeatherSource;
use crate::models::weather_types::{CurrentConditions, FORECAST_DAYS, ForecastSet, WeatherError};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

// (summary, icon) pairs the forecast picks from.
pub const FAKE_FORECAST_CONDITIONS: [(&str, &str); 4] = [
    ("Clear", "01d"),
    ("Clouds", "02d"),
    ("Rain", "10d"),
    ("Snow", "13d"),
];

pub struct FakeWeather {
    rng: Mutex<StdRng>,
}

pub fn create(seed: Option<u64>) -> FakeWeather {
    let rng = match seed {
        Some(seed) => {
            log::info!("Creating fake weather source with seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    FakeWeather {
        rng: Mutex::new(rng),
    }
}

pub fn create_current_weather(rng: &mut impl Rng, city: &str) -> CurrentWeatherResponse {
    CurrentWeatherResponse {
        name: city.to_string(),
        main: CurrentMain {
            temp: rng.random_range(5..35) as f64,
            feels_like: rng.random_range(5..35) as f64,
            humidity: rng.random_range(40..80),
            pressure: rng.random_range(1000..1100),
        },
        weather: vec![WeatherEntry {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
            icon: "01d".to_string(),
        }],
        wind: Wind {
            speed: rng.random_range(5..25) as f64,
        },
    }
}

/// One entry per day for the coming `FORECAST_DAYS` days, each at the same
/// time of day as `now`.
pub fn create_forecast(rng: &mut impl Rng, now: DateTime<Utc>) -> ForecastResponse {
    let list = (1..=FORECAST_DAYS as i64)
        .map(|day| {
            let (summary, icon) =
                FAKE_FORECAST_CONDITIONS[rng.random_range(0..FAKE_FORECAST_CONDITIONS.len())];
            ForecastItem {
                dt: (now + Duration::days(day)).timestamp(),
                main: ForecastMain {
                    temp_max: rng.random_range(10..35) as f64,
                    temp_min: rng.random_range(5..20) as f64,
                },
                weather: vec![WeatherEntry {
                    main: summary.to_string(),
                    description: String::new(),
                    icon: icon.to_string(),
                }],
            }
        })
        .collect();
    ForecastResponse { list }
}

#[async_trait]
impl WeatherSource for FakeWeather {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError> {
        let response = {
            let mut rng = self.rng.lock().await;
            create_current_weather(&mut *rng, city)
        };
        log::debug!("Generated current weather for {}", city);
        CurrentConditions::try_from(response)
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSet, WeatherError> {
        let response = {
            let mut rng = self.rng.lock().await;
            create_forecast(&mut *rng, Utc::now())
        };
        log::debug!("Generated forecast for {}", city);
        ForecastSet::try_from(response)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_current_weather_stays_within_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let current = CurrentConditions::try_from(create_current_weather(&mut rng, "Oslo"))
                .expect("Fake weather should always normalize");
            assert_eq!(current.location_name, "Oslo");
            assert!((5.0..35.0).contains(&current.temperature_c));
            assert_eq!(current.temperature_c.fract(), 0.0);
            assert!((5.0..35.0).contains(&current.feels_like_c));
            assert!((40..80).contains(&current.humidity_pct));
            assert!((1000..1100).contains(&current.pressure_hpa));
            assert!((5.0..25.0).contains(&current.wind_speed_ms));
            assert_eq!(current.condition.summary, "Clear");
            assert_eq!(current.condition.description, "clear sky");
            assert_eq!(current.condition.icon_code, "01d");
        }
    }

    #[test]
    fn test_forecast_starts_tomorrow_one_day_apart() {
        let mut rng = StdRng::seed_from_u64(11);
        let now = Utc::now();
        let forecast = ForecastSet::try_from(create_forecast(&mut rng, now)).unwrap();
        assert_eq!(forecast.days().len(), FORECAST_DAYS);
        for (index, day) in forecast.days().iter().enumerate() {
            let expected = now + Duration::days(index as i64 + 1);
            assert_eq!(day.epoch_seconds, expected.timestamp());
        }
    }

    #[test]
    fn test_forecast_values_come_from_fixed_sets() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let forecast = ForecastSet::try_from(create_forecast(&mut rng, Utc::now())).unwrap();
            for day in forecast.days() {
                assert!((10.0..35.0).contains(&day.temp_max_c));
                assert!((5.0..20.0).contains(&day.temp_min_c));
                assert!(FAKE_FORECAST_CONDITIONS.contains(&(
                    day.condition.summary.as_str(),
                    day.condition.icon_code.as_str()
                )));
            }
        }
    }

    #[tokio::test]
    async fn test_same_seed_gives_same_weather() {
        let first = create(Some(42));
        let second = create(Some(42));
        assert_eq!(
            first.fetch_current("Lima").await.unwrap(),
            second.fetch_current("Lima").await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_fetch_forecast_is_relative_to_now() {
        let before = Utc::now();
        let forecast = create(None).fetch_forecast("Lima").await.unwrap();
        let after = Utc::now();
        let first = forecast.days()[0].epoch_seconds;
        assert!(first >= (before + Duration::days(1)).timestamp());
        assert!(first <= (after + Duration::days(1)).timestamp());
    }
}
