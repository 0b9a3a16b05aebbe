use async_trait::async_trait;
use std::sync::Arc;

use crate::models::weather_types::{CurrentConditions, ForecastSet, WeatherError};

/// Where the dashboard gets its weather from. The fake source is the only one
/// wired up today; a networked provider slots in behind the same trait.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch_current(&self, city: &str) -> Result<CurrentConditions, WeatherError>;
    async fn fetch_forecast(&self, city: &str) -> Result<ForecastSet, WeatherError>;
}

pub type WeatherSourceHandle = Arc<dyn WeatherSource>;
