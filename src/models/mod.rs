pub mod fake_weather;
pub mod openweathermap;
pub mod weather_source;
pub mod weather_types;
