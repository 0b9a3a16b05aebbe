pub mod controller;
pub mod page;
pub mod renderer;

/// Named elements of the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    SearchButton,
    CityInput,
    CityName,
    CurrentDate,
    CurrentTemp,
    WeatherDescription,
    FeelsLike,
    Humidity,
    WindSpeed,
    Pressure,
    WeatherIcon,
    ForecastContainer,
    Loading,
    Error,
    ErrorMessage,
    WeatherData,
}

impl ElementId {
    pub const COUNT: usize = 16;

    pub const ALL: [ElementId; ElementId::COUNT] = [
        ElementId::SearchButton,
        ElementId::CityInput,
        ElementId::CityName,
        ElementId::CurrentDate,
        ElementId::CurrentTemp,
        ElementId::WeatherDescription,
        ElementId::FeelsLike,
        ElementId::Humidity,
        ElementId::WindSpeed,
        ElementId::Pressure,
        ElementId::WeatherIcon,
        ElementId::ForecastContainer,
        ElementId::Loading,
        ElementId::Error,
        ElementId::ErrorMessage,
        ElementId::WeatherData,
    ];

    /// The `id` attribute used in the html.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::SearchButton => "searchBtn",
            ElementId::CityInput => "cityInput",
            ElementId::CityName => "cityName",
            ElementId::CurrentDate => "currentDate",
            ElementId::CurrentTemp => "currentTemp",
            ElementId::WeatherDescription => "weatherDescription",
            ElementId::FeelsLike => "feelsLike",
            ElementId::Humidity => "humidity",
            ElementId::WindSpeed => "windSpeed",
            ElementId::Pressure => "pressure",
            ElementId::WeatherIcon => "weatherIcon",
            ElementId::ForecastContainer => "forecastContainer",
            ElementId::Loading => "loading",
            ElementId::Error => "error",
            ElementId::ErrorMessage => "errorMessage",
            ElementId::WeatherData => "weatherData",
        }
    }

    pub fn from_html_id(id: &str) -> Option<ElementId> {
        ElementId::ALL
            .into_iter()
            .find(|element| element.as_str() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyPress,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Click(ElementId),
    KeyPress { element: ElementId, key: String },
}

/// One rendered day in the forecast container.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub day: String,
    pub icon_url: String,
    pub summary: String,
    pub high: String,
    pub low: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SetText {
        element: ElementId,
        text: String,
    },
    SetAttribute {
        element: ElementId,
        name: &'static str,
        value: String,
    },
    SetHidden {
        element: ElementId,
        hidden: bool,
    },
    ReplaceChildren {
        element: ElementId,
        children: Vec<ForecastEntry>,
    },
}

/// The page the controller draws on.
pub trait Surface: Send {
    fn subscribe(&mut self, element: ElementId, event: EventKind);
    fn input_value(&self, element: ElementId) -> String;
    fn apply(&mut self, mutations: &[Mutation]);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_html_ids_map_back_to_elements() {
        for element in ElementId::ALL {
            assert_eq!(ElementId::from_html_id(element.as_str()), Some(element));
        }
        assert_eq!(ElementId::from_html_id("nope"), None);
    }
}
