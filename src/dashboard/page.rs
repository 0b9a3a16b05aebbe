use askama::Template;
use std::collections::BTreeMap;
use tokio::sync::mpsc::UnboundedSender;

use crate::dashboard::{ElementId, EventKind, ForecastEntry, Mutation, Surface};

#[derive(Debug, Clone, Default)]
pub struct Element {
    pub text: String,
    pub value: String,
    pub hidden: bool,
    pub attributes: BTreeMap<&'static str, String>,
    pub children: Vec<ForecastEntry>,
    pub events: Vec<EventKind>,
}

/// In-memory version of the dashboard's DOM. The server renders it to html
/// after the controller is done with it.
#[derive(Debug, Clone)]
pub struct Page {
    elements: [Element; ElementId::COUNT],
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    page: &'a Page,
    oob: bool,
}

impl Page {
    /// A page as it looks before anything has been fetched: the loading
    /// region is the one showing.
    pub fn new() -> Page {
        let mut page = Page {
            elements: std::array::from_fn(|_| Element::default()),
        };
        page.element_mut(ElementId::Error).hidden = true;
        page.element_mut(ElementId::WeatherData).hidden = true;
        page
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id as usize]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id as usize]
    }

    pub fn set_input_value(&mut self, id: ElementId, value: &str) {
        self.element_mut(id).value = value.to_string();
    }

    pub fn visible_regions(&self) -> Vec<ElementId> {
        [ElementId::Loading, ElementId::Error, ElementId::WeatherData]
            .into_iter()
            .filter(|region| !self.element(*region).hidden)
            .collect()
    }

    /// Renders the dashboard fragment. With `oob` set the fragment replaces
    /// the dashboard already on the page (htmx out of band swap).
    pub fn render(&self, oob: bool) -> Result<String, askama::Error> {
        DashboardTemplate { page: self, oob }.render()
    }

    // Lookups by html id, used from the template.

    fn by_html_id(&self, id: &str) -> Option<&Element> {
        ElementId::from_html_id(id).map(|element| self.element(element))
    }

    pub fn text(&self, id: &str) -> &str {
        self.by_html_id(id)
            .map(|element| element.text.as_str())
            .unwrap_or_default()
    }

    pub fn value(&self, id: &str) -> &str {
        self.by_html_id(id)
            .map(|element| element.value.as_str())
            .unwrap_or_default()
    }

    pub fn attribute(&self, id: &str, name: &str) -> &str {
        self.by_html_id(id)
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn hidden_class(&self, id: &str) -> &'static str {
        match self.by_html_id(id) {
            Some(element) if element.hidden => "hidden",
            _ => "",
        }
    }

    pub fn forecast(&self) -> &[ForecastEntry] {
        &self.element(ElementId::ForecastContainer).children
    }

    /// htmx attributes that forward the element's subscribed events over the
    /// websocket.
    pub fn bindings(&self, id: &str) -> String {
        let Some(element) = self.by_html_id(id) else {
            return String::new();
        };
        element
            .events
            .iter()
            .map(|event| match event {
                EventKind::Click => {
                    r##"ws-send hx-trigger="click" hx-include="#cityInput""##.to_string()
                }
                EventKind::KeyPress => {
                    r#"ws-send hx-trigger="keyup[key=='Enter']" hx-vals='js:{key: event.key}'"#
                        .to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}

impl Surface for Page {
    fn subscribe(&mut self, element: ElementId, event: EventKind) {
        let events = &mut self.element_mut(element).events;
        if !events.contains(&event) {
            events.push(event);
        }
    }

    fn input_value(&self, element: ElementId) -> String {
        self.element(element).value.clone()
    }

    fn apply(&mut self, mutations: &[Mutation]) {
        for mutation in mutations {
            match mutation {
                Mutation::SetText { element, text } => {
                    self.element_mut(*element).text = text.clone();
                }
                Mutation::SetAttribute {
                    element,
                    name,
                    value,
                } => {
                    self.element_mut(*element)
                        .attributes
                        .insert(*name, value.clone());
                }
                Mutation::SetHidden { element, hidden } => {
                    self.element_mut(*element).hidden = *hidden;
                }
                Mutation::ReplaceChildren { element, children } => {
                    self.element_mut(*element).children = children.clone();
                }
            }
        }
    }
}

/// A page connected to a browser. Every applied batch of mutations is
/// rendered and pushed to `updates`.
pub struct LivePage {
    page: Page,
    updates: UnboundedSender<String>,
}

impl LivePage {
    pub fn new(updates: UnboundedSender<String>) -> LivePage {
        LivePage {
            page: Page::new(),
            updates,
        }
    }

    pub fn set_input_value(&mut self, id: ElementId, value: &str) {
        self.page.set_input_value(id, value);
    }
}

impl Surface for LivePage {
    fn subscribe(&mut self, element: ElementId, event: EventKind) {
        self.page.subscribe(element, event);
    }

    fn input_value(&self, element: ElementId) -> String {
        self.page.input_value(element)
    }

    fn apply(&mut self, mutations: &[Mutation]) {
        self.page.apply(mutations);
        match self.page.render(true) {
            Ok(html) => {
                if self.updates.send(html).is_err() {
                    log::debug!("Dropping dashboard update, connection is gone");
                }
            }
            Err(err) => log::error!("Failed to render dashboard: {}", err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_new_page_shows_loading() {
        let page = Page::new();
        assert_eq!(page.visible_regions(), vec![ElementId::Loading]);
    }

    #[test]
    fn test_apply_updates_elements() {
        let mut page = Page::new();
        page.apply(&[
            Mutation::SetText {
                element: ElementId::CityName,
                text: "Quito".to_string(),
            },
            Mutation::SetAttribute {
                element: ElementId::WeatherIcon,
                name: "src",
                value: "icon.png".to_string(),
            },
            Mutation::SetHidden {
                element: ElementId::Loading,
                hidden: true,
            },
        ]);
        assert_eq!(page.text("cityName"), "Quito");
        assert_eq!(page.attribute("weatherIcon", "src"), "icon.png");
        assert_eq!(page.hidden_class("loading"), "hidden");
        assert_eq!(page.text("unknownId"), "");
    }

    #[test]
    fn test_subscribing_twice_binds_once() {
        let mut page = Page::new();
        page.subscribe(ElementId::SearchButton, EventKind::Click);
        page.subscribe(ElementId::SearchButton, EventKind::Click);
        assert_eq!(
            page.element(ElementId::SearchButton).events,
            vec![EventKind::Click]
        );
    }

    #[test]
    fn test_rendered_page_carries_bindings_and_visibility() {
        let mut page = Page::new();
        page.subscribe(ElementId::SearchButton, EventKind::Click);
        page.subscribe(ElementId::CityInput, EventKind::KeyPress);
        page.set_input_value(ElementId::CityInput, "Bergen");
        let html = page.render(false).unwrap();
        assert!(html.contains(r#"hx-trigger="click""#));
        assert!(html.contains("keyup[key=='Enter']"));
        assert!(html.contains(r#"value="Bergen""#));
        assert!(html.contains(r#"id="error" class="hidden""#));
        assert!(!html.contains("hx-swap-oob"));
        assert!(page.render(true).unwrap().contains("hx-swap-oob"));
    }

    #[test]
    fn test_live_page_pushes_each_batch() {
        let (sender, mut receiver) = mpsc::unbounded_channel();
        let mut page = LivePage::new(sender);
        page.apply(&[Mutation::SetText {
            element: ElementId::ErrorMessage,
            text: "first".to_string(),
        }]);
        page.apply(&[Mutation::SetText {
            element: ElementId::ErrorMessage,
            text: "second".to_string(),
        }]);
        assert!(receiver.try_recv().unwrap().contains("first"));
        assert!(receiver.try_recv().unwrap().contains("second"));
        assert!(receiver.try_recv().is_err());
    }
}
