use chrono::{Datelike, NaiveDate};
use common::models::{CurrentConditions, ForecastEntry};
use std::fmt;

const ICON_HOST: &str = "https://openweathermap.org/img/wn";
const MAX_FORECAST_DAYS: usize = 5;

/// View-model for the weather panel.
///
/// Holds exactly what gets displayed: visibility flags for the three
/// panel regions and pre-formatted display strings. Rendering a new
/// result overwrites the previous one wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Panel {
    pub loading_visible: bool,
    pub weather_visible: bool,
    pub error_visible: bool,
    pub current: CurrentView,
    pub forecast: Vec<ForecastCard>,
}

/// Display strings for the current-conditions region
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentView {
    /// "<name>, <country>"
    pub city_header: String,
    pub icon_url: String,
    /// Rounded Celsius with unit, e.g. "18°C"
    pub temperature: String,
    pub description: String,
    /// Percent, as provided
    pub humidity: String,
    /// km/h with one decimal place
    pub wind_speed: String,
    /// Rounded Celsius, no unit
    pub feels_like: String,
    /// hPa, as provided
    pub pressure: String,
}

/// One forecast-day card
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    /// Weekday abbreviation plus day of month, e.g. "Wed 1"
    pub day_label: String,
    pub icon_url: String,
    pub temperature: String,
    /// "<min>° / <max>°"
    pub min_max: String,
    pub description: String,
}

impl Panel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter the loading state: indicator on, both result regions hidden.
    pub fn show_loading(&mut self) {
        self.loading_visible = true;
        self.weather_visible = false;
        self.error_visible = false;
    }

    pub fn hide_loading(&mut self) {
        self.loading_visible = false;
    }

    /// Show the static error region and hide the weather region.
    pub fn show_error(&mut self) {
        self.weather_visible = false;
        self.error_visible = true;
    }

    /// Format current conditions into the weather region and reveal it.
    pub fn show_current(&mut self, data: &CurrentConditions) {
        let (icon, description) = data
            .condition()
            .map(|c| (c.icon.as_str(), c.description.as_str()))
            .unwrap_or_default();

        self.current = CurrentView {
            city_header: format!("{}, {}", data.name, data.sys.country),
            icon_url: format!("{}/{}@2x.png", ICON_HOST, icon),
            temperature: format!("{}°C", data.main.temp.round() as i64),
            description: description.to_string(),
            humidity: data.main.humidity.to_string(),
            // m/s to km/h
            wind_speed: format!("{:.1}", data.wind.speed * 3.6),
            feels_like: (data.main.feels_like.round() as i64).to_string(),
            pressure: data.main.pressure.to_string(),
        };
        self.weather_visible = true;
        self.error_visible = false;
    }

    /// Format the forecast region: one card per calendar date, first entry
    /// per date in encounter order, at most five cards. The input order is
    /// trusted as-is; no sorting is applied.
    pub fn show_forecast(&mut self, entries: &[ForecastEntry]) {
        self.forecast.clear();
        let mut seen_dates: Vec<&str> = Vec::new();

        for entry in entries {
            let date = entry.date();
            if seen_dates.contains(&date) {
                continue;
            }
            seen_dates.push(date);

            let (icon, description) = entry
                .condition()
                .map(|c| (c.icon.as_str(), c.description.as_str()))
                .unwrap_or_default();

            self.forecast.push(ForecastCard {
                day_label: day_label(date),
                icon_url: format!("{}/{}.png", ICON_HOST, icon),
                temperature: format!("{}°C", entry.main.temp.round() as i64),
                min_max: format!(
                    "{}° / {}°",
                    entry.main.temp_min.round() as i64,
                    entry.main.temp_max.round() as i64
                ),
                description: description.to_string(),
            });

            if self.forecast.len() == MAX_FORECAST_DAYS {
                break;
            }
        }
    }
}

/// "Wed 1" style label from a "YYYY-MM-DD" date. Weekday names are the
/// fixed three-letter English abbreviations.
fn day_label(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => format!("{} {}", d.format("%a"), d.day()),
        Err(_) => date.to_string(),
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.loading_visible {
            writeln!(f, "Loading...")?;
        }
        if self.error_visible {
            writeln!(f, "City not found. Please check the spelling and try again.")?;
        }
        if self.weather_visible {
            let c = &self.current;
            writeln!(f, "{}", c.city_header)?;
            writeln!(f, "{}  {}", c.temperature, c.description)?;
            writeln!(
                f,
                "Feels like {}°C | Humidity {}% | Wind {} km/h | Pressure {} hPa",
                c.feels_like, c.humidity, c.wind_speed, c.pressure
            )?;
            if !self.forecast.is_empty() {
                writeln!(f)?;
                writeln!(f, "Forecast:")?;
                for card in &self.forecast {
                    writeln!(
                        f,
                        "  {:<7} {:>5}  {:<11} {}",
                        card.day_label, card.temperature, card.min_max, card.description
                    )?;
                }
            }
        }
        Ok(())
    }
}
