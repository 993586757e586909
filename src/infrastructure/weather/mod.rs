//! OpenWeather client - geocoding and current conditions

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};

use crate::application::errors::LookupError;
use crate::domain::entities::{Coordinates, Weather};
use crate::domain::traits::WeatherProvider;

/// Geocoding API base URL
pub const GEO_API_BASE: &str = "https://api.openweathermap.org/geo/1.0";
/// Current weather API base URL
pub const DATA_API_BASE: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Deserialize)]
struct GeoLocation {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

pub struct OpenWeatherClient {
    api_key: String,
    geo_url: String,
    data_url: String,
    client: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geo_url: GEO_API_BASE.to_string(),
            data_url: DATA_API_BASE.to_string(),
            client: Client::new(),
        }
    }

    pub fn with_base_urls(mut self, geo_url: impl Into<String>, data_url: impl Into<String>) -> Self {
        self.geo_url = geo_url.into().trim_end_matches('/').to_string();
        self.data_url = data_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T, LookupError> {
        let response = self.client
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.without_url().to_string()))?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.without_url().to_string()))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn coordinates(&self, city: &str) -> Result<Coordinates, LookupError> {
        let url = format!("{}/direct", self.geo_url);
        let locations: Vec<GeoLocation> = self
            .get_json(&url, &[("q", city.to_string()), ("limit", "1".to_string())])
            .await?;

        let location = locations
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(city.to_string()))?;

        Ok(Coordinates::new(location.lat, location.lon))
    }

    async fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<Weather, LookupError> {
        let url = format!("{}/weather", self.data_url);
        let current: CurrentWeather = self
            .get_json(
                &url,
                &[
                    ("lat", latitude.to_string()),
                    ("lon", longitude.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        Ok(Weather::new(current.main.temp))
    }
}
