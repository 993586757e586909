use async_trait::async_trait;
use crate::domain::entities::{Coordinates, Weather};
use crate::application::errors::LookupError;

/// Weather provider - geocoding and current conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn coordinates(&self, city: &str) -> Result<Coordinates, LookupError>;
    async fn current_temperature(&self, latitude: f64, longitude: f64) -> Result<Weather, LookupError>;
}
