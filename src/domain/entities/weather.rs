/// Latitude/longitude pair resolved from a city name
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Current conditions at a location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weather {
    pub temp_celsius: f64,
}

impl Weather {
    pub fn new(temp_celsius: f64) -> Self {
        Self { temp_celsius }
    }

    /// Temperature rounded to the nearest whole degree, ties away from zero.
    pub fn rounded_celsius(&self) -> i64 {
        self.temp_celsius.round() as i64
    }
}
