use chrono::{DateTime, Utc};

/// A bot user, keyed by the transport account ID
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub city: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
impl User {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            city: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Stored city, empty when not set
    pub fn city(&self) -> &str {
        self.city.as_deref().unwrap_or("")
    }
}
