//! Search configuration.

/// Configuration parameters for station search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum number of characters (after trimming) before a search runs.
    /// Shorter input would match almost every station.
    pub min_query_chars: usize,

    /// Maximum number of stations displayed unless "show all" is requested.
    pub page_limit: usize,

    /// Radius for the postcode fallback search (kilometres).
    pub radius_km: f64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(min_query_chars: usize, page_limit: usize, radius_km: f64) -> Self {
        Self {
            min_query_chars,
            page_limit,
            radius_km,
        }
    }

    /// Set the page limit.
    pub fn with_page_limit(mut self, page_limit: usize) -> Self {
        self.page_limit = page_limit;
        self
    }

    /// Set the fallback search radius.
    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_chars: 2,
            page_limit: 20,
            radius_km: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SearchConfig::default();

        assert_eq!(config.min_query_chars, 2);
        assert_eq!(config.page_limit, 20);
        assert_eq!(config.radius_km, 10.0);
    }

    #[test]
    fn custom_config() {
        let config = SearchConfig::new(3, 50, 5.0);

        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.page_limit, 50);
        assert_eq!(config.radius_km, 5.0);
    }

    #[test]
    fn builders() {
        let config = SearchConfig::default()
            .with_page_limit(10)
            .with_radius_km(25.0);

        assert_eq!(config.page_limit, 10);
        assert_eq!(config.radius_km, 25.0);
    }
}
