use crate::core::Direction;
use serde::Deserialize;

/// Settings for the inventory service.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Upper bound on the collection size passed to sort/search. `None` (the
    /// default) sorts whatever the store returns.
    ///
    /// The fixed-pivot sort is quadratic on ordered input; set a limit to
    /// refuse large collections instead of sorting them.
    pub max_records: Option<usize>,
    /// Direction used when a sort request names none.
    pub default_direction: Direction,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_records: None,
            default_direction: Direction::Ascending,
        }
    }
}

impl ServiceConfig {
    /// Removes the collection size limit.
    pub fn unbounded(mut self) -> Self {
        self.max_records = None;
        self
    }

    pub fn with_max_records(mut self, limit: usize) -> Self {
        self.max_records = Some(limit);
        self
    }

    pub fn with_default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = direction;
        self
    }

    /// Parses a JSON configuration document. Missing keys keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
