//! Validator configuration.

use serde::{Deserialize, Serialize};

/// Limits applied when validating a candidate assignment.
///
/// Deserializes from a partial JSON object; missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Shortest allowed shift, inclusive (minutes).
    pub min_duration_minutes: i64,
    /// Longest allowed task description (characters).
    pub max_task_len: usize,
    /// Longest allowed notes (characters).
    pub max_notes_len: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            min_duration_minutes: 30,
            max_task_len: 200,
            max_notes_len: 1000,
        }
    }
}

impl ValidatorConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Sets the minimum shift length.
    pub fn with_min_duration_minutes(mut self, minutes: i64) -> Self {
        self.min_duration_minutes = minutes;
        self
    }

    /// Sets the task length bound.
    pub fn with_max_task_len(mut self, len: usize) -> Self {
        self.max_task_len = len;
        self
    }

    /// Sets the notes length bound.
    pub fn with_max_notes_len(mut self, len: usize) -> Self {
        self.max_notes_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = ValidatorConfig::default();
        assert_eq!(c.min_duration_minutes, 30);
        assert_eq!(c.max_task_len, 200);
        assert_eq!(c.max_notes_len, 1000);
    }

    #[test]
    fn test_partial_json() {
        let c = ValidatorConfig::from_json_str(r#"{ "min_duration_minutes": 60 }"#).unwrap();
        assert_eq!(c.min_duration_minutes, 60);
        assert_eq!(c.max_task_len, 200);

        let c = ValidatorConfig::from_json_str("{}").unwrap();
        assert_eq!(c, ValidatorConfig::default());
    }

    #[test]
    fn test_builder() {
        let c = ValidatorConfig::default()
            .with_min_duration_minutes(15)
            .with_max_task_len(50)
            .with_max_notes_len(10);
        assert_eq!(c.min_duration_minutes, 15);
        assert_eq!(c.max_task_len, 50);
        assert_eq!(c.max_notes_len, 10);
    }
}
