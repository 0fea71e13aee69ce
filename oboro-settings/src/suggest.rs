//! Settings for the suggestion pipeline.

use anyhow::ensure;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use std::time::Duration;

/// Settings that shape how a suggestion is produced.
#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSettings {
    /// How many keywords are drawn from the keyword pool for each request.
    pub keyword_count: usize,

    /// How many times the whole keyword draw is repeated while looking for a
    /// draw without duplicates.
    pub max_sample_attempts: usize,

    /// Resources whose identifier contains this marker are generic search
    /// result pages and never become candidates.
    pub excluded_resource_marker: String,

    /// The longest a single store call may take before it is reported as
    /// unavailable.
    #[serde_as(as = "DurationMilliSeconds")]
    #[serde(rename = "store_timeout_ms")]
    pub store_timeout: Duration,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            keyword_count: 5,
            max_sample_attempts: 10,
            excluded_resource_marker: "www.google.com/search".to_string(),
            store_timeout: Duration::from_secs(10),
        }
    }
}

impl SuggestSettings {
    /// Check that the values can drive the pipeline.
    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.keyword_count > 0, "keyword_count must be at least 1");
        ensure!(
            self.max_sample_attempts > 0,
            "max_sample_attempts must be at least 1"
        );
        ensure!(
            !self.excluded_resource_marker.is_empty(),
            "excluded_resource_marker must not be empty"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SuggestSettings;
    use std::time::Duration;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SuggestSettings::default().validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: SuggestSettings = serde_json::from_value(serde_json::json!({
            "keyword_count": 3,
            "store_timeout_ms": 250,
        }))
        .expect("failed to deserialize");
        assert_eq!(settings.keyword_count, 3);
        assert_eq!(settings.max_sample_attempts, 10);
        assert_eq!(settings.store_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_marker_is_invalid() {
        let settings = SuggestSettings {
            excluded_resource_marker: String::new(),
            ..SuggestSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
