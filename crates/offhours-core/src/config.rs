use std::time::Duration;

use offhours_model::{
    Action, DEFAULT_CLUSTER_TAG, DEFAULT_SERVICE_TAG, TAG_STARTING_COUNT, TAG_STOPPING_COUNT,
};

/// Explicit per-run configuration.
///
/// Constructed once at process start and passed into the scheduler; there
/// are no process-wide singletons.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Marker tag key qualifying clusters (value ignored).
    pub cluster_tag_key: String,
    /// Marker tag key qualifying services (value ignored).
    pub service_tag_key: String,
    /// Tag key read for the desired count on `start`.
    pub start_count_key: String,
    /// Tag key read for the desired count on `stop`.
    pub stop_count_key: String,
    /// Retry attempts for cluster listing.
    pub list_attempts: usize,
    /// Retry attempts for every other remote call.
    pub call_attempts: usize,
    /// Fixed delay between retry attempts.
    pub retry_delay: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            cluster_tag_key: DEFAULT_CLUSTER_TAG.to_string(),
            service_tag_key: DEFAULT_SERVICE_TAG.to_string(),
            start_count_key: TAG_STARTING_COUNT.to_string(),
            stop_count_key: TAG_STOPPING_COUNT.to_string(),
            list_attempts: 3,
            call_attempts: 10,
            retry_delay: Duration::from_secs(5),
        }
    }
}

impl RunConfig {
    /// Build a config from `OFFHOURS_*` environment variables, falling back
    /// to the defaults for anything unset.
    ///
    /// Recognized variables: `OFFHOURS_CLUSTER_TAG`, `OFFHOURS_SERVICE_TAG`,
    /// `OFFHOURS_START_COUNT_TAG`, `OFFHOURS_STOP_COUNT_TAG`,
    /// `OFFHOURS_RETRY_DELAY_MS`.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("OFFHOURS_CLUSTER_TAG") {
            cfg.cluster_tag_key = v;
        }
        if let Ok(v) = std::env::var("OFFHOURS_SERVICE_TAG") {
            cfg.service_tag_key = v;
        }
        if let Ok(v) = std::env::var("OFFHOURS_START_COUNT_TAG") {
            cfg.start_count_key = v;
        }
        if let Ok(v) = std::env::var("OFFHOURS_STOP_COUNT_TAG") {
            cfg.stop_count_key = v;
        }
        if let Ok(v) = std::env::var("OFFHOURS_RETRY_DELAY_MS")
            && let Ok(ms) = v.parse::<u64>()
        {
            cfg.retry_delay = Duration::from_millis(ms);
        }
        cfg
    }

    /// Count tag key read for the given action.
    pub fn count_tag_key(&self, action: Action) -> &str {
        match action {
            Action::Start => &self.start_count_key,
            Action::Stop => &self.stop_count_key,
        }
    }
}
