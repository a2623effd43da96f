use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Scheduling strategy of a service as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SchedulingStrategy {
    /// Arbitrary number of replicas placed across available capacity.
    Replicated,
    /// Exactly one replica per container host.
    Daemon,
}

impl SchedulingStrategy {
    /// Returns `true` for strategies whose desired count may be adjusted.
    pub fn is_replicated(&self) -> bool {
        matches!(self, SchedulingStrategy::Replicated)
    }
}

impl FromStr for SchedulingStrategy {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replicated" => Ok(SchedulingStrategy::Replicated),
            "daemon" => Ok(SchedulingStrategy::Daemon),
            other => Err(ModelError::UnknownScheduling(other.to_string())),
        }
    }
}
