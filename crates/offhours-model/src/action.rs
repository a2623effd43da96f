use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Requested scheduling action.
///
/// Selects which count tag feeds the desired-count resolution and which
/// default applies when the tag is absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    /// Desired count applied when the count tag is absent or empty.
    pub fn default_count(&self) -> i32 {
        match self {
            Action::Start => 1,
            Action::Stop => 0,
        }
    }

    /// Past-tense effect verb used in summaries ("started" / "stopped").
    pub fn effect(&self) -> &'static str {
        match self {
            Action::Start => "started",
            Action::Stop => "stopped",
        }
    }

    /// Action name as it appears in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Stop => "stop",
        }
    }
}

impl FromStr for Action {
    type Err = ModelError;

    /// Only the exact strings `"start"` and `"stop"` are accepted.
    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "start" => Ok(Action::Start),
            "stop" => Ok(Action::Stop),
            other => Err(ModelError::UnknownAction(other.to_string())),
        }
    }
}
