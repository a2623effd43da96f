use async_trait::async_trait;

use offhours_model::ActionResponse;

use crate::error::ApiError;

/// Scheduling trigger API handler.
///
/// This trait abstracts the backend implementation, allowing users to:
/// - Use the provided `SchedulerAdapter`
/// - Implement custom handlers with additional logic (auth, rate limiting, etc.)
#[async_trait]
pub trait ActionApiHandler: Send + Sync + 'static {
    /// Run one scheduling pass for the given action string.
    ///
    /// An invalid action yields an `Ok` response with a 400 status in its
    /// body; `Err` is reserved for fatal discovery failures.
    async fn run_action(&self, action: &str) -> Result<ActionResponse, ApiError>;
}
