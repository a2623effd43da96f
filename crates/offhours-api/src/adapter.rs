use std::sync::Arc;

use async_trait::async_trait;

use offhours_core::Scheduler;
use offhours_model::ActionResponse;

use crate::error::ApiError;
use crate::handler::ActionApiHandler;

/// Adapter that bridges [`Scheduler`] to [`ActionApiHandler`].
///
/// This is a ready-to-use implementation that directly delegates to the
/// scheduler.
pub struct SchedulerAdapter {
    scheduler: Arc<Scheduler>,
}

impl SchedulerAdapter {
    /// Create a new adapter wrapping the given scheduler.
    pub fn new(scheduler: Arc<Scheduler>) -> Self {
        Self { scheduler }
    }
}

#[async_trait]
impl ActionApiHandler for SchedulerAdapter {
    async fn run_action(&self, action: &str) -> Result<ActionResponse, ApiError> {
        self.scheduler
            .run(action)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))
    }
}
