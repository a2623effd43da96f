use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use offhours_model::ActionRequest;

use crate::{error::ApiError, handler::ActionApiHandler};

/// HTTP trigger service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ActionApiHandler,
{
    /// Create new HTTP API with the given handler.
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /api/v1/actions - Run one start/stop scheduling pass
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/actions", post(run_action::<H>))
            .with_state(self.handler)
    }
}

/// POST /api/v1/actions
///
/// The body of the invocation result is returned verbatim; the HTTP status
/// mirrors its `statusCode` field (200 for completed runs, 400 for an
/// invalid action).
async fn run_action<H>(
    State(handler): State<Arc<H>>,
    Json(req): Json<ActionRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ActionApiHandler,
{
    tracing::debug!(action = %req.action, "action request received");
    let resp = handler.run_action(&req.action).await?;
    let status = StatusCode::from_u16(resp.status_code)
        .map_err(|_| ApiError::Internal(format!("invalid status code: {}", resp.status_code)))?;

    Ok((status, Json(resp)))
}
