use serde::{Deserialize, Serialize};

/// Invocation input: which action to run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Requested action; must be exactly `"start"` or `"stop"`.
    pub action: String,
}

/// Invocation output, mirrored to the caller verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    /// 200 for any completed run, 400 for an invalid action.
    pub status_code: u16,
    /// Human-readable summary of what happened.
    pub body: String,
}

impl ActionResponse {
    /// Completed run.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            body: body.into(),
        }
    }

    /// Rejected request (no remote calls were made).
    pub fn bad_request(body: impl Into<String>) -> Self {
        Self {
            status_code: 400,
            body: body.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionRequest, ActionResponse};

    #[test]
    fn request_deserializes_from_invocation_shape() {
        let req: ActionRequest = serde_json::from_str(r#"{"action":"start"}"#).unwrap();
        assert_eq!(req.action, "start");
    }

    #[test]
    fn response_uses_status_code_field_name() {
        let resp = ActionResponse::ok("2 services stopped");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"statusCode\":200"));
        assert!(json.contains("\"body\":\"2 services stopped\""));
    }

    #[test]
    fn bad_request_is_400() {
        let resp = ActionResponse::bad_request("invalid action");
        assert_eq!(resp.status_code, 400);
    }
}
