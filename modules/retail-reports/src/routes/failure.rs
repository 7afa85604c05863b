//! Failure payloads
//!
//! Every endpoint answers HTTP 200, even on failure. Clients detect failure
//! by the `failed` key; the value and the message key differ per endpoint
//! and are kept exactly as the existing front-end expects them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureResponse {
    pub failed: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

impl FailureResponse {
    /// `{ failed, msg }`
    pub fn with_msg(failed: &'static str, msg: &'static str) -> Self {
        Self {
            failed,
            msg: Some(msg),
            message: None,
        }
    }

    /// `{ failed, message }`
    pub fn with_message(failed: &'static str, message: &'static str) -> Self {
        Self {
            failed,
            msg: None,
            message: Some(message),
        }
    }

    pub fn list_expenses() -> Self {
        Self::with_msg("false", "Failed to Retrieve Expenses History")
    }

    pub fn delete_expense() -> Self {
        Self::with_msg("false", "Failed to Delete Expenses History")
    }

    pub fn monthly_report() -> Self {
        Self::with_msg("failed", "Failed To Retrieve Monthly Sales Report")
    }

    pub fn yearly_report() -> Self {
        Self::with_msg("failed", "Failed To Retrieve Yearly Sales Report")
    }

    pub fn delivery_status() -> Self {
        Self::with_message("true", "Failed to Retrieve Delivery Status!")
    }
}

impl IntoResponse for FailureResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
