use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use writer_primitives::Error;
use writer_prompts::TemplateError;

/// Error reply of the JSON API: `{success: false, error, message}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    error: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    success: bool,
    error: &'a str,
    message: &'a str,
}

impl ApiError {
    /// Builds an error reply.
    #[must_use]
    pub fn new(status: StatusCode, error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error,
            message: message.into(),
        }
    }

    /// 404 for unmatched routes.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Route not found",
            "The requested endpoint does not exist",
        )
    }

    /// 500 for failures with no better classification.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            message,
        )
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the short error label.
    #[must_use]
    pub const fn error(&self) -> &'static str {
        self.error
    }

    /// Returns the detailed message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::InvalidRequest { .. } | Error::InvalidRequestId { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid request", message)
            }
            Error::ModelUnavailable { .. } => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "Model not loaded",
                format!("{message}. Please wait and try again."),
            ),
            Error::GenerationFailure { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Generation failed",
                message,
            ),
            Error::Internal { .. } => Self::internal(message),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Invalid request",
            rejection.body_text(),
        )
    }
}

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Invalid template", err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.error,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_pipeline_errors_to_statuses() {
        let cases = [
            (Error::invalid_request("empty"), StatusCode::UNPROCESSABLE_ENTITY),
            (Error::model_unavailable("not loaded"), StatusCode::SERVICE_UNAVAILABLE),
            (Error::generation("boom"), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::internal("bug"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn unavailable_message_asks_to_retry() {
        let api = ApiError::from(Error::model_unavailable("model not loaded"));
        assert_eq!(api.error(), "Model not loaded");
        assert!(api.message().ends_with("Please wait and try again."));
    }
}
