//! API error handling.

use std::any::Any;

use axum::{
    body::Body,
    extract::rejection::JsonRejection,
    http::{header, Response as HttpResponse, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tower_http::catch_panic::ResponseForPanic;
use verselight_core::error::VerseError;

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: &'static str,
    details: Option<String>,
    valid: Option<bool>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            details: None,
            valid: None,
        }
    }

    /// Bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    /// Internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "INTERNAL_ERROR")
    }

    /// Attaches diagnostic details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Marks the body with `"valid": false`, as verse validation failures are.
    pub fn invalid(mut self) -> Self {
        self.valid = Some(false);
        self
    }

    /// Converts a feature failure, naming the feature in upstream and parse
    /// failures ("Failed to generate context", "Failed to parse context response").
    pub fn for_feature(label: &str, err: VerseError) -> Self {
        let message = if err.is_upstream_error() {
            Some(format!("Failed to generate {}", label))
        } else if err.is_shape_error() {
            Some(format!("Failed to parse {} response", label))
        } else {
            None
        };

        let mut api = ApiError::from(err);
        if let Some(message) = message {
            api.message = message;
        }
        api
    }

    /// HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable code.
    pub fn code(&self) -> &'static str {
        self.code
    }
}

/// Error response body.
#[derive(Serialize)]
struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            valid: self.valid,
            error: self.message,
            code: self.code,
            details: self.details,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<VerseError> for ApiError {
    fn from(err: VerseError) -> Self {
        match &err {
            VerseError::InvalidInput(_) => ApiError::bad_request(err.to_string()),
            VerseError::VerseNotFound(_) | VerseError::ReferenceMismatch { .. } => {
                ApiError::new(StatusCode::BAD_REQUEST, err.to_string(), "VERSE_NOT_FOUND")
            }
            VerseError::Upstream { .. } | VerseError::Http(_) => {
                tracing::warn!(error = %err, "Upstream failure");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upstream service error",
                    "UPSTREAM_ERROR",
                )
                .with_details(err.to_string())
            }
            VerseError::InvalidFormat(_) => {
                tracing::warn!(error = %err, "Upstream response is not JSON");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse upstream response",
                    "INVALID_FORMAT",
                )
                .with_details("Invalid JSON format")
            }
            VerseError::MissingFields(_) => {
                tracing::warn!(error = %err, "Upstream response has the wrong shape");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to parse upstream response",
                    "MISSING_FIELDS",
                )
                .with_details(err.to_string())
            }
            VerseError::MissingCredential(_) | VerseError::ConfigError(_) => {
                tracing::error!(error = %err, "Server misconfigured");
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), "CONFIG_ERROR")
            }
            VerseError::JsonError(_) | VerseError::InternalError(_) => {
                tracing::error!(error = %err, "Internal error");
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// Final catch-all for handler panics.
///
/// The panic message is only exposed in diagnostic mode.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PanicResponder {
    pub(crate) diagnostic: bool,
}

impl ResponseForPanic for PanicResponder {
    type ResponseBody = Body;

    fn response_for_panic(
        &mut self,
        err: Box<dyn Any + Send + 'static>,
    ) -> HttpResponse<Self::ResponseBody> {
        let message = err
            .downcast_ref::<String>()
            .cloned()
            .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()));
        tracing::error!(panic = ?message, "Handler panicked");

        let mut api = ApiError::internal("Internal server error");
        if self.diagnostic {
            if let Some(message) = message {
                api = api.with_details(message);
            }
        }

        let mut response = api.into_response();
        response
            .headers_mut()
            .insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-store"));
        response
    }
}
