use serde::Deserialize;
use thiserror::Error;

/// Errors returned by the remote auth API.
///
/// The backend reports failures as `{"detail": "..."}` bodies; when a detail
/// string was parsed it rides along in the variant so callers can surface the
/// server's own wording.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("token rejected or expired"))]
    Unauthorized(Option<String>),

    #[error("Access denied: {}", .0.as_deref().unwrap_or("insufficient permissions"))]
    Forbidden(Option<String>),

    #[error("Request rejected: {}", .0.as_deref().unwrap_or("invalid input"))]
    Validation(Option<String>),

    #[error("Resource not found")]
    NotFound,

    #[error("Server error (status {0})")]
    Server(u16, Option<String>),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies echoed into messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shape used by the backend for all failure responses.
/// Validation failures may carry a structured (array) detail instead,
/// which deliberately parses to no detail here.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    fn parse_detail(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .filter(|d| !d.is_empty())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::parse_detail(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound,
            400 | 409 | 422 => ApiError::Validation(detail),
            500..=599 => ApiError::Server(status.as_u16(), detail),
            _ => ApiError::InvalidResponse(format!(
                "Status {}: {}",
                status,
                Self::truncate_body(body)
            )),
        }
    }

    /// The server's detail message, when one was parsed from the error body.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(d) | ApiError::Forbidden(d) | ApiError::Validation(d) => {
                d.as_deref()
            }
            ApiError::Server(_, d) => d.as_deref(),
            _ => None,
        }
    }

    /// True for 401 responses, the trigger for refresh-and-retry.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_parses_detail() {
        let err = ApiError::from_status(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Incorrect email or password"}"#,
        );
        match err {
            ApiError::Unauthorized(detail) => {
                assert_eq!(detail.as_deref(), Some("Incorrect email or password"));
            }
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_maps_validation_statuses() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::CONFLICT,
            StatusCode::UNPROCESSABLE_ENTITY,
        ] {
            let err = ApiError::from_status(status, r#"{"detail": "Email already registered"}"#);
            assert!(matches!(err, ApiError::Validation(_)), "status {}", status);
        }
    }

    #[test]
    fn test_from_status_maps_forbidden_and_server() {
        let err = ApiError::from_status(
            StatusCode::FORBIDDEN,
            r#"{"detail": "Account is deactivated"}"#,
        );
        assert_eq!(err.detail(), Some("Account is deactivated"));
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err = ApiError::from_status(StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, ApiError::Server(502, None)));
    }

    #[test]
    fn test_parse_detail_ignores_structured_bodies() {
        // FastAPI 422 responses carry an array of field errors
        let body = r#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}]}"#;
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert!(matches!(err, ApiError::Validation(None)));

        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "not json at all");
        assert_eq!(err.detail(), None);

        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"detail": ""}"#);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_is_unauthorized() {
        assert!(ApiError::Unauthorized(None).is_unauthorized());
        assert!(!ApiError::Forbidden(None).is_unauthorized());
        assert!(!ApiError::NotFound.is_unauthorized());
    }

    #[test]
    fn test_truncate_body_bounds_long_bodies() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, &body);
        let message = err.to_string();
        assert!(message.contains("truncated, 2000 total bytes"));
        assert!(message.len() < 700);
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        // Multibyte char straddling the cutoff must not panic the slice
        let mut body = "y".repeat(MAX_ERROR_BODY_LENGTH - 1);
        body.push_str("éllo wörld");
        let err = ApiError::from_status(StatusCode::IM_A_TEAPOT, &body);
        assert!(err.to_string().contains("truncated"));
    }
}
