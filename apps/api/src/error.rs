use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tillboard_core::AppError;
use ts_rs::TS;

/// API error payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/error-response.ts"
)]
pub struct ErrorResponse {
    code: &'static str,
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            // Distinct from a generic forbidden response so clients can
            // permanently disable mutation controls for the position.
            AppError::ProtectedPosition(_) => StatusCode::FORBIDDEN,
            AppError::AlreadyGranted(_) | AppError::NotGranted(_) | AppError::Conflict(_) => {
                StatusCode::CONFLICT
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorResponse {
            code: self.0.code(),
            message: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use tillboard_core::AppError;

    use super::ApiError;

    #[test]
    fn protected_position_maps_to_forbidden() {
        let response = ApiError(AppError::ProtectedPosition("owner".to_owned())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn precondition_failures_map_to_conflict() {
        let already = ApiError(AppError::AlreadyGranted("x".to_owned())).into_response();
        let missing = ApiError(AppError::NotGranted("x".to_owned())).into_response();
        assert_eq!(already.status(), StatusCode::CONFLICT);
        assert_eq!(missing.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn malformed_identifiers_map_to_bad_request() {
        let response = ApiError(AppError::InvalidArgument("x".to_owned())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
