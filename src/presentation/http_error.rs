// Error responses of the console API
use crate::application::dashboard_repository::ApiError;
use crate::application::dashboard_service::ServiceError;
use crate::application::dashboard_store::StoreError;
use crate::domain::view::ViewError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        let status = match &error {
            ServiceError::NotFound(_)
            | ServiceError::UnknownCell { .. }
            | ServiceError::Store(StoreError::UnknownDashboard(_))
            | ServiceError::Api(ApiError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ServiceError::Store(StoreError::DeleteInProgress(_)) => StatusCode::CONFLICT,
            ServiceError::Template(_) => StatusCode::BAD_REQUEST,
            ServiceError::Api(_) => StatusCode::BAD_GATEWAY,
        };
        let message = match &error {
            ServiceError::Api(api) => api.user_message(&api.to_string()),
            other => other.to_string(),
        };
        Self::new(status, message)
    }
}

impl From<ViewError> for HttpError {
    fn from(error: ViewError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error.to_string())
    }
}
