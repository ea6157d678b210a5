//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use filinglens_charts::ChartError;
use filinglens_model::ModelError;
use filinglens_store::StoreError;

/// Handler result alias.
pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors surfaced to HTTP clients.
///
/// Caller mistakes map to 400; dataset and model failures map to 500
/// and are logged server-side.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request itself was malformed.
    #[error("{0}")]
    BadRequest(String),

    /// A dataset operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A chart aggregation failed.
    #[error(transparent)]
    Chart(#[from] ChartError),

    /// A model operation failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_)
            | Self::Chart(ChartError::InvalidParameter(_))
            | Self::Model(ModelError::DimensionMismatch { .. }) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        assert_eq!(ServerError::BadRequest("nope".into()).status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_chart_parameter_maps_to_400() {
        let err = ServerError::Chart(ChartError::InvalidParameter("CCTI".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_failures_map_to_500() {
        let err = ServerError::Store(StoreError::SourceMissing("x.csv".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn model_data_failures_map_to_500() {
        let err = ServerError::Model(ModelError::InsufficientData);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
