use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::apollo::ApolloLeadImportError;
use crate::workflows::prospecting::CriteriaError;
use crate::workflows::scoring::ScoringError;
use crate::workflows::sources::SourceError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Request(JsonRejection),
    Import(ApolloLeadImportError),
    Criteria(CriteriaError),
    Scoring(ScoringError),
    Source(SourceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Request(rejection) => rejection.status(),
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Criteria(_) | AppError::Scoring(_) | AppError::Source(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Request(rejection) => write!(f, "invalid request: {}", rejection.body_text()),
            AppError::Import(err) => write!(f, "import error: {}", err),
            AppError::Criteria(err) => write!(f, "invalid criteria: {}", err),
            AppError::Scoring(err) => write!(f, "invalid scoring rules: {}", err),
            AppError::Source(err) => write!(f, "data source error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Request(rejection) => Some(rejection),
            AppError::Import(err) => Some(err),
            AppError::Criteria(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Source(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Request(value)
    }
}

impl From<ApolloLeadImportError> for AppError {
    fn from(value: ApolloLeadImportError) -> Self {
        Self::Import(value)
    }
}

impl From<CriteriaError> for AppError {
    fn from(value: CriteriaError) -> Self {
        Self::Criteria(value)
    }
}

impl From<ScoringError> for AppError {
    fn from(value: ScoringError) -> Self {
        Self::Scoring(value)
    }
}

impl From<SourceError> for AppError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failures_are_unprocessable() {
        assert_eq!(
            AppError::from(CriteriaError::NoCriteria).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::from(SourceError::UnknownSource("clearbit".into())).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn import_failures_are_bad_requests() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = AppError::from(ApolloLeadImportError::from(io));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("import error"));
    }
}
