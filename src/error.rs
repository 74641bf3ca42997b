use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

// Implement alias for Result to simplify usage
pub type AppResult<T> = Result<T, AppError>;

/// Failure while obtaining the OAuth2 client-credentials token
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    MissingSettings(Vec<&'static str>),

    #[error("Timed out requesting OAuth2 token")]
    Timeout,

    #[error("Network error requesting OAuth2 token: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Unexpected OAuth2 response status: {0}")]
    Status(u16),

    #[error("OAuth2 response is not JSON")]
    InvalidJson { status: u16 },

    #[error("OAuth2 response has no access_token")]
    MissingAccessToken { status: u16 },
}

impl AuthError {
    /// Status returned by the identity provider, when it answered at all
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            AuthError::Status(status)
            | AuthError::InvalidJson { status }
            | AuthError::MissingAccessToken { status } => Some(*status),
            _ => None,
        }
    }
}

/// Failure talking to the accounting API
#[derive(Error, Debug)]
pub enum SapError {
    #[error("Missing environment variable: {0}")]
    MissingSetting(&'static str),

    #[error("Timed out calling the SAP API")]
    Timeout,

    #[error("Network error calling the SAP API: {0}")]
    Network(#[source] reqwest::Error),
}

impl SapError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, SapError::Timeout)
    }
}

/// Failure building or sending the journal entry attachment
#[derive(Error, Debug)]
pub enum AttachmentError {
    #[error("Missing environment variable: {0}")]
    MissingSetting(&'static str),

    #[error("Could not determine document number for LinkedSAPObjectKey")]
    MissingDocumentNumber,

    #[error("PDF attachment field has an invalid format")]
    InvalidPdfContent,

    #[error("HTTP error from SAP attachment endpoint: {0}")]
    Status(u16),

    #[error("Network error sending SAP attachment: {0}")]
    Network(#[source] reqwest::Error),

    #[error("SAP attachment response is not JSON")]
    InvalidJson { status: u16 },
}

impl AttachmentError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AttachmentError::Status(status) | AttachmentError::InvalidJson { status } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

/// Errors that end a `/journal-entry` request early
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Sap(#[from] SapError),

    #[error("Invalid request body: {0}")]
    InvalidPayload(String),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::Auth(e) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "detail": {
                        "message": "Failed to obtain OAuth2 token from the identity provider.",
                        "upstream_status": e.upstream_status(),
                    }
                }),
            ),
            ProxyError::Sap(e) => (
                if e.is_timeout() {
                    StatusCode::GATEWAY_TIMEOUT
                } else {
                    StatusCode::BAD_GATEWAY
                },
                json!({
                    "detail": {
                        "message": "Failed to communicate with the accounting backend.",
                        "error": e.to_string(),
                    }
                }),
            ),
            ProxyError::InvalidPayload(reason) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": reason }))
            }
        };

        (status, Json(body)).into_response()
    }
}
