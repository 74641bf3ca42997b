use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::error::AuthError;
use crate::models::Settings;

/// Token handed out when `USE_MOCK_AUTH` is on
pub const MOCK_TOKEN: &str = "mock-token";

/// Obtain an access_token from SAP BTP using the client_credentials grant
pub async fn get_token(client: &Client, settings: &Settings) -> Result<String, AuthError> {
    if settings.use_mock_auth {
        tracing::info!("Mock authentication enabled, using fixed token");
        return Ok(MOCK_TOKEN.to_string());
    }

    let (token_url, client_id, client_secret) = required_credentials(settings)?;

    let params = [
        ("grant_type", "client_credentials"),
        ("client_id", client_id),
        ("client_secret", client_secret),
    ];

    let response = client
        .post(token_url)
        .form(&params)
        .send()
        .await
        .map_err(transport_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(AuthError::Status(status.as_u16()));
    }

    let body = response.text().await.map_err(transport_error)?;
    let payload: Value = serde_json::from_str(&body).map_err(|_| AuthError::InvalidJson {
        status: status.as_u16(),
    })?;

    let token = payload
        .get("access_token")
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::MissingAccessToken {
            status: status.as_u16(),
        })?;

    tracing::debug!("OAuth2 token obtained");
    Ok(token.to_string())
}

fn transport_error(e: reqwest::Error) -> AuthError {
    if e.is_timeout() {
        AuthError::Timeout
    } else {
        AuthError::Network(e)
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// All three settings must be present; report every missing one at once
fn required_credentials(settings: &Settings) -> Result<(&str, &str, &str), AuthError> {
    let url = present(&settings.sap_oauth_url);
    let id = present(&settings.sap_client_id);
    let secret = present(&settings.sap_client_secret);

    match (url, id, secret) {
        (Some(url), Some(id), Some(secret)) => Ok((url, id, secret)),
        _ => {
            let missing = [
                ("SAP_OAUTH_URL", url.is_none()),
                ("SAP_CLIENT_ID", id.is_none()),
                ("SAP_CLIENT_SECRET", secret.is_none()),
            ]
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name)
            .collect();
            Err(AuthError::MissingSettings(missing))
        }
    }
}
