// SAP upstream client
// Journal entry posting and attachment upload, both with a bearer token

use reqwest::{header, Client};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::{AttachmentError, SapError};
use crate::models::Settings;

/// Status and body returned by the SAP journal entry API
#[derive(Debug, Clone)]
pub struct SapResponse {
    pub status_code: u16,
    pub payload: Value,
}

impl SapResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

pub struct UpstreamClient {
    http_client: Client,
    settings: Arc<Settings>,
}

impl UpstreamClient {
    pub fn new(http_client: Client, settings: Arc<Settings>) -> Self {
        Self {
            http_client,
            settings,
        }
    }

    /// Post the journal entry and return SAP's status and body unchanged.
    ///
    /// Non-2xx answers are not errors here; only transport failures are.
    pub async fn post_journal_entry(
        &self,
        access_token: &str,
        payload: &Value,
    ) -> Result<SapResponse, SapError> {
        if self.settings.use_mock_sap {
            tracing::info!("SAP mock enabled, returning simulated response");
            return Ok(SapResponse {
                status_code: 201,
                payload: json!({
                    "mock": true,
                    "message": "Simulated accounting response.",
                    "echo": payload,
                }),
            });
        }

        let url = self
            .settings
            .sap_api_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(SapError::MissingSetting("SAP_API_URL"))?;

        let response = self
            .http_client
            .post(url)
            .bearer_auth(access_token)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SapError::Timeout
                } else {
                    SapError::Network(e)
                }
            })?;

        let status_code = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                SapError::Timeout
            } else {
                SapError::Network(e)
            }
        })?;

        let payload = serde_json::from_str::<Value>(&text).unwrap_or_else(|_| json!({ "raw": text }));

        tracing::info!(status_code, "SAP journal entry response received");
        Ok(SapResponse {
            status_code,
            payload,
        })
    }

    /// Upload an attachment and return the JSON answer.
    ///
    /// Any non-2xx status is an error.
    pub async fn send_attachment(
        &self,
        access_token: &str,
        payload: &Value,
    ) -> Result<Value, AttachmentError> {
        let url = self
            .settings
            .sap_attachment_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(AttachmentError::MissingSetting("SAP_ATTACHMENT_URL"))?;

        let response = self
            .http_client
            .post(url)
            .bearer_auth(access_token)
            .header(header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(AttachmentError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttachmentError::Status(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|_| AttachmentError::InvalidJson {
                status: status.as_u16(),
            })
    }
}
