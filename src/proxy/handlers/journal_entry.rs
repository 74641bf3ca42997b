// Journal entry handler
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::error::ProxyError;
use crate::models::{JournalEntryRequest, SapProxyResponse};
use crate::modules::oauth;
use crate::proxy::attachment;
use crate::proxy::server::AppState;

/// Receive a ServiceNow journal entry and forward it to SAP.
///
/// The reply carries SAP's own status code. The attachment upload only runs
/// after a 2xx from SAP, and its outcome is logged, never returned.
pub async fn handle_journal_entry(
    State(state): State<AppState>,
    body: Result<Json<JournalEntryRequest>, JsonRejection>,
) -> Result<Response, ProxyError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected journal entry body");
        ProxyError::InvalidPayload(rejection.body_text())
    })?;
    let journal_payload = request.to_payload();

    let token = oauth::get_token(&state.http_client, &state.settings)
        .await
        .map_err(|e| {
            tracing::error!(
                error = %e,
                upstream_status = ?e.upstream_status(),
                "Failed to obtain OAuth2 token"
            );
            e
        })?;

    let sap_response = state
        .upstream
        .post_journal_entry(&token, &journal_payload)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, timeout = e.is_timeout(), "SAP communication failed");
            e
        })?;

    if sap_response.is_success() {
        match attachment::send_for_journal_entry(
            &state.settings,
            &state.upstream,
            &journal_payload,
            &sap_response.payload,
            &token,
        )
        .await
        {
            Ok(Some(_)) => tracing::info!("attachment send succeeded"),
            Ok(None) => {}
            Err(e) => tracing::error!(
                status_code = ?e.status_code(),
                error = %e,
                "attachment send failed"
            ),
        }
    }

    let status = StatusCode::from_u16(sap_response.status_code).unwrap_or(StatusCode::BAD_GATEWAY);
    let body = SapProxyResponse {
        sap_status_code: sap_response.status_code,
        sap_payload: sap_response.payload,
    };

    Ok((status, Json(body)).into_response())
}
