// Attachment dispatcher
// Sends the journal entry PDF to SAP once the entry itself was accepted
use serde_json::{json, Value};

use crate::error::AttachmentError;
use crate::models::Settings;
use crate::proxy::mappers::{build_attachment_payload, extract_document_number, extract_pdf_base64};
use crate::proxy::upstream::UpstreamClient;

/// Send the PDF attached to a journal entry, when enabled and present.
///
/// Returns `Ok(None)` when attachments are disabled or the entry carries no
/// PDF. A missing document number is an error even without a PDF, because
/// nothing could be linked either way.
pub async fn send_for_journal_entry(
    settings: &Settings,
    upstream: &UpstreamClient,
    journal_payload: &Value,
    sap_payload: &Value,
    access_token: &str,
) -> Result<Option<Value>, AttachmentError> {
    if !settings.enable_attachment {
        tracing::info!(enable_attachment = false, "attachment disabled");
        return Ok(None);
    }

    if settings.use_mock_sap {
        tracing::info!("attachment mock enabled");
        return Ok(Some(json!({
            "mock": true,
            "message": "Simulated attachment response.",
        })));
    }

    let document_number = extract_document_number(sap_payload, journal_payload)
        .ok_or(AttachmentError::MissingDocumentNumber)?;

    let Some(pdf_base64) = extract_pdf_base64(journal_payload)? else {
        tracing::info!("attachment skipped, no pdf content");
        return Ok(None);
    };

    let payload = build_attachment_payload(&document_number, &pdf_base64);

    tracing::info!(
        linked_sap_object_key = %document_number,
        "attachment send started"
    );
    upstream
        .send_attachment(access_token, &payload)
        .await
        .map(Some)
}
