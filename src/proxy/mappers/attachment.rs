// Attachment mapping: journal entry + SAP answer -> attachment upload body
use base64::{
    alphabet,
    engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD},
    Engine as _,
};
use serde_json::{json, Value};

use crate::error::AttachmentError;

/// Keys checked in the SAP response for the posted document number, in order
const DOCUMENT_NUMBER_KEYS: &[&str] = &[
    "document_number",
    "DocumentNumber",
    "AccountingDocument",
    "journalEntryId",
    "JournalEntry",
];

/// Keys checked in the journal entry for the PDF content, in order.
/// The last key is used even when falsy if none of the others is set.
const PDF_CONTENT_KEYS: &[&str] = &["AttachmentContent", "AttachmentPdf", "pdf_content", "pdf"];

/// Standard alphabet, canonical padding, non-zero trailing bits tolerated
const PDF_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// SAP business object type for accounting documents
const BUSINESS_OBJECT_TYPE: &str = "BKPF";
const PDF_MIME_TYPE: &str = "application/pdf";
const ATTACHMENT_FILE_NAME: &str = "Comprovante";

/// Null, false, 0, "", [] and {} count as absent
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn value_to_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Document number for `LinkedSAPObjectKey`: SAP response first, then
/// the caller's `DocumentReferenceID`
pub fn extract_document_number(sap_payload: &Value, journal_payload: &Value) -> Option<String> {
    if let Some(obj) = sap_payload.as_object() {
        let found = DOCUMENT_NUMBER_KEYS
            .iter()
            .filter_map(|key| obj.get(*key))
            .find(|v| is_truthy(v));
        if let Some(value) = found {
            return Some(value_to_key(value));
        }
    }

    journal_payload
        .get("DocumentReferenceID")
        .filter(|v| is_truthy(v))
        .map(value_to_key)
}

/// Base64 PDF content from the journal entry.
///
/// Strings that already decode as padded standard base64 are passed through;
/// any other string is encoded from its UTF-8 bytes. A missing, null or empty
/// value means there is no PDF.
pub fn extract_pdf_base64(journal_payload: &Value) -> Result<Option<String>, AttachmentError> {
    let Some((last, leading)) = PDF_CONTENT_KEYS.split_last() else {
        return Ok(None);
    };

    let raw = leading
        .iter()
        .filter_map(|key| journal_payload.get(*key))
        .find(|v| is_truthy(v))
        .or_else(|| journal_payload.get(*last));

    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => {
            if PDF_BASE64.decode(s).is_ok() {
                Ok(Some(s.clone()))
            } else {
                Ok(Some(STANDARD.encode(s.as_bytes())))
            }
        }
        Some(_) => Err(AttachmentError::InvalidPdfContent),
    }
}

/// Upload body expected by the SAP attachment service
pub fn build_attachment_payload(document_number: &str, pdf_base64: &str) -> Value {
    json!({
        "BusinessObjectTypeName": BUSINESS_OBJECT_TYPE,
        "LinkedSAPObjectKey": document_number,
        "Content-Type": PDF_MIME_TYPE,
        "Slug": format!("{}.pdf", ATTACHMENT_FILE_NAME),
        "FileName": ATTACHMENT_FILE_NAME,
        "MimeType": PDF_MIME_TYPE,
        "Content": pdf_base64,
    })
}
