// Mapper module
// Reshapes journal entry and SAP payloads for the attachment upload

pub mod attachment;

pub use attachment::{build_attachment_payload, extract_document_number, extract_pdf_base64};
