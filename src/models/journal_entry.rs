// Journal entry schemas: what ServiceNow sends and what we answer with
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Journal entry line item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JournalEntryItem {
    pub reference_document_item: Option<String>,
    #[serde(rename = "GLAccount")]
    pub gl_account: Option<String>,
    pub amount_in_transaction_currency: Option<String>,
    pub debit_credit_code: Option<DebitCreditCode>,
    pub document_item_text: Option<String>,
    pub assignment_reference: Option<String>,
    pub trading_partner: Option<String>,
    pub value_date: Option<String>,
    pub profit_center: Option<String>,
    pub cost_center: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Debit/credit indicator, sent either as a number or as an SAP code ("S"/"H")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DebitCreditCode {
    Number(f64),
    Code(String),
}

/// Journal entry creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JournalEntryRequest {
    pub original_reference_document_type: Option<String>,
    pub original_reference_document: Option<String>,
    pub original_reference_document_logical_system: Option<String>,
    pub business_transaction_type: Option<String>,
    pub accounting_document_type: Option<String>,
    #[serde(rename = "DocumentReferenceID")]
    pub document_reference_id: Option<String>,
    pub document_header_text: Option<String>,
    pub created_by_user: Option<String>,
    pub company_code: Option<String>,
    pub document_date: Option<String>,
    pub posting_date: Option<String>,
    #[serde(rename = "itens", default)]
    pub itens: Vec<JournalEntryItem>,
    /// Fields we do not model are forwarded untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JournalEntryRequest {
    /// Payload forwarded to SAP, with null fields dropped
    pub fn to_payload(&self) -> Value {
        let mut payload = serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()));

        if let Some(obj) = payload.as_object_mut() {
            obj.retain(|_, v| !v.is_null());
            if let Some(items) = obj.get_mut("itens").and_then(|v| v.as_array_mut()) {
                for item in items {
                    if let Some(item_obj) = item.as_object_mut() {
                        item_obj.retain(|_, v| !v.is_null());
                    }
                }
            }
        }

        payload
    }
}

/// Response returned to the caller, carrying SAP's status and body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SapProxyResponse {
    pub sap_status_code: u16,
    pub sap_payload: Value,
}
