use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    config::ReceiptParserConfig, data::parsers::receipt_response_parser::typed_purchases,
    errors::ReceiptResponseError,
};

use super::{environment::Environment, in_app_purchase::InAppPurchase, result_code::ResultCode};

/// Normalized view of a verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptResponse {
    pub(crate) result_code: ResultCode,
    pub(crate) bundle_id: Option<String>,
    pub(crate) receipt: Map<String, Value>,
    pub(crate) purchases: Vec<Map<String, Value>>,
    pub(crate) latest_receipt: Option<String>,
    pub(crate) latest_receipt_info: Option<Vec<Map<String, Value>>>,
    pub(crate) environment: Option<Environment>,
}

impl ReceiptResponse {
    /// Parses an already decoded response document with the default lookup
    /// configuration.
    ///
    /// Only fails if `document` is not a JSON object. Missing or mistyped keys
    /// leave the corresponding fields empty, and a missing status yields
    /// [`ResultCode::DataMalformed`].
    pub fn parse(document: &Value) -> Result<Self, ReceiptResponseError> {
        Self::from_document(document, &ReceiptParserConfig::default())
    }

    /// Decodes and parses a raw response body.
    pub fn parse_str(body: &str) -> Result<Self, ReceiptResponseError> {
        let document: Value = serde_json::from_str(body)?;
        Self::parse(&document)
    }

    pub fn result_code(&self) -> ResultCode {
        self.result_code
    }

    /// Overrides the status, e.g. after the caller re-sent the receipt to the
    /// other environment.
    pub fn set_result_code(&mut self, code: impl Into<ResultCode>) -> &mut Self {
        self.result_code = code.into();
        self
    }

    pub fn is_valid(&self) -> bool {
        self.result_code.is_ok()
    }

    pub fn bundle_id(&self) -> Option<&str> {
        self.bundle_id.as_deref()
    }

    pub fn receipt(&self) -> &Map<String, Value> {
        &self.receipt
    }

    /// The purchase entries of the receipt. If the response carried no
    /// purchase list, this holds the receipt itself as the only entry.
    pub fn purchases(&self) -> &[Map<String, Value>] {
        &self.purchases
    }

    /// The base64 encoded latest receipt, only returned for receipts
    /// containing auto-renewable subscriptions.
    pub fn latest_receipt(&self) -> Option<&str> {
        self.latest_receipt.as_deref()
    }

    pub fn latest_receipt_bytes(&self) -> Result<Option<Vec<u8>>, ReceiptResponseError> {
        Ok(self
            .latest_receipt
            .as_deref()
            .map(|blob| STANDARD.decode(blob))
            .transpose()?)
    }

    pub fn latest_receipt_info(&self) -> Option<&[Map<String, Value>]> {
        self.latest_receipt_info.as_deref()
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.as_ref()
    }

    pub fn in_app_purchases(&self) -> Result<Vec<InAppPurchase>, ReceiptResponseError> {
        typed_purchases(&self.purchases)
    }

    pub fn latest_in_app_purchases(&self) -> Result<Vec<InAppPurchase>, ReceiptResponseError> {
        typed_purchases(self.latest_receipt_info.as_deref().unwrap_or_default())
    }
}
