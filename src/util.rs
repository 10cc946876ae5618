use serde_json::Value;
use tracing::debug;

use crate::{
    config::ReceiptParserConfig, domain::entities::receipt_response::ReceiptResponse,
    errors::ReceiptResponseError,
};

/// Entry point for callers that need a non-default lookup configuration.
/// [`ReceiptResponse::parse`] is equivalent to using `ReceiptParser::default()`.
#[derive(Debug, Clone, Default)]
pub struct ReceiptParser {
    config: ReceiptParserConfig,
}

impl ReceiptParser {
    pub fn new(config: ReceiptParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReceiptParserConfig {
        &self.config
    }

    pub fn parse(&self, document: &Value) -> Result<ReceiptResponse, ReceiptResponseError> {
        let response = ReceiptResponse::from_document(document, &self.config)?;
        debug!(
            status = response.result_code().code(),
            purchases = response.purchases().len(),
            "parsed verifyReceipt response"
        );
        Ok(response)
    }

    /// Decodes a raw response body before parsing it.
    pub fn parse_str(&self, body: &str) -> Result<ReceiptResponse, ReceiptResponseError> {
        let document: Value = serde_json::from_str(body)?;
        self.parse(&document)
    }
}
