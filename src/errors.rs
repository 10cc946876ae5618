use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptResponseError {
    /// The document handed to the parser was not a JSON object.
    #[error("response must be a structured object, not a scalar (got {0})")]
    InvalidInput(&'static str),

    #[error("failed to decode response body as JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("latest receipt is not valid base64: {0}")]
    InvalidLatestReceipt(#[from] base64::DecodeError),

    #[error("purchase at index {index} has unexpected field types: {source}")]
    InvalidPurchase {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}
