use std::fmt;

use serde::{Deserialize, Serialize};

/// Status code returned by the verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
///
/// Codes outside the known set are carried verbatim in `Other`. The variants
/// describe what the server reported; deciding whether to retry or redirect
/// is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ResultCode {
    /// The receipt is valid.
    Ok,
    /// The App Store could not read the JSON object provided.
    AppStoreCannotRead,
    /// The data in the receipt-data property was malformed or missing.
    DataMalformed,
    /// The receipt could not be authenticated.
    ReceiptNotAuthenticated,
    /// The shared secret provided does not match the shared secret on file
    /// for the account.
    SharedSecretNotMatch,
    /// The receipt server is not currently available.
    ReceiptServerUnavailable,
    /// The receipt is valid but the subscription has expired. The receipt is
    /// still decoded and returned as part of the response.
    ReceiptValidButSubscriptionExpired,
    /// The receipt is from the test environment but was sent to the
    /// production environment for verification.
    SandboxReceiptSentToProduction,
    /// The receipt is from the production environment but was sent to the
    /// test environment for verification.
    ProductionReceiptSentToSandbox,

    Other(i64),
}

impl ResultCode {
    pub fn code(self) -> i64 {
        match self {
            ResultCode::Ok => 0,
            ResultCode::AppStoreCannotRead => 21000,
            ResultCode::DataMalformed => 21002,
            ResultCode::ReceiptNotAuthenticated => 21003,
            ResultCode::SharedSecretNotMatch => 21004,
            ResultCode::ReceiptServerUnavailable => 21005,
            ResultCode::ReceiptValidButSubscriptionExpired => 21006,
            ResultCode::SandboxReceiptSentToProduction => 21007,
            ResultCode::ProductionReceiptSentToSandbox => 21008,
            ResultCode::Other(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self.code() == 0
    }

    /// The receipt was sent to the wrong endpoint; the caller may want to
    /// resend it to the other one.
    pub fn is_environment_mismatch(self) -> bool {
        matches!(
            self,
            ResultCode::SandboxReceiptSentToProduction | ResultCode::ProductionReceiptSentToSandbox
        )
    }
}

impl From<i64> for ResultCode {
    fn from(code: i64) -> Self {
        match code {
            0 => ResultCode::Ok,
            21000 => ResultCode::AppStoreCannotRead,
            21002 => ResultCode::DataMalformed,
            21003 => ResultCode::ReceiptNotAuthenticated,
            21004 => ResultCode::SharedSecretNotMatch,
            21005 => ResultCode::ReceiptServerUnavailable,
            21006 => ResultCode::ReceiptValidButSubscriptionExpired,
            21007 => ResultCode::SandboxReceiptSentToProduction,
            21008 => ResultCode::ProductionReceiptSentToSandbox,
            other => ResultCode::Other(other),
        }
    }
}

impl From<ResultCode> for i64 {
    fn from(code: ResultCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            ResultCode::Ok => "receipt is valid",
            ResultCode::AppStoreCannotRead => "App Store could not read the request body",
            ResultCode::DataMalformed => "receipt data malformed or missing",
            ResultCode::ReceiptNotAuthenticated => "receipt could not be authenticated",
            ResultCode::SharedSecretNotMatch => "shared secret does not match",
            ResultCode::ReceiptServerUnavailable => "receipt server is unavailable",
            ResultCode::ReceiptValidButSubscriptionExpired => {
                "receipt is valid but the subscription has expired"
            }
            ResultCode::SandboxReceiptSentToProduction => {
                "sandbox receipt sent to the production environment"
            }
            ResultCode::ProductionReceiptSentToSandbox => {
                "production receipt sent to the sandbox environment"
            }
            ResultCode::Other(_) => "unrecognized status",
        };
        write!(f, "{} ({})", self.code(), description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_variants() {
        assert_eq!(ResultCode::from(0_i64), ResultCode::Ok);
        assert_eq!(ResultCode::from(21002_i64), ResultCode::DataMalformed);
        assert_eq!(
            ResultCode::from(21007_i64),
            ResultCode::SandboxReceiptSentToProduction
        );
        assert_eq!(ResultCode::from(21008_i64).code(), 21008);
    }

    #[test]
    fn test_unknown_codes_are_kept_verbatim() {
        // 21001 is not part of the documented set.
        assert_eq!(ResultCode::from(21001_i64), ResultCode::Other(21001));
        assert_eq!(ResultCode::from(21199_i64).code(), 21199);
        assert!(!ResultCode::from(-1_i64).is_ok());
    }

    #[test]
    fn test_environment_mismatch() {
        assert!(ResultCode::SandboxReceiptSentToProduction.is_environment_mismatch());
        assert!(ResultCode::ProductionReceiptSentToSandbox.is_environment_mismatch());
        assert!(!ResultCode::ReceiptServerUnavailable.is_environment_mismatch());
        assert!(!ResultCode::Ok.is_environment_mismatch());
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        assert_eq!(
            serde_json::to_string(&ResultCode::DataMalformed).unwrap(),
            "21002"
        );
        let code: ResultCode = serde_json::from_str("21006").unwrap();
        assert_eq!(code, ResultCode::ReceiptValidButSubscriptionExpired);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ResultCode::ReceiptServerUnavailable.to_string(),
            "21005 (receipt server is unavailable)"
        );
        assert_eq!(ResultCode::Other(7).to_string(), "7 (unrecognized status)");
    }
}
