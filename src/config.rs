use serde::Deserialize;

/// Where the list of in-app purchases is read from.
///
/// Historically the presence of an array was checked under `receipt.in_app`
/// while the value was read from the top-level `in_app` key. Real
/// verifyReceipt payloads (iOS 7 style) nest the array under `receipt`, while
/// some older integrations relay it at the top level. The default only reads
/// the top-level key; the nested array is opt-in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InAppSource {
    /// Only the top-level `in_app` key.
    #[default]
    TopLevel,
    /// Top-level `in_app`, falling back to `receipt.in_app`.
    TopLevelThenReceipt,
    /// Only `receipt.in_app`.
    Receipt,
    /// Top-level `in_app`, but only if `receipt.in_app` is also an array.
    LegacyQuirk,
}

/// Tunables for the tolerant field lookups performed while parsing a
/// verifyReceipt response. Missing keys take their defaults, so the struct can
/// be embedded in a host application's config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReceiptParserConfig {
    pub in_app_source: InAppSource,
}
