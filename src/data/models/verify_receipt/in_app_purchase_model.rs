use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_with::{formats::Flexible, serde_as, DisplayFromStr, PickFirst, TimestampMilliSeconds};

/// One entry of the `in_app` / `latest_receipt_info` arrays returned by the
/// verifyReceipt endpoint.
///
/// https://developer.apple.com/documentation/appstorereceipts/responsebody/receipt/in_app
///
/// Apple encodes numbers and booleans in these entries as strings, so every
/// scalar accepts both the string and the native JSON form. Every field is
/// optional since legacy (iOS 6 style) receipts omit most of them.
#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct InAppPurchaseModel {
    /// The unique identifier of the product purchased.
    pub(crate) product_id: Option<String>,
    /// A unique identifier for a transaction such as a purchase, restore, or
    /// renewal.
    pub(crate) transaction_id: Option<String>,
    /// The transaction identifier of the original purchase.
    pub(crate) original_transaction_id: Option<String>,
    /// A unique identifier for purchase events across devices, including
    /// subscription-renewal events.
    pub(crate) web_order_line_item_id: Option<String>,
    /// The number of consumable products purchased.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) quantity: Option<u32>,
    /// The time the App Store charged the user's account for the purchase, in
    /// UNIX epoch milliseconds.
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) purchase_date_ms: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) original_purchase_date_ms: Option<DateTime<Utc>>,
    /// The time a subscription expires or when it will renew.
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) expires_date_ms: Option<DateTime<Utc>>,
    /// The time Apple customer support canceled a transaction, or the time an
    /// auto-renewable subscription plan was upgraded.
    #[serde_as(as = "Option<TimestampMilliSeconds<String, Flexible>>")]
    pub(crate) cancellation_date_ms: Option<DateTime<Utc>>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) is_trial_period: Option<bool>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub(crate) is_in_intro_offer_period: Option<bool>,
}
