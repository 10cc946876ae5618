use chrono::{DateTime, Utc};

/// Typed view over a single purchase entry of a receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InAppPurchase {
    pub product_id: Option<String>,
    pub transaction_id: Option<String>,

    /// For subscriptions this stays the same across renewals, and should be
    /// used to identify the subscription.
    pub original_transaction_id: Option<String>,
    pub web_order_line_item_id: Option<String>,
    pub quantity: Option<u32>,

    pub purchase_time: Option<DateTime<Utc>>,
    pub original_purchase_time: Option<DateTime<Utc>>,
    pub expiration_time: Option<DateTime<Utc>>,
    pub cancellation_time: Option<DateTime<Utc>>,

    pub is_trial_period: bool,
    pub is_in_intro_offer_period: bool,
}

impl InAppPurchase {
    /// Whether the purchase was refunded or cancelled by Apple support.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation_time.is_some()
    }

    /// Whether the purchase is a subscription that has expired relative to
    /// `now`. Purchases without an expiration time never expire.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_time.is_some_and(|t| t <= now)
    }
}
