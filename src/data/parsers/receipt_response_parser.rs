use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    config::{InAppSource, ReceiptParserConfig},
    data::models::verify_receipt::in_app_purchase_model::InAppPurchaseModel,
    domain::entities::{
        environment::Environment, in_app_purchase::InAppPurchase,
        receipt_response::ReceiptResponse, result_code::ResultCode,
    },
    errors::ReceiptResponseError,
};

use super::field_resolution::{
    first_object_array, first_string, has_array_at, kind_of, object_array_at, object_at,
    status_code, JsonObject,
};

const BUNDLE_ID_KEYS: &[&str] = &["bundle_id", "bid"];
const LATEST_RECEIPT_INFO_KEYS: &[&str] = &["latest_receipt_info", "latest_expired_receipt_info"];

impl ReceiptResponse {
    pub(crate) fn from_document(
        document: &Value,
        config: &ReceiptParserConfig,
    ) -> Result<Self, ReceiptResponseError> {
        let Value::Object(document) = document else {
            return Err(ReceiptResponseError::InvalidInput(kind_of(document)));
        };

        if !document.contains_key("status") {
            debug!("response has no status, treating receipt data as malformed");
            return Ok(Self::malformed());
        }
        let result_code = status_code(document)
            .map(ResultCode::from)
            .unwrap_or(ResultCode::DataMalformed);

        let receipt = object_at(document, "receipt").cloned().unwrap_or_default();
        let in_app = resolve_in_app(document, &receipt, config.in_app_source);
        let purchases = if in_app.is_empty() {
            trace!("no in-app purchase list, using receipt as the only purchase");
            vec![receipt.clone()]
        } else {
            in_app
        };
        let bundle_id = first_string(&receipt, BUNDLE_ID_KEYS);
        let latest_receipt_info = first_object_array(document, LATEST_RECEIPT_INFO_KEYS);
        let latest_receipt = first_string(document, &["latest_receipt"]);
        let environment = first_string(document, &["environment"]).map(parse_environment);

        Ok(Self {
            result_code,
            bundle_id,
            receipt,
            purchases,
            latest_receipt,
            latest_receipt_info,
            environment,
        })
    }

    fn malformed() -> Self {
        Self {
            result_code: ResultCode::DataMalformed,
            bundle_id: None,
            receipt: JsonObject::new(),
            purchases: vec![JsonObject::new()],
            latest_receipt: None,
            latest_receipt_info: None,
            environment: None,
        }
    }
}

fn resolve_in_app(
    document: &JsonObject,
    receipt: &JsonObject,
    source: InAppSource,
) -> Vec<JsonObject> {
    let top_level = || object_array_at(document, "in_app");
    let nested = || object_array_at(receipt, "in_app");
    let found = match source {
        InAppSource::TopLevelThenReceipt => top_level().or_else(nested),
        InAppSource::TopLevel => top_level(),
        InAppSource::Receipt => nested(),
        InAppSource::LegacyQuirk => {
            if has_array_at(receipt, "in_app") {
                top_level()
            } else {
                None
            }
        }
    };
    found.unwrap_or_default()
}

fn parse_environment(raw: String) -> Environment {
    match raw.as_str() {
        "Sandbox" => Environment::Sandbox,
        "Production" => Environment::Production,
        _ => Environment::Unknown(raw),
    }
}

impl InAppPurchase {
    fn from_model(m: InAppPurchaseModel) -> Self {
        InAppPurchase {
            product_id: m.product_id,
            transaction_id: m.transaction_id,
            original_transaction_id: m.original_transaction_id,
            web_order_line_item_id: m.web_order_line_item_id,
            quantity: m.quantity,
            purchase_time: m.purchase_date_ms,
            original_purchase_time: m.original_purchase_date_ms,
            expiration_time: m.expires_date_ms,
            cancellation_time: m.cancellation_date_ms,
            is_trial_period: m.is_trial_period.unwrap_or(false),
            is_in_intro_offer_period: m.is_in_intro_offer_period.unwrap_or(false),
        }
    }
}

pub(crate) fn typed_purchases(
    purchases: &[JsonObject],
) -> Result<Vec<InAppPurchase>, ReceiptResponseError> {
    purchases
        .iter()
        .enumerate()
        .map(|(index, purchase)| {
            serde_json::from_value::<InAppPurchaseModel>(Value::Object(purchase.clone()))
                .map(InAppPurchase::from_model)
                .map_err(|source| ReceiptResponseError::InvalidPurchase { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_with(document: Value, source: InAppSource) -> ReceiptResponse {
        ReceiptResponse::from_document(&document, &ReceiptParserConfig { in_app_source: source })
            .unwrap()
    }

    #[test]
    fn test_non_object_is_rejected() {
        for document in [json!("raw"), json!(3), json!(null), json!([{"status": 0}])] {
            let result =
                ReceiptResponse::from_document(&document, &ReceiptParserConfig::default());
            assert!(matches!(result, Err(ReceiptResponseError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_missing_status_degrades_to_malformed() {
        let r = parse_with(
            json!({"receipt": {"bundle_id": "com.app"}, "latest_receipt": "AAAA"}),
            InAppSource::default(),
        );
        assert_eq!(r.result_code, ResultCode::DataMalformed);
        assert_eq!(r.receipt, JsonObject::new());
        assert_eq!(r.purchases, vec![JsonObject::new()]);
        assert_eq!(r.bundle_id, None);
        assert_eq!(r.latest_receipt, None);
    }

    #[test]
    fn test_non_object_receipt_is_treated_as_empty() {
        let r = parse_with(json!({"status": 0, "receipt": "abc"}), InAppSource::default());
        assert_eq!(r.receipt, JsonObject::new());
        assert_eq!(r.purchases, vec![JsonObject::new()]);
    }

    #[test]
    fn test_in_app_sources() {
        let document = json!({
            "status": 0,
            "receipt": {"in_app": [{"product_id": "nested"}]},
            "in_app": [{"product_id": "top"}],
        });
        let product =
            |source| parse_with(document.clone(), source).purchases[0]["product_id"].clone();

        assert_eq!(product(InAppSource::TopLevelThenReceipt), "top");
        assert_eq!(product(InAppSource::TopLevel), "top");
        assert_eq!(product(InAppSource::Receipt), "nested");
        assert_eq!(product(InAppSource::LegacyQuirk), "top");
    }

    #[test]
    fn test_default_source_ignores_nested_in_app() {
        let document = json!({
            "status": 0,
            "receipt": {"bundle_id": "com.app", "in_app": [{"product_id": "a"}]},
        });
        let r = parse_with(document.clone(), InAppSource::default());
        assert_eq!(r.purchases, vec![r.receipt.clone()]);
        assert_eq!(r.purchases[0]["bundle_id"], "com.app");

        let r = parse_with(document, InAppSource::TopLevelThenReceipt);
        assert_eq!(r.purchases.len(), 1);
        assert_eq!(r.purchases[0]["product_id"], "a");
    }

    #[test]
    fn test_unusable_status_keeps_remaining_fields() {
        for status in [json!(null), json!(1.5), json!("ok")] {
            let r = parse_with(
                json!({
                    "status": status,
                    "receipt": {"bundle_id": "com.app"},
                    "latest_receipt_info": [{"a": 1}],
                }),
                InAppSource::default(),
            );
            assert_eq!(r.result_code, ResultCode::DataMalformed);
            assert_eq!(r.bundle_id.as_deref(), Some("com.app"));
            assert_eq!(r.purchases, vec![r.receipt.clone()]);
            assert!(r.latest_receipt_info.is_some());
        }
    }

    #[test]
    fn test_null_latest_receipt_info_falls_through() {
        let r = parse_with(
            json!({
                "status": 0,
                "latest_receipt_info": null,
                "latest_expired_receipt_info": [{"b": 2}],
            }),
            InAppSource::default(),
        );
        assert_eq!(r.latest_receipt_info.unwrap()[0]["b"], 2);
    }

    #[test]
    fn test_legacy_quirk_requires_nested_array() {
        let document = json!({
            "status": 0,
            "receipt": {"bid": "com.app"},
            "in_app": [{"product_id": "top"}],
        });
        let r = parse_with(document, InAppSource::LegacyQuirk);
        assert_eq!(r.purchases, vec![r.receipt.clone()]);

        // The nested array only gates the lookup; its contents are not used.
        let document = json!({"status": 0, "receipt": {"in_app": [{"product_id": "nested"}]}});
        let r = parse_with(document, InAppSource::LegacyQuirk);
        assert_eq!(r.purchases, vec![r.receipt.clone()]);
    }

    #[test]
    fn test_empty_in_app_falls_back_to_receipt() {
        let r = parse_with(
            json!({"status": 0, "receipt": {"bundle_id": "com.app"}, "in_app": []}),
            InAppSource::default(),
        );
        assert_eq!(r.purchases.len(), 1);
        assert_eq!(r.purchases[0]["bundle_id"], "com.app");
    }

    #[test]
    fn test_latest_receipt_and_environment() {
        let r = parse_with(
            json!({"status": 0, "latest_receipt": "aGVsbG8=", "environment": "Sandbox"}),
            InAppSource::default(),
        );
        assert_eq!(r.latest_receipt.as_deref(), Some("aGVsbG8="));
        assert_eq!(r.environment, Some(Environment::Sandbox));

        let r = parse_with(json!({"status": 0, "environment": "Beta"}), InAppSource::default());
        assert_eq!(r.environment, Some(Environment::Unknown("Beta".to_string())));
    }

    #[test]
    fn test_latest_receipt_info_prefers_current_key() {
        let r = parse_with(
            json!({
                "status": 0,
                "latest_receipt_info": [{"a": 1}],
                "latest_expired_receipt_info": [{"b": 2}],
            }),
            InAppSource::default(),
        );
        assert_eq!(r.latest_receipt_info.unwrap()[0]["a"], 1);
    }

    #[test]
    fn test_typed_purchases_accept_string_encoded_values() {
        let purchases = vec![json!({
            "product_id": "com.app.monthly",
            "transaction_id": "1000000123",
            "original_transaction_id": "1000000001",
            "quantity": "1",
            "purchase_date_ms": "1579000000000",
            "expires_date_ms": 1581678400000u64,
            "is_trial_period": "true",
            "is_in_intro_offer_period": false,
            "purchase_date": "2020-01-14 11:06:40 Etc/GMT",
        })
        .as_object()
        .unwrap()
        .clone()];

        let typed = typed_purchases(&purchases).unwrap();
        assert_eq!(typed.len(), 1);
        let p = &typed[0];
        assert_eq!(p.product_id.as_deref(), Some("com.app.monthly"));
        assert_eq!(p.quantity, Some(1));
        assert_eq!(p.purchase_time.unwrap().timestamp_millis(), 1_579_000_000_000);
        assert_eq!(p.expiration_time.unwrap().timestamp_millis(), 1_581_678_400_000);
        assert!(p.is_trial_period);
        assert!(!p.is_in_intro_offer_period);
        assert!(!p.is_cancelled());
    }

    #[test]
    fn test_typed_purchases_report_offending_index() {
        let purchases = vec![
            json!({"product_id": "ok"}).as_object().unwrap().clone(),
            json!({"quantity": "many"}).as_object().unwrap().clone(),
        ];
        match typed_purchases(&purchases) {
            Err(ReceiptResponseError::InvalidPurchase { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
