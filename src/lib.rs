pub(crate) mod data {
    pub(crate) mod models {
        pub(crate) mod verify_receipt {
            pub(crate) mod in_app_purchase_model;
        }
    }
    pub(crate) mod parsers {
        pub(crate) mod field_resolution;
        pub(crate) mod receipt_response_parser;
    }
}

pub mod domain {
    pub mod entities {
        pub mod environment;
        pub mod in_app_purchase;
        pub mod receipt_response;
        pub mod result_code;
    }
}

pub mod config;
pub mod errors;
pub mod util;

pub use config::{InAppSource, ReceiptParserConfig};
pub use domain::entities::{
    environment::Environment, in_app_purchase::InAppPurchase, receipt_response::ReceiptResponse,
    result_code::ResultCode,
};
pub use errors::ReceiptResponseError;
pub use util::ReceiptParser;
