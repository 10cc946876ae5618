use serde::{Deserialize, Serialize};

/// Environment the verifyReceipt endpoint reports having validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// The receipt was validated by the sandbox endpoint.
    Sandbox,
    /// The receipt was validated by the production endpoint.
    Production,

    #[serde(untagged)]
    Unknown(String),
}
