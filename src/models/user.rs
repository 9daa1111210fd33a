use serde::{Deserialize, Serialize};

/// Authenticated user profile as returned by the gateway and persisted
/// locally alongside the bearer token.
///
/// Wire and storage field names are the gateway's own (`nome`/`cognome`);
/// they are part of the storage contract, so existing stored sessions keep
/// working across upgrades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "cognome")]
    pub last_name: String,
    pub email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
