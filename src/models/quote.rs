// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use serde::{Deserialize, Serialize};

/// Review status of a loan quote, derived from the gateway's `stato` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStatus {
    Pending,
    Approved,
    Rejected,
}

impl QuoteStatus {
    /// Parse the gateway status string, case-insensitively.
    /// Unrecognized values are shown as pending.
    pub fn from_stato(stato: &str) -> Self {
        match stato.to_lowercase().as_str() {
            "approvato" => QuoteStatus::Approved,
            "rifiutato" => QuoteStatus::Rejected,
            "in attesa" => QuoteStatus::Pending,
            _ => QuoteStatus::Pending,
        }
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteStatus::Pending => write!(f, "In attesa"),
            QuoteStatus::Approved => write!(f, "Approvato"),
            QuoteStatus::Rejected => write!(f, "Rifiutato"),
        }
    }
}

/// A loan quote ("preventivo") owned and mutated by the external service.
/// The client only ever reads the list scoped to the authenticated user.
///
/// Monetary amounts arrive as decimal strings and are kept as such; they are
/// display values, not numbers this client does arithmetic on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: i64,
    #[serde(rename = "cliente_id")]
    pub customer_id: Option<i64>,
    #[serde(rename = "utente_api_id")]
    pub owner_user_id: i64,
    #[serde(rename = "nome")]
    pub first_name: String,
    #[serde(rename = "cognome")]
    pub last_name: String,
    #[serde(rename = "data_nascita")]
    pub birth_date: Option<String>,
    #[serde(rename = "codice_fiscale")]
    pub fiscal_code: Option<String>,
    #[serde(rename = "indirizzo")]
    pub address: Option<String>,
    #[serde(rename = "numero_telefono")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "occupazione")]
    pub occupation: Option<String>,
    #[serde(rename = "reddito_mensile")]
    pub monthly_income: Option<String>,
    #[serde(rename = "importo_richiesto")]
    pub requested_amount: String,
    #[serde(rename = "numero_rate")]
    pub installments: i64,
    #[serde(rename = "rata_mensile")]
    pub monthly_installment: String,
    #[serde(rename = "finalita")]
    pub purpose: Option<String>,
    #[serde(rename = "stato")]
    pub raw_status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Quote {
    pub fn status(&self) -> QuoteStatus {
        QuoteStatus::from_stato(&self.raw_status)
    }

    pub fn applicant_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
