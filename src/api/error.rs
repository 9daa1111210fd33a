use thiserror::Error;

use crate::auth::StorageError;

/// Fallback message when the server gives no structured error.
const FALLBACK_SERVER_MESSAGE: &str = "Errore del server";

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error taxonomy for all gateway operations.
///
/// Every variant's `Display` output is suitable for showing to the user
/// directly; localized fallbacks cover the cases where the server provides
/// no structured message.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response reached the client (DNS failure, connection refused,
    /// timeout). Safe for the caller to retry.
    #[error("Errore di connessione. Verifica la tua connessione internet.")]
    Network(#[source] reqwest::Error),

    /// Login or registration rejected by the server; carries the server's
    /// own message so the form can display it.
    #[error("{0}")]
    Credentials(String),

    /// The server answered 401 on an authenticated call. The session store
    /// has already been cleared; the caller must route to re-authentication.
    #[error("Sessione scaduta. Effettua di nuovo l'accesso.")]
    SessionExpired,

    /// An authenticated call was attempted with no stored session. Detected
    /// before any request is sent.
    #[error("Nessun token di autenticazione presente.")]
    MissingToken,

    /// Any other non-success status; carries the server message or the
    /// generic fallback.
    #[error("{0}")]
    Request(String),

    /// The server answered 2xx but the body could not be decoded.
    #[error("Risposta del server non valida: {0}")]
    InvalidResponse(String),

    /// The session could not be persisted or cleared.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// True for failures that mean the caller must go through login again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::MissingToken)
    }

    /// Extract a displayable message from a non-success response body.
    /// The gateway uses `{"message": ...}` or `{"error": ...}`; unstructured
    /// bodies are passed through as-is, empty ones get the fallback.
    pub(crate) fn server_message(body: &str) -> String {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            error: Option<String>,
        }

        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(message) = parsed.message.or(parsed.error) {
                if !message.is_empty() {
                    return message;
                }
            }
        }

        let trimmed = body.trim();
        if trimmed.is_empty() {
            FALLBACK_SERVER_MESSAGE.to_string()
        } else {
            Self::truncate_body(trimmed)
        }
    }

    /// Truncate a response body to avoid carrying excessive data around.
    /// The cut point backs off to a char boundary so multi-byte text never
    /// splits mid-character.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut cut = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..cut],
                body.len()
            )
        }
    }
}
