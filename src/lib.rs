//! Client core for the preventivi loan-quote service.
//!
//! The external gateway is the system of record; this crate owns the two
//! client-side pieces with real invariants:
//!
//! - [`auth::SessionStore`]: durable storage for the bearer token and user
//!   profile, always written and cleared together.
//! - [`api::ApiClient`]: login, registration and quote fetching with a
//!   typed error taxonomy; a 401 on the quotes endpoint clears the session
//!   and reports it as expired so callers can route to re-authentication.
//!
//! Presentation front-ends (the bundled CLI, or any other UI) consume these
//! two types and decide navigation themselves; the core never does.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use auth::{Session, SessionStore, StorageError};
pub use config::Config;
pub use models::{Quote, QuoteStatus, User};
