//! Data models for the preventivi service.
//!
//! This module contains the data structures exchanged with the gateway
//! and persisted locally:
//!
//! - `User`: authenticated user profile
//! - `Quote`, `QuoteStatus`: loan quote records and their review status
//!
//! Wire-facing types carry `serde(rename)` attributes matching the
//! gateway's own field naming; Rust-side names stay idiomatic.

pub mod quote;
pub mod user;

pub use quote::{Quote, QuoteStatus};
pub use user::User;
