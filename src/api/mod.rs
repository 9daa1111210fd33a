//! REST API client module for the preventivi gateway.
//!
//! This module provides the `ApiClient` for logging in, registering and
//! fetching loan quotes, and the `ApiError` taxonomy every operation
//! reports through.
//!
//! The gateway uses bearer token authentication; tokens are obtained from
//! the login and register endpoints and attached to authenticated requests.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
