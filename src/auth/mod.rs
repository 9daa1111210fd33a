//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: durable storage for the bearer token and user profile
//! - `Session`: the in-memory view of an authenticated session
//!
//! The token and profile are persisted under fixed keys and are always
//! written and cleared together.

pub mod session;

pub use session::{Session, SessionStore, StorageError};
