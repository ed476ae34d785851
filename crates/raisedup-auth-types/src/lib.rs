//! Auth types shared across RaisedUp crates.
//!
//! Provides bearer-token validation for identity-provider JWTs and the
//! `AuthUser` extractor used by authenticated handlers.

pub mod bearer;
pub mod token;
