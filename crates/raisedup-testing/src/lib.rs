//! Test utilities for RaisedUp crates.
//!
//! Provides `MockAuth` for minting bearer tokens the API accepts.
//! Import from dev-dependencies only, never in production code.

pub mod auth;
