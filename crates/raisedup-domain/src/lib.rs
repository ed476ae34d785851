//! Domain types and rules shared across RaisedUp crates.
//!
//! Pure types and arithmetic with no framework dependencies.

pub mod payment;
pub mod progress;
pub mod quiz;
pub mod role;
