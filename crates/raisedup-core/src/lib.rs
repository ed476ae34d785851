//! Cross-cutting infrastructure shared by RaisedUp services: configuration
//! loading, the JSON error envelope, request-id middleware, health probes and
//! tracing setup.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
