pub mod course;
pub mod enrollment;
pub mod extract;
pub mod health;
pub mod lesson;
pub mod payment;
pub mod profile;
pub mod progress;
pub mod quiz;

use serde::Serialize;

/// `{ "message": ... }` body returned by deletes.
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
