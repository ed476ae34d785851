pub mod course;
pub mod enrollment;
pub mod lesson;
pub mod payment;
pub mod profile;
pub mod progress;
pub mod quiz;
