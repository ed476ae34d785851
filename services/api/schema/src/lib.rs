//! sea-orm entities for the RaisedUp API database.

pub mod courses;
pub mod enrollments;
pub mod lessons;
pub mod payments;
pub mod profiles;
pub mod progress;
pub mod quiz_questions;
pub mod quiz_results;
pub mod quizzes;
