//! Quiz answer keys and scoring.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::progress::rounded_percentage;

/// Correct answer as supplied by an instructor when authoring a question.
///
/// Accepts either an option index (`2`) or the exact option text
/// (`"font-size"`). Stored answers are always indices; see
/// [`AnswerKey::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerKey {
    Index(i64),
    Text(String),
}

/// Error returned when an [`AnswerKey`] does not name one of the options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnswerKeyError {
    #[error("question has no options")]
    NoOptions,
    #[error("answer index {index} out of range for {len} options")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("answer {0:?} does not match any option")]
    UnknownOption(String),
}

impl AnswerKey {
    /// Normalize to a zero-based option index.
    pub fn resolve(&self, options: &[String]) -> Result<i32, AnswerKeyError> {
        if options.is_empty() {
            return Err(AnswerKeyError::NoOptions);
        }
        match self {
            Self::Index(index) => {
                if *index >= 0 && (*index as usize) < options.len() {
                    Ok(*index as i32)
                } else {
                    Err(AnswerKeyError::IndexOutOfRange {
                        index: *index,
                        len: options.len(),
                    })
                }
            }
            Self::Text(text) => options
                .iter()
                .position(|o| o == text)
                .map(|i| i as i32)
                .ok_or_else(|| AnswerKeyError::UnknownOption(text.clone())),
        }
    }
}

/// Outcome of grading one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScore {
    /// Raw number of matching answers.
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
    pub passed: bool,
}

/// Grade `answers` against the ordered correct option indices.
///
/// `answers[i]` is compared to `correct_indices[i]`; extra answers are
/// ignored and missing ones count as wrong. A quiz without questions scores
/// 0%.
pub fn grade(correct_indices: &[i32], answers: &[Option<i64>], passing_score: i32) -> QuizScore {
    let correct = correct_indices
        .iter()
        .enumerate()
        .filter(|(i, key)| matches!(answers.get(*i), Some(Some(a)) if *a == i64::from(**key)))
        .count() as u32;
    let total = correct_indices.len() as u32;
    let percentage = rounded_percentage(correct, total);
    QuizScore {
        correct,
        total,
        percentage,
        passed: percentage as i64 >= i64::from(passing_score),
    }
}
