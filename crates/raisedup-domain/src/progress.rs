//! Course progress aggregation.

use serde::{Deserialize, Serialize};

/// Whole-number percentage of `part` over `total`, rounding halves up.
///
/// Returns 0 when `total` is 0.
pub fn rounded_percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (u64::from(part), u64::from(total));
    ((200 * part + total) / (2 * total)) as u32
}

/// Completion counts for one user in one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub total_lessons: u32,
    pub completed_lessons: u32,
    pub progress_percentage: u32,
}

impl ProgressSummary {
    /// Summarize completion flags of the user's progress rows for a course
    /// with `total_lessons` lessons.
    pub fn from_flags<I>(total_lessons: u32, completed_flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let completed_lessons = completed_flags.into_iter().filter(|done| *done).count() as u32;
        Self {
            total_lessons,
            completed_lessons,
            progress_percentage: rounded_percentage(completed_lessons, total_lessons),
        }
    }
}
