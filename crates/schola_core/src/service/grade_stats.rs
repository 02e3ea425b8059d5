//! Grade averages derived from a snapshot.
//!
//! All averages are on a ten-point scale. A subject with no grades has no
//! average at all, so it never drags the overall figure towards zero.

use crate::model::grade::Grade;
use crate::model::snapshot::PlannerSnapshot;
use crate::model::RecordId;

/// Per-subject average row, in subject order.
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectAverage {
    pub subject_id: RecordId,
    pub name: String,
    pub color: String,
    /// Weighted average, one decimal.
    pub average: f64,
    pub grade_count: usize,
}

/// `Σ(value / max × 10 × weight) / Σ weight`, rounded to one decimal.
///
/// Returns `None` for an empty set of grades.
pub fn weighted_average<'a>(grades: impl IntoIterator<Item = &'a Grade>) -> Option<f64> {
    let (weighted_sum, weight_sum) = grades
        .into_iter()
        .fold((0.0, 0.0), |(weighted, weights), grade| {
            (
                weighted + grade.score_out_of_ten() * grade.weight,
                weights + grade.weight,
            )
        });

    if weight_sum <= 0.0 {
        return None;
    }
    Some(round_to(weighted_sum / weight_sum, 1))
}

/// Weighted average of one subject's grades.
pub fn subject_average(snapshot: &PlannerSnapshot, subject_id: &str) -> Option<f64> {
    weighted_average(
        snapshot
            .grades
            .iter()
            .filter(|grade| grade.subject_id == subject_id),
    )
}

/// One row per subject that has at least one grade.
pub fn subject_averages(snapshot: &PlannerSnapshot) -> Vec<SubjectAverage> {
    snapshot
        .subjects
        .iter()
        .filter_map(|subject| {
            let grades: Vec<&Grade> = snapshot
                .grades
                .iter()
                .filter(|grade| grade.subject_id == subject.id)
                .collect();
            let average = weighted_average(grades.iter().copied())?;
            Some(SubjectAverage {
                subject_id: subject.id.clone(),
                name: subject.name.clone(),
                color: subject.color.clone(),
                average,
                grade_count: grades.len(),
            })
        })
        .collect()
}

/// Unweighted mean of the per-subject averages, rounded to two decimals.
///
/// Every graded subject counts once regardless of how many grades it has.
pub fn overall_average(snapshot: &PlannerSnapshot) -> Option<f64> {
    let averages = subject_averages(snapshot);
    if averages.is_empty() {
        return None;
    }
    let sum: f64 = averages.iter().map(|row| row.average).sum();
    Some(round_to(sum / averages.len() as f64, 2))
}

/// Grades newest first (reverse insertion order).
pub fn recent_grades(snapshot: &PlannerSnapshot) -> Vec<&Grade> {
    snapshot.grades.iter().rev().collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn round_to_handles_one_and_two_decimals() {
        assert_eq!(round_to(6.666_666, 1), 6.7);
        assert_eq!(round_to(1.234_56, 2), 1.23);
        assert_eq!(round_to(7.25, 1), 7.3);
    }
}
