//! Grades recorded per subject.

use super::{
    new_record_id, require_date, require_positive, require_text, RecordId, ValidationError,
};
use serde::{Deserialize, Deserializer, Serialize};

/// Standard weight for a grade.
pub const DEFAULT_GRADE_WEIGHT: f64 = 1.0;

fn default_weight() -> f64 {
    DEFAULT_GRADE_WEIGHT
}

/// Treats a stored `null` weight (a cleared form field) as the standard weight.
fn weight_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(DEFAULT_GRADE_WEIGHT))
}

/// Kind of assessment a grade came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeKind {
    Oral,
    #[default]
    Written,
    Practical,
}

/// One grade. `value` is measured on a `0..=max` scale (e.g. 10 or 100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: RecordId,
    pub subject_id: RecordId,
    pub value: f64,
    pub max: f64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: GradeKind,
    #[serde(default = "default_weight", deserialize_with = "weight_or_default")]
    pub weight: f64,
}

impl Grade {
    /// Value normalized to a ten-point scale.
    pub fn score_out_of_ten(&self) -> f64 {
        self.value / self.max * 10.0
    }
}

/// Creation payload for [`Grade`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub subject_id: RecordId,
    pub value: f64,
    pub max: f64,
    pub date: String,
    pub kind: GradeKind,
    pub weight: f64,
}

impl NewGrade {
    /// Written grade with the standard weight.
    pub fn new(
        subject_id: impl Into<RecordId>,
        value: f64,
        max: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            value,
            max,
            date: date.into(),
            kind: GradeKind::default(),
            weight: DEFAULT_GRADE_WEIGHT,
        }
    }

    pub fn with_kind(mut self, kind: GradeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("subjectId", &self.subject_id)?;
        require_positive("value", self.value)?;
        require_positive("max", self.max)?;
        require_positive("weight", self.weight)?;
        require_date("date", &self.date)
    }

    pub(crate) fn into_record(self) -> Grade {
        Grade {
            id: new_record_id(),
            subject_id: self.subject_id,
            value: self.value,
            max: self.max,
            date: self.date,
            kind: self.kind,
            weight: self.weight,
        }
    }
}
