//! Pre-validation correction for the credit-risk dataset.
//!
//! Ages above 100 are assumed to carry an extra leading digit (`144` typed for
//! `44`) and are reduced by 100. The pass runs exactly once: an age of 250
//! becomes 150 and is left for the row validator to reject.

use serde::Serialize;

use crate::domain::{Dataset, Value};

pub const AGE_COLUMN: &str = "person_age";
pub const AGE_CEILING: i64 = 100;
pub const AGE_TYPO_OFFSET: i64 = 100;

/// Outcome of one correction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeCorrection {
    pub corrected: usize,
}

impl AgeCorrection {
    pub fn message(&self) -> String {
        if self.corrected == 0 {
            "No unrealistic ages found to correct.".to_string()
        } else {
            format!(
                "Corrected {} rows with unrealistic ages by subtracting {AGE_TYPO_OFFSET}.",
                self.corrected
            )
        }
    }
}

/// Rewrite every `person_age > 100` in place. Non-numeric cells are untouched.
pub fn correct_unrealistic_ages(dataset: &mut Dataset) -> AgeCorrection {
    let Some(ages) = dataset.column_mut(AGE_COLUMN) else {
        return AgeCorrection { corrected: 0 };
    };

    let mut corrected = 0usize;
    for cell in ages {
        match cell {
            Value::Int(age) if *age > AGE_CEILING => {
                *age -= AGE_TYPO_OFFSET;
                corrected += 1;
            }
            Value::Float(age) if *age > AGE_CEILING as f64 => {
                *age -= AGE_TYPO_OFFSET as f64;
                corrected += 1;
            }
            _ => {}
        }
    }

    if corrected > 0 {
        tracing::warn!(corrected, column = AGE_COLUMN, "applied age typo correction");
    }

    AgeCorrection { corrected }
}
