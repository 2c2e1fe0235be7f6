//! Answer coercion: raw widget output to a typed answer value.
//!
//! Empty input is always "absent" (`Ok(None)`), whatever the question's
//! required flag says; required-ness is a submission concern handled in
//! [`crate::form`].

use std::ops::RangeInclusive;

use thiserror::Error;

use crate::models::{AnswerValue, QuestionType};

/// The values offered by the rating widget.
pub const RATING_SCALE: RangeInclusive<u8> = 1..=5;

/// A raw value the widget for this question type could never produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("rating must be an integer from 1 to 5, got {0:?}")]
    RatingOutOfRange(String),

    #[error("yes/no answer must be \"true\" or \"false\", got {0:?}")]
    NotYesNo(String),
}

impl QuestionType {
    /// Coerce a raw form value into this type's answer value.
    pub fn coerce(self, raw: Option<&str>) -> Result<Option<AnswerValue>, CoercionError> {
        let raw = match raw {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };

        let value = match self {
            Self::Rating => {
                // Match the widget's exact values; "+5" and "05" are not among them.
                let mut scale = RATING_SCALE;
                let rating = scale
                    .find(|n| n.to_string() == raw)
                    .ok_or_else(|| CoercionError::RatingOutOfRange(raw.to_string()))?;
                AnswerValue::Rating(rating)
            }
            Self::YesNo => match raw {
                "true" => AnswerValue::YesNo(true),
                "false" => AnswerValue::YesNo(false),
                other => return Err(CoercionError::NotYesNo(other.to_string())),
            },
            Self::Text => AnswerValue::Text(raw.to_string()),
        };

        Ok(Some(value))
    }
}
