//! Wire models shared with the survey API collaborator.
//!
//! These structs mirror the JSON documents exchanged with
//! `GET /public/surveys/{token}/` and `POST /public/surveys/{token}/submit/`.
//! They carry no behavior beyond (de)serialization; the sorted, read-only
//! view of a survey lives in [`crate::survey`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

// ============================================================================
// Survey document (GET /public/surveys/{token}/)
// ============================================================================

/// Which group of questions a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Pickup,
    TireService,
    Common,
}

/// The per-question type tag. Decides both the widget and the coercion rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Rating,
    YesNo,
    Text,
}

/// Which services the surveyed order went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Pickup,
    TireService,
    Both,
}

/// A service location, display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub id: i64,
    pub name: String,
    pub city: String,
}

/// A single survey question as returned by the collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub category: QuestionCategory,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub is_required: bool,
    pub order: i64,
}

/// The survey document exactly as fetched. Question order is not trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRecord {
    pub token: String,
    pub order_number: String,
    pub service_type: ServiceType,
    pub completed: bool,
    pub point: Point,
    pub questions: Vec<Question>,
}

// ============================================================================
// Submission (POST /public/surveys/{token}/submit/)
// ============================================================================

/// A typed answer value. Serializes as a bare JSON number, bool or string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Rating(u8),
    YesNo(bool),
    Text(String),
}

/// One answered question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: i64,
    pub answer: AnswerValue,
}

/// Request body for the submit endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitRequest {
    pub answers: Vec<Answer>,
}

/// Platform name (`"2gis"`, `"yandex"`, ...) to outbound review URL.
pub type ReviewLinks = BTreeMap<String, String>;

/// The collaborator's verdict on a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmissionResult {
    pub show_review_page: bool,
    #[serde(default)]
    pub review_links: Option<ReviewLinks>,
}

// ============================================================================
// Route token
// ============================================================================

/// Longest token accepted from the URL.
const MAX_TOKEN_LEN: usize = 64;

/// A survey token taken from the URL path.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted, so the token can be
/// placed into an upstream URL path as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SurveyToken(String);

impl SurveyToken {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let well_formed = !raw.is_empty()
            && raw.len() <= MAX_TOKEN_LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');

        if well_formed {
            Ok(Self(raw.to_string()))
        } else {
            Err(ApiError::MalformedToken)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurveyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_survey_record_deserializes_collaborator_payload() {
        let record: SurveyRecord = serde_json::from_value(json!({
            "token": "0b5c4a4e-7d3f-4f5b-9a51-0c7f1b1f2a10",
            "order_number": "A-1001",
            "service_type": "tire_service",
            "completed": false,
            "point": {"id": 3, "name": "Central", "city": "Kazan"},
            "questions": [
                {"id": 7, "text": "How was it?", "category": "common",
                 "type": "yes_no", "is_required": true, "order": 2}
            ]
        }))
        .expect("valid survey payload");

        assert_eq!(record.service_type, ServiceType::TireService);
        assert_eq!(record.questions[0].kind, QuestionType::YesNo);
        assert_eq!(record.questions[0].category, QuestionCategory::Common);
        assert_eq!(record.point.city, "Kazan");
    }

    #[test]
    fn test_answers_serialize_as_bare_values() {
        let body = SubmitRequest {
            answers: vec![
                Answer { question_id: 1, answer: AnswerValue::Rating(5) },
                Answer { question_id: 2, answer: AnswerValue::YesNo(false) },
                Answer { question_id: 3, answer: AnswerValue::Text("ok".into()) },
            ],
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"answers": [
                {"question_id": 1, "answer": 5},
                {"question_id": 2, "answer": false},
                {"question_id": 3, "answer": "ok"}
            ]})
        );
    }

    #[test]
    fn test_submission_result_with_null_links() {
        let result: SubmissionResult =
            serde_json::from_value(json!({"show_review_page": false, "review_links": null}))
                .unwrap();
        assert!(!result.show_review_page);
        assert!(result.review_links.is_none());
    }

    #[test]
    fn test_token_rejects_path_characters() {
        assert!(SurveyToken::parse("0b5c4a4e-7d3f_ABC").is_ok());
        assert!(SurveyToken::parse("").is_err());
        assert!(SurveyToken::parse("../admin").is_err());
        assert!(SurveyToken::parse("a b").is_err());
        assert!(SurveyToken::parse(&"x".repeat(65)).is_err());
    }
}
