//! Form model: one widget per question, submit-time validation.
//!
//! Form fields are named `question_{id}`. Raw values arrive as posted by the
//! browser; an unchecked radio group or an empty textarea means "absent".
//! Required-ness is only checked here, at submit time. Rendering to HTML is
//! done by [`crate::pages`] from the [`FieldView`]s built below.

use std::collections::{BTreeMap, HashMap};

use crate::coercion::CoercionError;
use crate::models::{Answer, Question, QuestionType};
use crate::pages;
use crate::survey::Survey;

const FIELD_PREFIX: &str = "question_";

/// Form field name for a question.
pub fn field_name(question_id: i64) -> String {
    format!("{FIELD_PREFIX}{question_id}")
}

/// The input control used for a question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    /// Exclusive choice among 1..=5.
    RatingScale,
    /// Exclusive choice between "true" and "false".
    YesNo,
    /// Free-form multi-line text.
    TextArea,
}

impl QuestionType {
    pub fn widget(self) -> Widget {
        match self {
            Self::Rating => Widget::RatingScale,
            Self::YesNo => Widget::YesNo,
            Self::Text => Widget::TextArea,
        }
    }
}

/// Raw values entered by the user, keyed by question id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    values: BTreeMap<i64, String>,
}

impl FormInput {
    /// Pick the `question_{id}` fields out of a posted form.
    ///
    /// Only the exact name [`field_name`] produces is accepted, so
    /// `question_01` or `question_+1` can never stand in for question 1.
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        let values = fields
            .into_iter()
            .filter_map(|(name, value)| {
                let id = name.strip_prefix(FIELD_PREFIX)?.parse::<i64>().ok()?;
                (field_name(id) == name).then_some((id, value))
            })
            .collect();
        Self { values }
    }

    pub fn set(&mut self, question_id: i64, value: impl Into<String>) {
        self.values.insert(question_id, value.into());
    }

    /// The raw value, `None` when absent or empty.
    pub fn raw(&self, question_id: i64) -> Option<&str> {
        self.values
            .get(&question_id)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Why a single question blocks submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    Invalid(CoercionError),
}

impl FieldError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => pages::MSG_REQUIRED,
            Self::Invalid(_) => pages::MSG_INVALID_VALUE,
        }
    }
}

/// Validation errors by question id.
pub type FieldErrors = BTreeMap<i64, FieldError>;

/// Ids of required questions without a raw value.
pub fn missing_required(survey: &Survey, input: &FormInput) -> Vec<i64> {
    survey
        .questions()
        .iter()
        .filter(|q| q.is_required && input.raw(q.id).is_none())
        .map(|q| q.id)
        .collect()
}

/// Validate the form and build the answer set.
///
/// Absent optional answers are left out. Any required question without a
/// value, or any value outside its widget's domain, fails the whole form.
pub fn collect_answers(survey: &Survey, input: &FormInput) -> Result<Vec<Answer>, FieldErrors> {
    let mut errors: FieldErrors = missing_required(survey, input)
        .into_iter()
        .map(|id| (id, FieldError::Required))
        .collect();
    let mut answers = Vec::with_capacity(survey.questions().len());

    for question in survey.questions() {
        match question.kind.coerce(input.raw(question.id)) {
            Ok(Some(value)) => answers.push(Answer {
                question_id: question.id,
                answer: value,
            }),
            Ok(None) => {}
            Err(e) => {
                errors.insert(question.id, FieldError::Invalid(e));
            }
        }
    }

    if errors.is_empty() {
        Ok(answers)
    } else {
        Err(errors)
    }
}

/// Everything needed to render one question.
#[derive(Debug, Clone, Copy)]
pub struct FieldView<'a> {
    pub question: &'a Question,
    pub widget: Widget,
    pub raw: Option<&'a str>,
    pub error: Option<&'a FieldError>,
}

impl FieldView<'_> {
    pub fn name(&self) -> String {
        field_name(self.question.id)
    }
}

/// Field views in display order.
pub fn field_views<'a>(
    survey: &'a Survey,
    input: &'a FormInput,
    errors: &'a FieldErrors,
) -> Vec<FieldView<'a>> {
    survey
        .questions()
        .iter()
        .map(|question| FieldView {
            question,
            widget: question.kind.widget(),
            raw: input.raw(question.id),
            error: errors.get(&question.id),
        })
        .collect()
}
