//! Survey entry point.
//!
//! GET  /s/{token} - Fetch the survey and render its form
//! POST /s/{token} - Validate, submit and branch to review or thank-you

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Path;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Form, Router};
use tracing::warn;

use crate::controller::SubmitOutcome;
use crate::error::PageError;
use crate::form::{FieldErrors, FormInput};
use crate::models::SurveyToken;
use crate::pages;
use crate::state::AppState;
use crate::survey::{self, FetchOutcome, Survey};

/// Build the survey router.
pub fn router() -> Router {
    Router::new().route("/s/{token}", get(show_survey).post(submit_survey))
}

/// Run the fetch gate and render the form.
///
/// A completed survey never shows its form; the user goes straight to the
/// thank-you screen.
async fn show_survey(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
) -> Response {
    match survey::fetch(state.api.as_ref(), &token).await {
        FetchOutcome::Ready(survey) => {
            state.surveys.insert(Arc::clone(&survey));
            Html(pages::survey_page(
                &survey,
                &FormInput::default(),
                &FieldErrors::new(),
                None,
            ))
            .into_response()
        }
        FetchOutcome::AlreadyCompleted => Redirect::to("/thanks").into_response(),
        FetchOutcome::Failed(_) => PageError::LoadFailed.into_response(),
    }
}

/// Handle a submit intent for the survey rendered under this token.
async fn submit_survey(
    Extension(state): Extension<AppState>,
    Path(token): Path<String>,
    Form(fields): Form<HashMap<String, String>>,
) -> Response {
    let survey = match rendered_survey(&state, &token).await {
        Ok(survey) => survey,
        Err(response) => return response,
    };
    let input = FormInput::from_fields(fields);

    match state.submissions.submit(&survey, &input).await {
        SubmitOutcome::Review(ticket) => {
            state.surveys.evict(survey.token());
            Redirect::to(&format!("/review?ticket={ticket}")).into_response()
        }
        SubmitOutcome::Thanks => {
            state.surveys.evict(survey.token());
            Redirect::to("/thanks").into_response()
        }
        SubmitOutcome::Invalid(errors) => {
            form_with_error(&survey, &input, &errors, PageError::Invalid)
        }
        other => {
            let error = other.page_error().unwrap_or(PageError::SubmitFailed);
            form_with_error(&survey, &input, &FieldErrors::new(), error)
        }
    }
}

/// The survey as it was rendered, or a fresh pass through the fetch gate.
async fn rendered_survey(state: &AppState, raw_token: &str) -> Result<Arc<Survey>, Response> {
    if let Ok(token) = SurveyToken::parse(raw_token) {
        if let Some(survey) = state.surveys.get(&token) {
            return Ok(survey);
        }
    }

    match survey::fetch(state.api.as_ref(), raw_token).await {
        FetchOutcome::Ready(survey) => {
            state.surveys.insert(Arc::clone(&survey));
            Ok(survey)
        }
        FetchOutcome::AlreadyCompleted => Err(Redirect::to("/thanks").into_response()),
        FetchOutcome::Failed(e) => {
            warn!(
                "Submit for survey {:?} found no rendered copy and could not reload it, posted answers dropped: {}",
                raw_token, e
            );
            Err(PageError::LoadFailed.into_response())
        }
    }
}

/// Re-render the form with everything the user entered still in place.
fn form_with_error(
    survey: &Survey,
    input: &FormInput,
    errors: &FieldErrors,
    error: PageError,
) -> Response {
    (
        error.status_code(),
        Html(pages::survey_page(survey, input, errors, Some(error.message()))),
    )
        .into_response()
}
