//! Submission controller.
//!
//! One submit intent runs `idle -> submitting -> {review | thanks | error}`:
//!
//! 1. Reject the intent if a submission for the same token is in flight
//! 2. Validate required questions and coerce raw values (no network on failure)
//! 3. POST the answer set to the collaborator
//! 4. Branch on `show_review_page`, depositing review links for the review screen
//!
//! The caller keeps ownership of the entered [`FormInput`], so a failed
//! attempt can be re-rendered and retried with nothing lost.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{error, info, warn};

use crate::api::SurveyApi;
use crate::error::{ApiError, PageError};
use crate::form::{self, FieldErrors, FormInput};
use crate::handoff::{ReviewHandoffStore, ReviewTicket};
use crate::models::{SubmissionResult, SubmitRequest, SurveyToken};
use crate::survey::Survey;

/// Where a submit intent ended up.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blocked locally; the collaborator was not contacted.
    Invalid(FieldErrors),
    /// Another submission for this token is still outstanding.
    Busy,
    /// Accepted, review links deposited under the ticket.
    Review(ReviewTicket),
    /// Accepted, generic thank-you.
    Thanks,
    /// Transport or collaborator failure. Retry is allowed.
    Failed(ApiError),
}

impl SubmitOutcome {
    /// The user-visible error for outcomes that keep the user on the form.
    pub fn page_error(&self) -> Option<PageError> {
        match self {
            Self::Invalid(_) => Some(PageError::Invalid),
            Self::Busy => Some(PageError::Busy),
            Self::Failed(_) => Some(PageError::SubmitFailed),
            Self::Review(_) | Self::Thanks => None,
        }
    }
}

// ============================================================================
// In-flight guard
// ============================================================================

/// Tokens with a submission currently outstanding.
#[derive(Default)]
pub struct InFlightSubmissions {
    tokens: Mutex<HashSet<SurveyToken>>,
}

impl InFlightSubmissions {
    /// Mark the token as submitting; `None` if it already is.
    pub fn try_begin(&self, token: &SurveyToken) -> Option<InFlightGuard<'_>> {
        let inserted = self
            .tokens
            .lock()
            .expect("in-flight lock poisoned")
            .insert(token.clone());

        inserted.then(|| InFlightGuard {
            owner: self,
            token: token.clone(),
        })
    }

    pub fn is_submitting(&self, token: &SurveyToken) -> bool {
        self.tokens
            .lock()
            .expect("in-flight lock poisoned")
            .contains(token)
    }
}

/// Releases the token when the submission finishes, however it finishes.
pub struct InFlightGuard<'a> {
    owner: &'a InFlightSubmissions,
    token: SurveyToken,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut tokens) = self.owner.tokens.lock() {
            tokens.remove(&self.token);
        }
    }
}

// ============================================================================
// Controller
// ============================================================================

pub struct SubmissionController {
    api: Arc<dyn SurveyApi>,
    handoff: Arc<ReviewHandoffStore>,
    in_flight: InFlightSubmissions,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn SurveyApi>, handoff: Arc<ReviewHandoffStore>) -> Self {
        Self {
            api,
            handoff,
            in_flight: InFlightSubmissions::default(),
        }
    }

    pub fn in_flight(&self) -> &InFlightSubmissions {
        &self.in_flight
    }

    /// Run one submit intent for a rendered survey.
    pub async fn submit(&self, survey: &Survey, input: &FormInput) -> SubmitOutcome {
        let token = survey.token();

        let Some(_guard) = self.in_flight.try_begin(token) else {
            warn!("Rejected duplicate submission for survey {}", token);
            return SubmitOutcome::Busy;
        };

        let answers = match form::collect_answers(survey, input) {
            Ok(answers) => answers,
            Err(errors) => {
                let ids: Vec<i64> = errors.keys().copied().collect();
                info!("Survey {} blocked by validation on questions {:?}", token, ids);
                return SubmitOutcome::Invalid(errors);
            }
        };

        let request = SubmitRequest { answers };
        match self.api.submit_survey(token, &request).await {
            Ok(result) => self.branch(token, result),
            Err(e) => {
                error!("Failed to submit survey {}: {}", token, e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn branch(&self, token: &SurveyToken, result: SubmissionResult) -> SubmitOutcome {
        let links = result
            .review_links
            .filter(|links| links.values().any(|url| !url.is_empty()));

        match (result.show_review_page, links) {
            (true, Some(links)) => {
                let ticket = self.handoff.deposit(links);
                info!("Survey {} submitted, offering review links", token);
                SubmitOutcome::Review(ticket)
            }
            (true, None) => {
                warn!(
                    "Survey {} asked for the review page without usable links, showing thanks",
                    token
                );
                SubmitOutcome::Thanks
            }
            (false, _) => {
                info!("Survey {} submitted", token);
                SubmitOutcome::Thanks
            }
        }
    }
}
