//! Shared application state, handed to route handlers through an
//! `Extension` layer.

use std::sync::Arc;

use crate::api::SurveyApi;
use crate::controller::SubmissionController;
use crate::handoff::ReviewHandoffStore;
use crate::survey::SurveyCache;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn SurveyApi>,
    pub surveys: Arc<SurveyCache>,
    pub handoff: Arc<ReviewHandoffStore>,
    pub submissions: Arc<SubmissionController>,
}

impl AppState {
    pub fn new(api: Arc<dyn SurveyApi>) -> Self {
        let handoff = Arc::new(ReviewHandoffStore::new());
        let submissions = Arc::new(SubmissionController::new(
            Arc::clone(&api),
            Arc::clone(&handoff),
        ));

        Self {
            api,
            surveys: Arc::new(SurveyCache::new()),
            handoff,
            submissions,
        }
    }
}
