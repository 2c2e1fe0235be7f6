//! Survey model and fetch gate.
//!
//! A [`Survey`] is built once from a fetched [`SurveyRecord`] and never
//! changes afterwards. [`fetch`] is the gate every survey page goes through:
//! it resolves to a ready survey, to "already completed", or to a single
//! opaque failure whose cause is only logged.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::api::SurveyApi;
use crate::error::ApiError;
use crate::models::{Point, Question, SurveyRecord, SurveyToken};

/// A fetched survey with its questions in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    token: SurveyToken,
    order_number: String,
    point: Point,
    questions: Vec<Question>,
}

impl Survey {
    /// Build the read-only view, ordering questions by `(order, id)`.
    pub fn from_record(token: SurveyToken, record: SurveyRecord) -> Self {
        let mut questions = record.questions;
        questions.sort_by_key(|q| (q.order, q.id));

        Self {
            token,
            order_number: record.order_number,
            point: record.point,
            questions,
        }
    }

    pub fn token(&self) -> &SurveyToken {
        &self.token
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn point(&self) -> &Point {
        &self.point
    }

    /// Questions in display order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Result of the fetch gate.
#[derive(Debug)]
pub enum FetchOutcome {
    Ready(Arc<Survey>),
    AlreadyCompleted,
    /// Kept for logging only; the user sees one generic message.
    Failed(ApiError),
}

/// Resolve a raw route token into a survey.
pub async fn fetch(api: &dyn SurveyApi, raw_token: &str) -> FetchOutcome {
    let token = match SurveyToken::parse(raw_token) {
        Ok(token) => token,
        Err(e) => {
            warn!("Rejected survey token before fetch: {}", e);
            return FetchOutcome::Failed(e);
        }
    };

    match api.fetch_survey(&token).await {
        Ok(record) if record.completed => {
            info!("Survey {} already completed", token);
            FetchOutcome::AlreadyCompleted
        }
        Ok(record) => {
            let survey = Survey::from_record(token, record);
            info!(
                "Survey {} loaded with {} questions",
                survey.token(),
                survey.questions().len()
            );
            FetchOutcome::Ready(Arc::new(survey))
        }
        Err(e) => {
            warn!("Failed to load survey {}: {}", token, e);
            FetchOutcome::Failed(e)
        }
    }
}

// ============================================================================
// SurveyCache: surveys rendered recently, reused by the submit step
// ============================================================================

/// How long a rendered survey is reused by the submit step.
pub const SURVEY_CACHE_TTL_MINUTES: i64 = 15;

struct CachedSurvey {
    survey: Arc<Survey>,
    stored_at: DateTime<Utc>,
}

/// Short-lived in-memory cache of ready surveys, keyed by token.
pub struct SurveyCache {
    entries: Mutex<HashMap<SurveyToken, CachedSurvey>>,
    ttl: Duration,
}

impl SurveyCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::minutes(SURVEY_CACHE_TTL_MINUTES))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn insert(&self, survey: Arc<Survey>) {
        let now = Utc::now();
        let mut entries = self.entries.lock().expect("survey cache lock poisoned");
        entries.retain(|_, cached| now - cached.stored_at < self.ttl);
        entries.insert(
            survey.token().clone(),
            CachedSurvey {
                survey,
                stored_at: now,
            },
        );
    }

    pub fn get(&self, token: &SurveyToken) -> Option<Arc<Survey>> {
        let entries = self.entries.lock().expect("survey cache lock poisoned");
        entries
            .get(token)
            .filter(|cached| Utc::now() - cached.stored_at < self.ttl)
            .map(|cached| Arc::clone(&cached.survey))
    }

    pub fn evict(&self, token: &SurveyToken) {
        self.entries
            .lock()
            .expect("survey cache lock poisoned")
            .remove(token);
    }
}

impl Default for SurveyCache {
    fn default() -> Self {
        Self::new()
    }
}
