//! Client for the survey API collaborator.
//!
//! The [`SurveyApi`] trait is the seam between the survey flow and the
//! network; [`HttpSurveyApi`] talks to the real REST endpoints with reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::models::{SubmissionResult, SubmitRequest, SurveyRecord, SurveyToken};

/// Upper bound for a single upstream request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The two operations the front end needs from the collaborator.
#[async_trait]
pub trait SurveyApi: Send + Sync {
    /// `GET /public/surveys/{token}/`
    async fn fetch_survey(&self, token: &SurveyToken) -> Result<SurveyRecord, ApiError>;

    /// `POST /public/surveys/{token}/submit/`
    async fn submit_survey(
        &self,
        token: &SurveyToken,
        request: &SubmitRequest,
    ) -> Result<SubmissionResult, ApiError>;
}

/// reqwest-backed [`SurveyApi`].
#[derive(Debug, Clone)]
pub struct HttpSurveyApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSurveyApi {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    fn survey_url(&self, token: &SurveyToken) -> String {
        format!("{}/public/surveys/{}/", self.base_url, token)
    }
}

#[async_trait]
impl SurveyApi for HttpSurveyApi {
    async fn fetch_survey(&self, token: &SurveyToken) -> Result<SurveyRecord, ApiError> {
        let url = self.survey_url(token);
        debug!("Fetching survey from {}", url);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn submit_survey(
        &self,
        token: &SurveyToken,
        request: &SubmitRequest,
    ) -> Result<SubmissionResult, ApiError> {
        let url = format!("{}submit/", self.survey_url(token));
        debug!(
            "Submitting {} answers to {}",
            request.answers.len(),
            url
        );

        let response = self.client.post(&url).json(request).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turn non-2xx responses into [`ApiError`], keeping the body for the log.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}
