//! Error types for the survey front end.
//!
//! [`ApiError`] describes what went wrong talking to the collaborator and is
//! only ever logged. [`PageError`] is the user-visible taxonomy: every
//! variant maps to one HTTP status and one localized, single-line message
//! that never carries backend details.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::pages;

/// Failures of the survey API collaborator client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The route token is not something we would ever send upstream.
    #[error("malformed survey token")]
    MalformedToken,

    /// The collaborator does not know the token.
    #[error("survey not found")]
    NotFound,

    /// Any other non-2xx response.
    #[error("collaborator returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Connection, timeout or body decoding failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Invalid environment configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// User-visible failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// Token invalid, expired or transport failure while fetching.
    LoadFailed,
    /// A required question was left blank or a value is out of its domain.
    Invalid,
    /// The collaborator rejected or never received the submission.
    SubmitFailed,
    /// Another submission for the same token is still in flight.
    Busy,
}

impl PageError {
    /// Returns the HTTP status code for this error.
    ///
    /// - LoadFailed, SubmitFailed: 502 Bad Gateway (the collaborator failed)
    /// - Invalid: 422 Unprocessable Entity
    /// - Busy: 409 Conflict
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::LoadFailed | Self::SubmitFailed => StatusCode::BAD_GATEWAY,
            Self::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Busy => StatusCode::CONFLICT,
        }
    }

    /// The localized message shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::LoadFailed => pages::MSG_LOAD_FAILED,
            Self::Invalid => pages::MSG_VALIDATION_FAILED,
            Self::SubmitFailed => pages::MSG_SUBMIT_FAILED,
            Self::Busy => pages::MSG_SUBMIT_IN_PROGRESS,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        (self.status_code(), Html(pages::error_page(self.message()))).into_response()
    }
}
