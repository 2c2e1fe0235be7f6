//! Terminal screens.
//!
//! ```text
//! GET /thanks          - Generic thank-you
//! GET /review?ticket=  - Review prompt, consumes the hand-off ticket
//! *                    - Anything else lands on the thank-you screen
//! ```

use axum::extract::Query;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Extension, Router};
use serde::Deserialize;
use tracing::debug;

use crate::handoff::ReviewTicket;
use crate::pages;
use crate::state::AppState;

/// Build the terminal-screen router.
pub fn router() -> Router {
    Router::new()
        .route("/thanks", get(thanks))
        .route("/review", get(review))
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub ticket: Option<String>,
}

async fn thanks() -> Html<String> {
    Html(pages::thanks_page())
}

/// Show the review links deposited by the submit step.
///
/// Only reachable with a fresh ticket; a missing, unknown or already used
/// ticket falls back to the thank-you screen.
async fn review(
    Extension(state): Extension<AppState>,
    Query(query): Query<ReviewQuery>,
) -> Response {
    let links = query
        .ticket
        .as_deref()
        .and_then(|raw| raw.parse::<ReviewTicket>().ok())
        .and_then(|ticket| state.handoff.consume(&ticket));

    match links {
        Some(links) => Html(pages::review_page(&links)).into_response(),
        None => {
            debug!("Review screen opened without a valid ticket");
            Redirect::to("/thanks").into_response()
        }
    }
}

/// Catch-all for unknown paths.
pub async fn fallback() -> Redirect {
    Redirect::to("/thanks")
}
