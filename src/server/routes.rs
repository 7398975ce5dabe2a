use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

use super::AppState;
use crate::listing::SessionLauncher;
use crate::models::ScrapeResult;
use crate::validation::validate_subreddit;

pub const HEALTH_TEXT: &str = "SubSpy Server is running :!";

#[derive(Debug, Deserialize)]
pub struct ScrapeParams {
    pub subreddit: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScrapeApiError {
    #[error("subreddit is required")]
    MissingSubreddit,
    #[error("invalid subreddit format")]
    InvalidSubreddit,
    #[error("Too many concurrent requests. Please try again shortly.")]
    Busy,
    #[error("Scrape timed out. Please try again.")]
    Timeout,
    #[error("Error scraping subreddit")]
    Internal,
}

#[derive(Debug, Serialize)]
struct FieldError {
    param: &'static str,
    location: &'static str,
    msg: String,
}

#[derive(Debug, Serialize)]
struct ValidationBody {
    errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
struct MessageBody {
    message: String,
}

impl IntoResponse for ScrapeApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            Self::MissingSubreddit | Self::InvalidSubreddit => {
                let body = ValidationBody {
                    errors: vec![FieldError {
                        param: "subreddit",
                        location: "query",
                        msg: message,
                    }],
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::Busy => (StatusCode::TOO_MANY_REQUESTS, Json(MessageBody { message })).into_response(),
            Self::Timeout => {
                (StatusCode::SERVICE_UNAVAILABLE, Json(MessageBody { message })).into_response()
            }
            Self::Internal => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(MessageBody { message })).into_response()
            }
        }
    }
}

pub async fn health() -> &'static str {
    HEALTH_TEXT
}

pub async fn scrape<L>(
    State(state): State<AppState<L>>,
    query: Result<Query<ScrapeParams>, QueryRejection>,
) -> Result<Json<ScrapeResult>, ScrapeApiError>
where
    L: SessionLauncher + 'static,
{
    // A repeated `subreddit` or broken encoding fails deserialization
    let Query(params) = query.map_err(|rejection| {
        warn!("Rejected scrape query: {}", rejection.body_text());
        ScrapeApiError::InvalidSubreddit
    })?;
    let raw = params.subreddit.ok_or(ScrapeApiError::MissingSubreddit)?;
    let subreddit = validate_subreddit(&raw)
        .ok_or(ScrapeApiError::InvalidSubreddit)?
        .to_string();

    let permit = state
        .permits
        .clone()
        .try_acquire_owned()
        .map_err(|_| ScrapeApiError::Busy)?;

    info!(subreddit = %subreddit, "Scrape requested");
    let scraper = state.scraper.clone();
    let name = subreddit.clone();
    // The permit lives in the task so the slot frees only once the browser is gone
    let mut task = tokio::spawn(async move {
        let _permit = permit;
        scraper.scrape(&name).await
    });

    match tokio::time::timeout(state.scrape_timeout, &mut task).await {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(e)) => {
            error!(subreddit = %subreddit, "Scrape task failed: {e}");
            Err(ScrapeApiError::Internal)
        }
        Err(_) => {
            warn!(
                subreddit = %subreddit,
                "Scrape timed out after {}s",
                state.scrape_timeout.as_secs()
            );
            // Dropping the scrape future drops the browser session with it
            task.abort();
            Err(ScrapeApiError::Timeout)
        }
    }
}
