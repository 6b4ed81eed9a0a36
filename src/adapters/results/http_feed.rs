//! HTTP Result Feed - Match Results over REST
//!
//! Queries `GET {base_url}/api/match-result?event=<name>` and expects
//! `{"homeWin": true|false}`. The home side is taken to be the selection
//! backed at the bookmaker. A `404`, or a body without a decision, means
//! the result is not known yet.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::ports::result_feed::{MatchResult, ResultFeed};

/// Wire format of the result service.
#[derive(Debug, Deserialize)]
struct MatchResultResponse {
    #[serde(rename = "homeWin")]
    home_win: Option<bool>,
}

/// Result feed backed by a JSON HTTP endpoint.
pub struct HttpResultFeed {
    http: Client,
    base_url: String,
}

impl HttpResultFeed {
    /// Create a feed client with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/match-result", self.base_url)
    }
}

#[async_trait]
impl ResultFeed for HttpResultFeed {
    #[instrument(skip(self))]
    async fn fetch_result(&self, event_name: &str) -> Result<Option<MatchResult>> {
        let resp = self
            .http
            .get(self.endpoint())
            .query(&[("event", event_name)])
            .send()
            .await
            .context("Result request failed")?;

        if resp.status() == StatusCode::NOT_FOUND {
            debug!("Event unknown to result feed");
            return Ok(None);
        }

        let resp = resp
            .error_for_status()
            .context("Result feed returned an error status")?;
        let body: MatchResultResponse = resp
            .json()
            .await
            .context("Failed to parse result response")?;

        Ok(body.home_win.map(|back_won| MatchResult { back_won }))
    }
}
