use crate::parser::{ParseError, parse_vote_page};
use crate::types::VoteResult;

use reqwest::Client;
use std::time::Duration;

// The portal rejects unidentified clients, so present a regular browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, Clone)]
pub struct WebScraper {
    client: Client,
}

impl WebScraper {
    pub fn new() -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches a voting page and parses it into a [`VoteResult`].
    /// Single attempt, no retries; dropping the future cancels the
    /// in-flight request.
    pub async fn fetch_voting(&self, url: &str) -> Result<VoteResult, ScraperError> {
        log::info!("Fetching voting page: {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .await
            .inspect_err(|e| log::error!("HTTP error: {e:?}"))?
            .error_for_status()?
            .text()
            .await
            .inspect_err(|e| log::error!("Decode error: {e:?}"))?;

        Ok(parse_vote_page(&html)?)
    }
}
