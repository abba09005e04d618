use std::time::Duration;

use serde_json::Value;

use super::CollectError;

/// JSON GET with a fixed number of retries.
pub struct FeedClient {
    http: reqwest::Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl FeedClient {
    pub fn new(
        timeout: Duration,
        max_retries: u32,
        retry_delay: Duration,
    ) -> Result<Self, CollectError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("impactor/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            max_retries,
            retry_delay,
        })
    }

    pub async fn get_json(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Value, CollectError> {
        let mut attempt = 0;
        loop {
            match self.try_get(url, query).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt < self.max_retries && is_retryable(&err) => {
                    attempt += 1;
                    log::warn!(
                        "{url}: attempt {attempt}/{} failed ({err}), retrying",
                        self.max_retries + 1
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn try_get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, CollectError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CollectError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Rate limiting, server errors and transport failures are worth another
/// attempt. Other client errors (bad key, bad query) are not.
pub(crate) fn is_retryable(err: &CollectError) -> bool {
    match err {
        CollectError::Status { status, .. } => *status == 429 || (500..600).contains(status),
        CollectError::Http(err) => {
            err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
        }
        CollectError::Schema(_) | CollectError::Csv(_) | CollectError::Io(_) => false,
    }
}
