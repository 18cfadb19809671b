//! Page-side access to the proxy endpoint. Never sees the provider credential.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::pipeline::{Analyzer, Submission};
use crate::reply::StructuredReply;
use crate::routes::ANALYZE_PATH;

pub struct ProxyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProxyClient {
    /// `base_url` is where the proxy is served, e.g. `http://localhost:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Analyzer for ProxyClient {
    async fn analyze(&self, submission: &Submission) -> Result<StructuredReply> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&submission.to_request())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let details = serde_json::from_str(&body).unwrap_or(Value::String(body));
            return Err(Error::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
