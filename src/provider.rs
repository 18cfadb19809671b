//! Client for the Anthropic Messages API. The only place the credential is used.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::pipeline::{Analyzer, Submission};
use crate::prompt;
use crate::reply::{self, StructuredReply};

const LOG_PREVIEW_CHARS: usize = 500;

#[derive(Debug, Serialize)]
pub(crate) struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'static str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ResponseBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

impl MessagesResponse {
    fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| match block {
                ResponseBlock::Text { text } => Some(text.as_str()),
                ResponseBlock::Other => None,
            })
            .collect()
    }
}

pub struct ProviderClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl ProviderClient {
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub(crate) fn build_request<'a>(&'a self, submission: &'a Submission) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: submission.image.media_type.as_str(),
                            data: &submission.image.data,
                        },
                    },
                    ContentBlock::Text {
                        text: prompt::render(submission.note()),
                    },
                ],
            }],
        }
    }
}

#[async_trait]
impl Analyzer for ProviderClient {
    async fn analyze(&self, submission: &Submission) -> Result<StructuredReply> {
        let request = self.build_request(submission);

        tracing::info!(
            model = %self.config.model,
            media_type = submission.image.media_type.as_str(),
            has_note = submission.note.is_some(),
            "sending request to provider"
        );

        let response = self
            .http
            .post(&self.config.url)
            .header("Content-Type", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(
            %status,
            body = %body.chars().take(LOG_PREVIEW_CHARS).collect::<String>(),
            "provider response"
        );

        if !status.is_success() {
            let details = serde_json::from_str(&body).unwrap_or(Value::String(body));
            return Err(Error::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let decoded: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| Error::Decode(e.to_string()))?;

        let reply = reply::parse(&decoded.text())?;
        tracing::info!("provider reply parsed");
        Ok(reply)
    }
}
