use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::photo::ImagePayload;
use crate::reply::StructuredReply;

/// What the page posts to the proxy endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One photo plus an optional note, ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub image: ImagePayload,
    pub note: Option<String>,
}

impl Submission {
    pub fn new(image: ImagePayload, note: Option<String>) -> Self {
        let note = note.filter(|n| !n.trim().is_empty());
        Self { image, note }
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn to_request(&self) -> AnalyzeRequest {
        AnalyzeRequest {
            image: self.image.data.clone(),
            description: self.note.clone(),
        }
    }
}

impl TryFrom<AnalyzeRequest> for Submission {
    type Error = crate::error::Error;

    fn try_from(request: AnalyzeRequest) -> Result<Self> {
        let image = ImagePayload::from_base64(&request.image)?;
        Ok(Self::new(image, request.description))
    }
}

/// Turns a submission into a reply. Implemented by the provider client on the
/// server and by the proxy client on the page side.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, submission: &Submission) -> Result<StructuredReply>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::photo::tests::tiny_png;
    use base64::{engine::general_purpose, Engine as _};

    #[test]
    fn blank_note_is_dropped() {
        let image = ImagePayload::from_bytes(&tiny_png()).unwrap();
        assert_eq!(Submission::new(image.clone(), Some("  ".into())).note(), None);
        assert_eq!(Submission::new(image, Some("新叶".into())).note(), Some("新叶"));
    }

    #[test]
    fn request_without_description_deserializes() {
        let encoded = general_purpose::STANDARD.encode(tiny_png());
        let request: AnalyzeRequest =
            serde_json::from_value(serde_json::json!({ "image": encoded })).unwrap();
        let submission = Submission::try_from(request).unwrap();
        assert_eq!(submission.note(), None);
        assert_eq!(submission.image.data, encoded);
    }

    #[test]
    fn empty_image_is_rejected() {
        let request = AnalyzeRequest {
            image: String::new(),
            description: Some("hello".into()),
        };
        assert!(matches!(Submission::try_from(request), Err(Error::MissingImage)));
    }
}
