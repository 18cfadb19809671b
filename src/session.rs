//! State behind the page: the photo being worked on, its note, the last reply
//! and the diary of earlier submissions.

use crate::diary::Diary;
use crate::photo::ImagePayload;
use crate::pipeline::{Analyzer, Submission};
use crate::reply::StructuredReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to send; the analyzer was not called.
    Skipped,
    Replied,
    /// The apology reply is shown and the diary is untouched.
    Failed,
}

#[derive(Debug, Default)]
pub struct Session {
    image: Option<ImagePayload>,
    note: String,
    reply: Option<StructuredReply>,
    diary: Diary,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_image(&mut self, image: ImagePayload) {
        self.image = Some(image);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    pub fn image(&self) -> Option<&ImagePayload> {
        self.image.as_ref()
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn reply(&self) -> Option<&StructuredReply> {
        self.reply.as_ref()
    }

    pub fn diary(&self) -> &Diary {
        &self.diary
    }

    /// Sends the current photo and note. The session stays mutably borrowed
    /// until the reply arrives, so only one submission can be outstanding.
    pub async fn submit(&mut self, analyzer: &dyn Analyzer) -> Outcome {
        let Some(image) = self.image.clone() else {
            return Outcome::Skipped;
        };

        let submission = Submission::new(image, Some(self.note.clone()));
        match analyzer.analyze(&submission).await {
            Ok(reply) => {
                self.reply = Some(reply.clone());
                let id = self.diary.record(submission, reply).id;
                tracing::info!(id, entries = self.diary.len(), "diary entry added");
                Outcome::Replied
            }
            Err(err) => {
                tracing::error!(error = %err, "analysis failed");
                self.reply = Some(StructuredReply::apology());
                Outcome::Failed
            }
        }
    }

    /// Clears the form. The diary is kept.
    pub fn reset(&mut self) {
        self.image = None;
        self.note.clear();
        self.reply = None;
    }
}
