use std::collections::VecDeque;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::photo::ImagePayload;
use crate::pipeline::Submission;
use crate::reply::StructuredReply;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiaryEntry {
    pub id: u64,
    pub date: String,
    pub image: ImagePayload,
    pub note: Option<String>,
    pub reply: StructuredReply,
}

impl DiaryEntry {
    pub fn new(id: u64, at: DateTime<Local>, submission: Submission, reply: StructuredReply) -> Self {
        DiaryEntry {
            id,
            date: at.format("%Y/%-m/%-d").to_string(),
            image: submission.image,
            note: submission.note,
            reply,
        }
    }
}

/// Past successful submissions for the current session, newest first.
#[derive(Debug, Default)]
pub struct Diary {
    entries: VecDeque<DiaryEntry>,
    last_id: u64,
}

impl Diary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry stamped with the current time and puts it at the head.
    pub fn record(&mut self, submission: Submission, reply: StructuredReply) -> &DiaryEntry {
        let now = Local::now();
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        // two entries inside the same millisecond still get distinct, increasing ids
        let id = millis.max(self.last_id + 1);
        self.prepend(DiaryEntry::new(id, now, submission, reply));
        &self.entries[0]
    }

    pub fn prepend(&mut self, entry: DiaryEntry) {
        self.last_id = self.last_id.max(entry.id);
        self.entries.push_front(entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = &DiaryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&DiaryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
