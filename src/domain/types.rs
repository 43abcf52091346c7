//! Shared types used across multiple modules.
//!
//! This module contains the memo record and the immutable session snapshot
//! handed to the presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single voice memo.
///
/// Created when a recording stops. The identity is stable for the memo's
/// lifetime and is what deletion and transcription requests target. The
/// `transcription` field transitions at most once, from `None` to `Some`,
/// and is never cleared or overwritten afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceMemo {
    pub id: String,
    pub recorded_at: DateTime<Utc>,
    pub duration_secs: f32,
    #[serde(default)]
    pub transcription: Option<String>,
}

impl VoiceMemo {
    pub fn new(recorded_at: DateTime<Utc>, duration_secs: f32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            recorded_at,
            duration_secs,
            transcription: None,
        }
    }

    pub fn is_transcribed(&self) -> bool {
        self.transcription.is_some()
    }

    /// Returns formatted duration (M:SS)
    pub fn formatted_duration(&self) -> String {
        format_clock(self.duration_secs as u64)
    }

    /// Returns formatted creation time in local time (YYYY-MM-DD HH:MM)
    pub fn formatted_timestamp(&self) -> String {
        let local = self.recorded_at.with_timezone(&chrono::Local);
        local.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Format a second count as `M:SS` for timer and duration displays.
pub fn format_clock(total_secs: u64) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Immutable view of the session state.
///
/// The controller is the sole writer; the presentation layer reads
/// snapshots and re-renders, either by polling or on a change tick.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Memos in display order (insertion order, oldest first)
    pub memos: Vec<VoiceMemo>,
    /// True between a successful capture start and the matching stop
    pub is_recording: bool,
    /// True while a transcription request is in flight
    pub is_transcribing: bool,
    /// User-facing error text, cleared on the next successful operation
    pub error_message: Option<String>,
}
