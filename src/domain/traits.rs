//! Core domain traits for dependency inversion.
//!
//! These traits define contracts between layers without depending on
//! concrete implementations. They enable:
//! - Testability via mock implementations
//! - Flexibility to swap implementations
//! - Clear API boundaries

use anyhow::Result;
use std::time::Duration;

use crate::domain::types::VoiceMemo;

/// Audio capture abstraction.
///
/// Implementors start and stop capture and report elapsed capture time.
/// Where the audio itself goes (encoder, file, ring buffer) is the
/// implementor's concern; the session controller only consumes timing.
pub trait AudioCapture: Send + Sync {
    /// Start capturing.
    ///
    /// Returns `Err` if the capture device is unavailable (e.g. permission
    /// denied) or already capturing.
    fn start(&self) -> Result<()>;

    /// Stop capturing and return the measured elapsed time.
    ///
    /// Stopping while not capturing returns `Duration::ZERO`.
    fn stop(&self) -> Duration;

    /// Elapsed time of the capture in progress.
    ///
    /// Queried repeatedly (polling, not event-pushed) to drive the timer
    /// display, so the value must update continuously while capturing.
    fn elapsed(&self) -> Duration;

    /// Check if currently capturing.
    fn is_capturing(&self) -> bool;
}

/// Speech-to-text abstraction.
///
/// Implementors resolve a memo's recorded audio by its identity and convert
/// it to text. The call blocks; the session controller moves it off the
/// state owner's context and awaits the result.
pub trait SpeechToText: Send + Sync {
    /// Transcribe the given memo's recording to text.
    ///
    /// # Arguments
    /// * `memo` - The memo whose recording should be transcribed
    /// * `language` - Language code (e.g., "en", "fr", "auto")
    fn transcribe(&self, memo: &VoiceMemo, language: &str) -> Result<String>;

    /// Check if the backend is ready to accept transcription requests.
    fn is_ready(&self) -> bool;
}

/// Configuration provider abstraction.
///
/// Implementors provide session configuration values.
pub trait ConfigProvider: Send + Sync {
    fn language(&self) -> String;
    fn max_memos(&self) -> usize;
    fn min_recording_secs(&self) -> f32;
}
