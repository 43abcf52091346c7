//! Mock implementations for unit testing.
//!
//! These mocks implement the core traits from `crate::domain::traits` to
//! enable testing without real audio devices or speech-to-text models.

use crate::domain::traits::{AudioCapture, ConfigProvider, SpeechToText};
use crate::domain::types::VoiceMemo;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Mock capture backend for testing.
///
/// Reports a scripted elapsed time instead of measuring a real clock,
/// and can be configured to refuse to start.
pub struct MockCapture {
    capturing: AtomicBool,
    elapsed: Mutex<Duration>,
    fail_starts: AtomicUsize,
    start_calls: AtomicUsize,
}

impl MockCapture {
    /// Create a mock capture reporting zero elapsed time.
    pub fn new() -> Self {
        Self::with_duration(Duration::ZERO)
    }

    /// Create a mock capture whose `elapsed()`/`stop()` report `duration`.
    pub fn with_duration(duration: Duration) -> Self {
        Self {
            capturing: AtomicBool::new(false),
            elapsed: Mutex::new(duration),
            fail_starts: AtomicUsize::new(0),
            start_calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock capture whose `start()` always fails.
    pub fn failing() -> Self {
        let mock = Self::new();
        mock.fail_starts.store(usize::MAX, Ordering::SeqCst);
        mock
    }

    /// Create a mock capture whose first `start()` fails and later ones succeed.
    pub fn failing_once() -> Self {
        let mock = Self::new();
        mock.fail_starts.store(1, Ordering::SeqCst);
        mock
    }

    /// Change the scripted elapsed time.
    pub fn set_elapsed(&self, duration: Duration) {
        *self.elapsed.lock().unwrap() = duration;
    }

    /// How many times `start()` was called.
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCapture {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCapture for MockCapture {
    fn start(&self) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fail_starts.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != usize::MAX {
                self.fail_starts.store(remaining - 1, Ordering::SeqCst);
            }
            anyhow::bail!("microphone permission denied");
        }
        self.capturing.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&self) -> Duration {
        self.capturing.store(false, Ordering::SeqCst);
        *self.elapsed.lock().unwrap()
    }

    fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap()
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }
}

/// Mock transcription backend for testing.
///
/// Returns predefined text (or a predefined failure) instead of actually
/// transcribing. The gated variant blocks inside `transcribe` until
/// released, for exercising in-flight states.
pub struct MockTranscriber {
    result: Mutex<Result<String, String>>,
    ready: bool,
    gate: Option<async_channel::Receiver<()>>,
    calls: AtomicUsize,
}

impl MockTranscriber {
    /// Create a mock that returns the given text.
    pub fn returning(text: &str) -> Self {
        Self {
            result: Mutex::new(Ok(text.to_string())),
            ready: true,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that fails with the given message.
    pub fn failing(message: &str) -> Self {
        Self {
            result: Mutex::new(Err(message.to_string())),
            ready: true,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a not-ready mock (simulates no model loaded).
    pub fn not_ready() -> Self {
        Self {
            result: Mutex::new(Err("backend not ready".to_string())),
            ready: false,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a mock that blocks inside `transcribe` until the returned
    /// sender delivers (or is dropped), then returns the given text.
    pub fn gated(text: &str) -> (Self, async_channel::Sender<()>) {
        let (tx, rx) = async_channel::bounded(1);
        let mock = Self {
            result: Mutex::new(Ok(text.to_string())),
            ready: true,
            gate: Some(rx),
            calls: AtomicUsize::new(0),
        };
        (mock, tx)
    }

    /// How many times `transcribe` was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SpeechToText for MockTranscriber {
    fn transcribe(&self, _memo: &VoiceMemo, _language: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let _ = gate.recv_blocking();
        }
        match &*self.result.lock().unwrap() {
            Ok(text) => Ok(text.clone()),
            Err(message) => anyhow::bail!("{}", message),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

/// Mock configuration provider for testing.
///
/// Returns configurable values for all config fields.
pub struct MockConfigProvider {
    pub language: String,
    pub max_memos: usize,
    pub min_recording_secs: f32,
}

impl MockConfigProvider {
    /// Create a mock with default English config.
    pub fn default_en() -> Self {
        Self {
            language: "en".to_string(),
            max_memos: 500,
            min_recording_secs: 0.0,
        }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn language(&self) -> String {
        self.language.clone()
    }

    fn max_memos(&self) -> usize {
        self.max_memos
    }

    fn min_recording_secs(&self) -> f32 {
        self.min_recording_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn memo() -> VoiceMemo {
        VoiceMemo::new(Utc::now(), 5.0)
    }

    #[test]
    fn test_mock_capture_basic() {
        let capture = MockCapture::new();

        assert!(!capture.is_capturing());
        capture.start().unwrap();
        assert!(capture.is_capturing());

        let duration = capture.stop();
        assert!(!capture.is_capturing());
        assert_eq!(duration, Duration::ZERO);
    }

    #[test]
    fn test_mock_capture_scripted_duration() {
        let capture = MockCapture::with_duration(Duration::from_secs(7));
        capture.start().unwrap();
        assert_eq!(capture.elapsed(), Duration::from_secs(7));
        assert_eq!(capture.stop(), Duration::from_secs(7));
    }

    #[test]
    fn test_mock_capture_failing() {
        let capture = MockCapture::failing();
        assert!(capture.start().is_err());
        assert!(capture.start().is_err());
        assert!(!capture.is_capturing());
        assert_eq!(capture.start_calls(), 2);
    }

    #[test]
    fn test_mock_capture_failing_once() {
        let capture = MockCapture::failing_once();
        assert!(capture.start().is_err());
        assert!(capture.start().is_ok());
        assert!(capture.is_capturing());
    }

    #[test]
    fn test_mock_capture_set_elapsed() {
        let capture = MockCapture::new();
        capture.set_elapsed(Duration::from_secs(42));
        assert_eq!(capture.elapsed(), Duration::from_secs(42));
    }

    #[test]
    fn test_mock_transcriber_returns_text() {
        let stt = MockTranscriber::returning("hello world");
        let result = stt.transcribe(&memo(), "en").unwrap();
        assert_eq!(result, "hello world");
        assert_eq!(stt.calls(), 1);
    }

    #[test]
    fn test_mock_transcriber_failing() {
        let stt = MockTranscriber::failing("backend timeout");
        let err = stt.transcribe(&memo(), "en").unwrap_err();
        assert!(err.to_string().contains("backend timeout"));
    }

    #[test]
    fn test_mock_transcriber_ready_flags() {
        assert!(MockTranscriber::returning("x").is_ready());
        assert!(!MockTranscriber::not_ready().is_ready());
    }

    #[test]
    fn test_mock_transcriber_gated_releases() {
        let (stt, gate) = MockTranscriber::gated("after gate");
        gate.try_send(()).unwrap();
        let result = stt.transcribe(&memo(), "en").unwrap();
        assert_eq!(result, "after gate");
    }

    #[test]
    fn test_mock_config_provider_defaults() {
        let config = MockConfigProvider::default_en();
        assert_eq!(config.language(), "en");
        assert_eq!(config.max_memos(), 500);
        assert_eq!(config.min_recording_secs(), 0.0);
    }

    // === Trait Object (Box<dyn>) Tests ===

    #[test]
    fn test_capture_as_trait_object() {
        let capture: Box<dyn AudioCapture> = Box::new(MockCapture::new());
        capture.start().unwrap();
        assert!(capture.is_capturing());
    }

    #[test]
    fn test_transcriber_as_trait_object() {
        let stt: Box<dyn SpeechToText> = Box::new(MockTranscriber::returning("test output"));
        assert!(stt.is_ready());
        assert_eq!(stt.transcribe(&memo(), "en").unwrap(), "test output");
    }

    #[test]
    fn test_config_provider_as_trait_object() {
        let config: Box<dyn ConfigProvider> = Box::new(MockConfigProvider::default_en());
        assert_eq!(config.language(), "en");
    }
}
