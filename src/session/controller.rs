//! Recording session controller.
//!
//! `MemoSession` owns the screen-facing session state (recording flag,
//! transcription flag, error slot, memo collection) and mediates between
//! UI intents and the capture/transcription backends. The presentation
//! layer reads snapshots and issues intents; all mutation happens here.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::domain::error::SessionError;
use crate::domain::traits::{AudioCapture, ConfigProvider, SpeechToText};
use crate::domain::types::{format_clock, SessionSnapshot, VoiceMemo};
use crate::memos::MemoList;
use crate::session::channels::ChangeSignal;

/// Mutable session state, guarded by a single mutex.
struct SessionState {
    memos: MemoList,
    is_recording: bool,
    is_transcribing: bool,
    error_message: Option<String>,
    recording_started_at: Option<DateTime<Utc>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            memos: MemoList::new(),
            is_recording: false,
            is_transcribing: false,
            error_message: None,
            recording_started_at: None,
        }
    }
}

/// Recording session controller.
///
/// Long-lived for the screen's lifetime. Transitions: `Idle -> Recording`
/// on a successful start, `Recording -> Idle` on stop (appending one memo),
/// `Idle -> Transcribing -> Idle` around each transcription. Recording and
/// transcribing exclude each other in both directions, matching the record
/// button being disabled while a transcription is pending.
///
/// Commands never return errors; backend failures land in the
/// `error_message` slot and out-of-state commands are ignored.
pub struct MemoSession {
    capture: Arc<dyn AudioCapture>,
    stt: Arc<dyn SpeechToText>,
    config: Arc<dyn ConfigProvider>,
    state: Mutex<SessionState>,
    changed: ChangeSignal,
}

impl MemoSession {
    pub fn new(
        capture: Arc<dyn AudioCapture>,
        stt: Arc<dyn SpeechToText>,
        config: Arc<dyn ConfigProvider>,
    ) -> Self {
        Self {
            capture,
            stt,
            config,
            state: Mutex::new(SessionState::new()),
            changed: ChangeSignal::new(),
        }
    }

    // === Commands ===

    /// Start recording.
    ///
    /// Ignored while already recording or while a transcription is in
    /// flight. A capture backend failure lands in the error slot and
    /// leaves the session idle.
    pub fn start_recording(&self) {
        {
            let mut state = self.state.lock();
            if state.is_recording {
                debug!("start_recording ignored: already recording");
                return;
            }
            if state.is_transcribing {
                debug!("start_recording ignored: transcription in flight");
                return;
            }

            match self.capture.start() {
                Ok(()) => {
                    state.is_recording = true;
                    state.recording_started_at = Some(Utc::now());
                    state.error_message = None;
                }
                Err(e) => {
                    warn!("capture backend refused to start: {:#}", e);
                    state.error_message = Some(SessionError::CaptureStart(e).to_string());
                }
            }
        }
        self.changed.notify();
    }

    /// Stop recording and append the completed memo.
    ///
    /// Ignored while not recording; the ignored path never appends.
    pub fn stop_recording(&self) {
        {
            let mut state = self.state.lock();
            if !state.is_recording {
                debug!("stop_recording ignored: not recording");
                return;
            }

            let duration = self.capture.stop();
            state.is_recording = false;
            let recorded_at = state.recording_started_at.take().unwrap_or_else(Utc::now);

            let min_secs = self.config.min_recording_secs();
            if duration.as_secs_f32() < min_secs {
                warn!(
                    "discarding recording: {:.2}s is shorter than the {:.1}s minimum",
                    duration.as_secs_f32(),
                    min_secs
                );
                state.error_message = Some("recording too short".to_string());
            } else {
                state
                    .memos
                    .push(VoiceMemo::new(recorded_at, duration.as_secs_f32()));
                let trimmed = state.memos.trim_to_limit(self.config.max_memos());
                if trimmed > 0 {
                    debug!("dropped {} oldest memos over the configured limit", trimmed);
                }
                state.error_message = None;
            }
        }
        self.changed.notify();
    }

    /// Current elapsed recording time formatted `M:SS`.
    ///
    /// Meaningful while recording, `0:00` otherwise. Polled by the timer
    /// display and backed by the capture backend's running clock.
    pub fn recording_time(&self) -> String {
        format_clock(self.capture.elapsed().as_secs())
    }

    /// Transcribe the memo with the given id.
    ///
    /// At most one transcription is in flight per session; requests while
    /// busy, while recording, for unknown memos, or for memos already
    /// transcribed are ignored. The blocking backend call runs on a worker
    /// thread; this future suspends until it completes.
    pub async fn transcribe_memo(&self, id: &str) {
        let memo = {
            let mut state = self.state.lock();
            if state.is_recording {
                debug!("transcribe_memo ignored: recording in progress");
                return;
            }
            if state.is_transcribing {
                debug!("transcribe_memo ignored: another transcription in flight");
                return;
            }
            let Some(memo) = state.memos.get(id).cloned() else {
                debug!("transcribe_memo ignored: unknown memo {}", id);
                return;
            };
            if memo.is_transcribed() {
                debug!("transcribe_memo ignored: memo {} already transcribed", id);
                return;
            }
            if !self.stt.is_ready() {
                warn!("transcription backend not ready");
                state.error_message = Some(
                    SessionError::Transcription(anyhow::anyhow!("backend not ready"))
                        .to_string(),
                );
                drop(state);
                self.changed.notify();
                return;
            }

            state.is_transcribing = true;
            memo
        };
        self.changed.notify();

        let language = self.config.language();
        let stt = Arc::clone(&self.stt);
        let (tx, rx) = async_channel::bounded::<anyhow::Result<String>>(1);
        std::thread::spawn(move || {
            let result = stt.transcribe(&memo, &language);
            let _ = tx.send_blocking(result);
        });

        let result = rx
            .recv()
            .await
            .unwrap_or_else(|_| Err(anyhow::anyhow!("transcription worker dropped")));

        {
            let mut state = self.state.lock();
            state.is_transcribing = false;
            match result {
                Ok(text) => {
                    if state.memos.fill_transcription(id, text) {
                        state.error_message = None;
                    } else {
                        // Memo deleted while its transcription was in flight:
                        // the deletion wins and the late result is discarded.
                        warn!("memo {} gone before transcription finished", id);
                    }
                }
                Err(e) => {
                    warn!("transcription failed for memo {}: {:#}", id, e);
                    state.error_message = Some(SessionError::Transcription(e).to_string());
                }
            }
        }
        self.changed.notify();
    }

    /// Delete the memo with the given id. Unknown ids are a no-op.
    pub fn delete_memo(&self, id: &str) {
        self.state.lock().memos.remove(id);
        self.changed.notify();
    }

    /// Delete the memos at the given display positions.
    ///
    /// All positions are resolved against the list as it is when the call
    /// is made, before any removal applies, so a multi-row delete gesture
    /// cannot hit shifted indices.
    pub fn delete_at(&self, indices: &[usize]) {
        self.state.lock().memos.remove_at(indices);
        self.changed.notify();
    }

    // === Reads ===

    /// Immutable snapshot of the whole session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock();
        SessionSnapshot {
            memos: state.memos.as_slice().to_vec(),
            is_recording: state.is_recording,
            is_transcribing: state.is_transcribing,
            error_message: state.error_message.clone(),
        }
    }

    pub fn memos(&self) -> Vec<VoiceMemo> {
        self.state.lock().memos.as_slice().to_vec()
    }

    pub fn is_recording(&self) -> bool {
        self.state.lock().is_recording
    }

    pub fn is_transcribing(&self) -> bool {
        self.state.lock().is_transcribing
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.lock().error_message.clone()
    }

    /// Subscribe to coalesced change notifications.
    ///
    /// Each tick means "state changed since you last looked"; re-read
    /// [`MemoSession::snapshot`] to see what.
    pub fn changes(&self) -> async_channel::Receiver<()> {
        self.changed.subscribe()
    }
}
