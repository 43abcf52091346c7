//! Session error taxonomy.
//!
//! Failures are caught at the controller boundary and converted into the
//! session's single user-facing error slot; they never reach the
//! presentation layer as propagated errors.

use thiserror::Error;

/// Errors the session controller surfaces through `error_message`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The capture backend refused to start (permission denied, device busy).
    #[error("could not start recording: {0}")]
    CaptureStart(anyhow::Error),

    /// The transcription backend failed or was not ready.
    #[error("transcription failed: {0}")]
    Transcription(anyhow::Error),
}
