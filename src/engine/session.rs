// Session state for the single system-wide download slot.

use tokio_util::sync::CancellationToken;

/// Lifecycle of the download slot. `Idle` is both the initial state and
/// the state the slot returns to after every terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStatus {
    Idle,
    Requesting,
    Completed,
    Cancelled,
    TimedOut,
    Failed,
}

/// Terminal result of one finished session. Exactly one of these is
/// reached per session, and reaching it is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    Completed,
    Cancelled,
    TimedOut,
    Failed,
}

impl DownloadOutcome {
    pub fn status(&self) -> DownloadStatus {
        match self {
            DownloadOutcome::Completed => DownloadStatus::Completed,
            DownloadOutcome::Cancelled => DownloadStatus::Cancelled,
            DownloadOutcome::TimedOut => DownloadStatus::TimedOut,
            DownloadOutcome::Failed => DownloadStatus::Failed,
        }
    }
}

/// Result of a `start` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// Another session was already requesting; nothing happened.
    Busy,
    /// The session ran to one of the terminal outcomes.
    Finished(DownloadOutcome),
}

/// The single download slot. Mutated only by the orchestrator's own
/// transition logic; the cancellation token is freshly allocated per
/// session and dropped on reset, never reused.
pub struct DownloadSession {
    pub(crate) status: DownloadStatus,
    pub(crate) target_key: Option<String>,
    pub(crate) cancel: Option<CancellationToken>,
}

impl DownloadSession {
    pub(crate) fn idle() -> Self {
        Self {
            status: DownloadStatus::Idle,
            target_key: None,
            cancel: None,
        }
    }

    /// Return to `Idle`, dropping any reference to the previous token.
    pub(crate) fn reset(&mut self) {
        *self = Self::idle();
    }
}

/// Output filename for a catalog item key: the last five characters of
/// the key plus the `.pdf` extension. Keys shorter than five characters
/// are used whole. Counted in characters, so multi-byte keys never split.
pub fn output_filename(key: &str) -> String {
    let count = key.chars().count();
    let tail: String = key.chars().skip(count.saturating_sub(5)).collect();
    format!("{}.pdf", tail)
}
