// Single-flight download coordination: one cancellable, timed render
// request at a time; the slot returns to Idle on every exit path.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::catalog::store::CatalogItem;
use crate::engine::session::{
    output_filename, DownloadOutcome, DownloadSession, DownloadStatus, StartOutcome,
};
use crate::host::Endpoint;
use crate::output::notify::{Notice, Notifier};
use crate::output::sink::FileSink;
use crate::render::traits::{RenderRequest, RenderService};

pub struct DownloadOrchestrator {
    renderer: Arc<dyn RenderService>,
    notifier: Arc<dyn Notifier>,
    sink: Arc<dyn FileSink>,
    render_timeout: Duration,
    slot: Arc<Mutex<DownloadSession>>,
}

impl DownloadOrchestrator {
    pub fn new(
        renderer: Arc<dyn RenderService>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn FileSink>,
        render_timeout: Duration,
    ) -> Self {
        Self {
            renderer,
            notifier,
            sink,
            render_timeout,
            slot: Arc::new(Mutex::new(DownloadSession::idle())),
        }
    }

    /// Current slot status. `Idle` whenever no session is in flight.
    pub fn status(&self) -> DownloadStatus {
        self.slot.lock().status
    }

    /// Run one download session for `item` against `endpoint`, captured
    /// by value for the whole session.
    ///
    /// Rejected with `StartOutcome::Busy` if another session is already
    /// requesting; the in-flight session is left untouched. Otherwise the
    /// call resolves to exactly one terminal outcome: response arrival,
    /// explicit cancel, or deadline expiry, whichever happens first. The
    /// losing branches are dropped, which aborts any remaining network
    /// work.
    pub async fn start(&self, item: &CatalogItem, endpoint: Endpoint) -> StartOutcome {
        let token = CancellationToken::new();
        {
            let mut slot = self.slot.lock();
            if slot.status == DownloadStatus::Requesting {
                debug!(
                    "start rejected: session already requesting key={:?}",
                    slot.target_key
                );
                return StartOutcome::Busy;
            }
            slot.status = DownloadStatus::Requesting;
            slot.target_key = Some(item.key.clone());
            slot.cancel = Some(token.clone());
        }

        // The guard owns the reset: whichever path leaves this function,
        // including a panic mid-request, the slot returns to Idle and the
        // token reference is dropped.
        let _guard = SlotGuard {
            slot: Arc::clone(&self.slot),
        };

        let filename = output_filename(&item.key);
        let request = RenderRequest {
            url_template: item.url.clone(),
            output_filename: filename.clone(),
        };

        info!(
            "render start key={} endpoint={} output={}",
            item.key,
            endpoint.label(),
            filename
        );

        let outcome = tokio::select! {
            result = self.renderer.render(endpoint.base_url(), &request) => {
                match result {
                    Ok(payload) => {
                        self.sink.save(payload, &filename);
                        DownloadOutcome::Completed
                    }
                    Err(e) => {
                        warn!("render failed key={}: {}", item.key, e);
                        DownloadOutcome::Failed
                    }
                }
            }
            _ = token.cancelled() => DownloadOutcome::Cancelled,
            _ = tokio::time::sleep(self.render_timeout) => DownloadOutcome::TimedOut,
        };

        self.finish(outcome, endpoint, item);
        StartOutcome::Finished(outcome)
    }

    /// Signal the in-flight session's token, if any. The in-flight start
    /// path performs the `Cancelled` transition itself, keeping the slot
    /// single-writer. With no session requesting this does nothing: no
    /// state change, no notice.
    pub fn cancel(&self) {
        let token = {
            let slot = self.slot.lock();
            if slot.status != DownloadStatus::Requesting {
                return;
            }
            slot.cancel.clone()
        };
        if let Some(token) = token {
            debug!("cancel requested");
            token.cancel();
        }
    }

    /// Record the terminal state and emit exactly one notice for it.
    fn finish(&self, outcome: DownloadOutcome, endpoint: Endpoint, item: &CatalogItem) {
        {
            let mut slot = self.slot.lock();
            slot.status = outcome.status();
            // A cancel arriving from here on finds no Requesting session
            // and is a no-op.
            slot.cancel = None;
        }
        match outcome {
            DownloadOutcome::Completed => {
                info!("render completed key={}", item.key);
                self.notifier.notify(Notice::Success);
            }
            DownloadOutcome::Cancelled => {
                info!("render cancelled key={}", item.key);
                self.notifier.notify(Notice::UserCancelled);
            }
            DownloadOutcome::TimedOut => {
                warn!("render deadline elapsed key={}", item.key);
                self.notifier.notify(Notice::Timeout);
            }
            DownloadOutcome::Failed => {
                let message = match endpoint {
                    Endpoint::Local => {
                        "download failed: ensure the local render server is running".to_string()
                    }
                    Endpoint::Hosted => "error downloading file".to_string(),
                };
                self.notifier.notify(Notice::Failure(message));
            }
        }
    }
}

struct SlotGuard {
    slot: Arc<Mutex<DownloadSession>>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.slot.lock().reset();
    }
}
