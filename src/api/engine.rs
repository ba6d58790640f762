use std::sync::{Arc, Once};

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::catalog::store::{CatalogItem, CatalogStore};
use crate::config::EngineConfig;
use crate::engine::orchestrator::DownloadOrchestrator;
use crate::engine::session::{DownloadOutcome, DownloadStatus, StartOutcome};
use crate::host::{Endpoint, HostSelector};
use crate::output::notify::{Notice, Notifier};
use crate::output::sink::FileSink;
use crate::render::traits::RenderService;

static INIT_TRACING: Once = Once::new();

/// Install the global tracing subscriber once. Safe to call repeatedly.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,hyper=warn,reqwest=warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();

        info!("docfetch engine tracing initialized");
    });
}

/// Facade tying the catalog, backend selection, and download
/// orchestration together for an embedding UI.
pub struct DocfetchEngine {
    catalog: CatalogStore,
    host: HostSelector,
    orchestrator: DownloadOrchestrator,
    notifier: Arc<dyn Notifier>,
}

impl DocfetchEngine {
    pub fn new(
        config: EngineConfig,
        renderer: Arc<dyn RenderService>,
        notifier: Arc<dyn Notifier>,
        sink: Arc<dyn FileSink>,
    ) -> Self {
        let orchestrator = DownloadOrchestrator::new(
            renderer,
            Arc::clone(&notifier),
            sink,
            config.render_timeout(),
        );
        Self {
            catalog: CatalogStore::new(config.catalog_url),
            host: HostSelector::new(Arc::clone(&notifier)),
            orchestrator,
            notifier,
        }
    }

    /// Fetch the catalog once at startup. A failure keeps the previous
    /// (possibly empty) view and is only logged.
    pub async fn load_catalog(&self) {
        self.catalog.load().await;
    }

    /// Filter the catalog by title and update the active view.
    pub fn search(&self, query: &str) -> Vec<CatalogItem> {
        self.catalog.apply_filter(query)
    }

    /// Full canonical catalog.
    pub fn items(&self) -> Vec<CatalogItem> {
        self.catalog.items()
    }

    /// Currently filtered view.
    pub fn filtered(&self) -> Vec<CatalogItem> {
        self.catalog.filtered()
    }

    pub fn active_endpoint(&self) -> Endpoint {
        self.host.active()
    }

    /// Switch between the hosted and local render backends. Requests
    /// already in flight keep the endpoint they started with.
    pub fn toggle_endpoint(&self) -> Endpoint {
        self.host.toggle()
    }

    /// Start a download for the catalog item with `key`, against the
    /// endpoint active right now. An unknown key is converted to a failed
    /// outcome with a single failure notice.
    pub async fn download(&self, key: &str) -> StartOutcome {
        let Some(item) = self.catalog.find(key) else {
            self.notifier
                .notify(Notice::Failure(format!("unknown catalog key: {}", key)));
            return StartOutcome::Finished(DownloadOutcome::Failed);
        };
        let endpoint = self.host.active();
        self.orchestrator.start(&item, endpoint).await
    }

    /// Cancel the in-flight download, if any.
    pub fn cancel(&self) {
        self.orchestrator.cancel();
    }

    /// Status of the download slot.
    pub fn status(&self) -> DownloadStatus {
        self.orchestrator.status()
    }
}
