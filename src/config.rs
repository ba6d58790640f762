use std::time::Duration;

use serde::Deserialize;

/// Hosted render service, reachable by default.
pub const HOSTED_ENDPOINT: &str = "https://thesis-downloader.onrender.com";

/// Local development render service at its fixed port.
pub const LOCAL_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Remote catalog resource, fetched once at startup.
pub const CATALOG_URL: &str =
    "https://res.cloudinary.com/dt6ag4u38/raw/upload/v1736011070/data_aguht0.json";

/// Client-enforced deadline for a single render request (15 minutes).
pub const RENDER_TIMEOUT_MS: u64 = 15 * 60 * 1000;

/// Top-level configuration for the download engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// URL of the catalog JSON resource.
    pub catalog_url: String,
    /// Deadline for a single render request, in milliseconds.
    pub render_timeout_ms: u64,
    /// Directory where downloaded PDFs are written.
    pub output_dir: String,
}

impl EngineConfig {
    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            catalog_url: CATALOG_URL.to_string(),
            render_timeout_ms: RENDER_TIMEOUT_MS,
            output_dir: String::new(),
        }
    }
}
