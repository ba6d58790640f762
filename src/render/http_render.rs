use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, warn};

use super::traits::{RenderRequest, RenderService};

/// HTTP client for the render backend. The request deadline is owned by
/// the orchestrator, so the underlying client carries none of its own.
pub struct HttpRenderClient {
    client: Client,
}

impl HttpRenderClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpRenderClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderService for HttpRenderClient {
    async fn render(&self, base_url: &str, request: &RenderRequest) -> Result<Bytes> {
        let url = format!("{}/create-pdf", base_url);
        debug!("render request url={} output={}", url, request.output_filename);

        let resp = self.client.post(&url).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            warn!("render request failed status={} url={}", status.as_u16(), url);
            return Err(anyhow!("render failed: HTTP {}", status.as_u16()));
        }

        let payload = resp.bytes().await?;
        debug!("render response {} bytes", payload.len());
        Ok(payload)
    }
}
