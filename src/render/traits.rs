use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// JSON body posted to `{endpoint}/create-pdf`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderRequest {
    pub url_template: String,
    pub output_filename: String,
}

#[async_trait]
pub trait RenderService: Send + Sync {
    /// Ask the backend at `base_url` to render the document described by
    /// `request` and return the PDF payload.
    async fn render(&self, base_url: &str, request: &RenderRequest) -> Result<Bytes>;
}
