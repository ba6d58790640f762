use std::fs;
use std::path::PathBuf;

use bytes::Bytes;
use tracing::{info, warn};

/// Receives a rendered document for delivery. Fire-and-forget: the engine
/// does not observe the result, and a cancel cannot recall bytes already
/// handed off.
pub trait FileSink: Send + Sync {
    fn save(&self, payload: Bytes, filename: &str);
}

/// Sink that writes each payload into a fixed output directory.
pub struct DiskSink {
    output_dir: PathBuf,
}

impl DiskSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl FileSink for DiskSink {
    fn save(&self, payload: Bytes, filename: &str) {
        let path = self.output_dir.join(filename);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("cannot create output directory {}: {}", parent.display(), e);
                    return;
                }
            }
        }
        match fs::write(&path, &payload) {
            Ok(()) => info!("saved {} ({} bytes)", path.display(), payload.len()),
            Err(e) => warn!("failed to save {}: {}", path.display(), e),
        }
    }
}
