// Embedder-facing surface: engine facade and tracing setup.

pub mod engine;
