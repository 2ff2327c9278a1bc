use serde_json::Value;

use crate::layer::LayerSpec;
use crate::types::Feature;

/// Runs searches against the cluster. Transport, auth and retries live behind it.
pub trait QueryExecutor: Send + Sync {
    fn ping(&self) -> anyhow::Result<bool>;
    fn search(&self, index: &str, body: &Value) -> anyhow::Result<Value>;
}

/// Receives finished features and turns them into a visible layer.
pub trait LayerSink {
    fn add_layer(&mut self, spec: &LayerSpec, features: Vec<Feature>) -> anyhow::Result<()>;

    /// Called after a failed `add_layer` so a half-built layer can be removed.
    fn discard_layer(&mut self, _spec: &LayerSpec) {}
}
