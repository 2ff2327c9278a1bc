//! Terminal-side collaborators for `esmap`: a layer sink that writes JSON
//! lines and a query executor that replays a saved search response.

use anyhow::Context;
use serde_json::{json, Map, Value};
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

use esmap_core::config::resolve_with_base;
use esmap_core::layer::LayerSpec;
use esmap_core::traits::{LayerSink, QueryExecutor};
use esmap_core::Feature;

pub fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

/// A query given as `@path` is read from that file, relative paths taken from
/// `base`; anything else is the query itself.
pub fn query_text(arg: &str, base: &Path) -> anyhow::Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let path = resolve_with_base(base, path);
            fs::read_to_string(&path).with_context(|| format!("failed to read query from {}", path.display()))
        }
        None => Ok(arg.to_string()),
    }
}

/// Writes one header line describing the layer, then one line per feature.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, value: &Value) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> LayerSink for JsonLinesSink<W> {
    fn add_layer(&mut self, spec: &LayerSpec, features: Vec<Feature>) -> anyhow::Result<()> {
        self.write_line(&json!({
            "layer": spec.name,
            "uri": spec.uri(),
            "provider": spec.provider(),
            "fields": spec.fields,
        }))?;
        for feature in &features {
            let properties: Map<String, Value> = spec
                .fields
                .iter()
                .cloned()
                .zip(feature.attributes().iter().cloned().map(Value::String))
                .collect();
            self.write_line(&json!({ "wkt": feature.geometry_wkt(), "properties": properties }))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn discard_layer(&mut self, spec: &LayerSpec) {
        // lines already written cannot be taken back
        warn!(layer = %spec.name, "output may contain a partial layer");
    }
}

/// Answers every search with the same saved response.
pub struct ReplayExecutor {
    response: Value,
}

impl ReplayExecutor {
    pub fn new(response: Value) -> Self {
        Self { response }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        read_json(path).map(Self::new)
    }
}

impl QueryExecutor for ReplayExecutor {
    fn ping(&self) -> anyhow::Result<bool> {
        Ok(true)
    }

    fn search(&self, index: &str, body: &Value) -> anyhow::Result<Value> {
        debug!(index, %body, "replaying saved response");
        Ok(self.response.clone())
    }
}
