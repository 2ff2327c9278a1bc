//! Layer description and the hand-off of features to a [`LayerSink`].

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::materialize::NO_RESULTS;
use crate::traits::LayerSink;
use crate::types::{GeometryKind, MaterializationResult, Schema};

pub const DEFAULT_LAYER_NAME: &str = "Elasticsearch Results";
/// Coordinates are assumed to be WGS84 longitude/latitude.
pub const DEFAULT_CRS: &str = "EPSG:4326";
pub const MEMORY_PROVIDER: &str = "memory";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerConfig {
    pub name: String,
    pub crs: String,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self { name: DEFAULT_LAYER_NAME.to_string(), crs: DEFAULT_CRS.to_string() }
    }
}

/// What the sink needs to create the layer: kind, CRS, name and string columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    pub name: String,
    pub geometry_kind: GeometryKind,
    pub crs: String,
    pub fields: Vec<String>,
}

impl LayerSpec {
    pub fn new(geometry_kind: GeometryKind, schema: &Schema, config: &LayerConfig) -> Self {
        Self {
            name: config.name.clone(),
            geometry_kind,
            crs: config.crs.clone(),
            fields: schema.fields().to_vec(),
        }
    }

    /// Memory-layer URI, e.g. `Point?crs=EPSG:4326`.
    pub fn uri(&self) -> String {
        format!("{}?crs={}", self.geometry_kind, self.crs)
    }

    pub fn provider(&self) -> &'static str {
        MEMORY_PROVIDER
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub warnings: Vec<String>,
    /// `None` when there was nothing to load and the sink was never called.
    pub layer: Option<LayerSpec>,
}

impl LoadReport {
    /// User-facing text: one line per warning, then the outcome.
    ///
    /// An empty hit list is reported by its warning alone.
    pub fn summary(&self) -> String {
        if self.loaded == 0 && matches!(self.warnings.as_slice(), [only] if only == NO_RESULTS) {
            return NO_RESULTS.to_string();
        }
        let outcome = if self.loaded > 0 {
            format!("Loaded {} features with all fields as attributes.", self.loaded)
        } else {
            "No valid features found.".to_string()
        };
        self.warnings
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(outcome.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Hand the features of `result` to `sink` as one layer.
///
/// Nothing is sent when there are no features. A sink failure is reported
/// as [`Error::LayerCreation`] after the sink has been asked to discard the layer.
pub fn load_into<S: LayerSink + ?Sized>(
    sink: &mut S,
    result: MaterializationResult,
    config: &LayerConfig,
) -> Result<LoadReport> {
    let MaterializationResult { features, warnings, layer_geometry_kind, schema } = result;
    if features.is_empty() {
        return Ok(LoadReport { loaded: 0, warnings, layer: None });
    }

    let spec = LayerSpec::new(layer_geometry_kind, &schema, config);
    let loaded = features.len();
    if let Err(err) = sink.add_layer(&spec, features) {
        warn!(layer = %spec.name, error = %err, "layer creation failed, discarding");
        sink.discard_layer(&spec);
        return Err(Error::LayerCreation(format!("{err:#}")));
    }
    info!(layer = %spec.name, uri = %spec.uri(), loaded, "layer loaded");
    Ok(LoadReport { loaded, warnings, layer: Some(spec) })
}
