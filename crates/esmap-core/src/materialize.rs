//! Turns a batch of search documents into layer features.

use tracing::{debug, info, warn};

use crate::types::{Feature, GeometryKind, MaterializationResult, ResultDocument, Schema};
use crate::wkt;

pub const NO_RESULTS: &str = "no results found";

/// Build features for every document whose geometry encodes.
///
/// Documents without a geometry are skipped silently. Documents whose geometry
/// cannot be encoded are skipped with a warning; the batch always completes.
pub fn materialize(documents: &[ResultDocument]) -> MaterializationResult {
    if documents.is_empty() {
        info!("search returned no documents");
        return MaterializationResult {
            warnings: vec![NO_RESULTS.to_string()],
            ..MaterializationResult::default()
        };
    }

    let layer_geometry_kind = layer_kind(documents);
    let schema = Schema::from_documents(documents);

    let mut features = Vec::new();
    let mut warnings = Vec::new();
    for (index, document) in documents.iter().enumerate() {
        let Some(geometry) = document.geometry.as_ref() else {
            debug!(index, "document has no geometry, skipping");
            continue;
        };
        match wkt::encode(geometry) {
            Ok(text) => features.push(Feature::new(text, schema.row_for(document))),
            Err(err) => {
                warn!(index, error = %err, "could not encode geometry");
                warnings.push(format!("could not encode geometry for document {index}: {err}"));
            }
        }
    }

    info!(
        documents = documents.len(),
        features = features.len(),
        rejected = warnings.len(),
        fields = schema.len(),
        kind = %layer_geometry_kind,
        "materialized search results"
    );
    MaterializationResult { features, warnings, layer_geometry_kind, schema }
}

/// Layer kind hint taken from the first document that carries a geometry.
///
/// Later documents may be of another kind and are still encoded one by one;
/// the layer only gets one kind. Falls back to `Point`.
pub fn layer_kind(documents: &[ResultDocument]) -> GeometryKind {
    documents
        .iter()
        .find_map(|doc| doc.geometry.as_ref())
        .and_then(wkt::declared_kind)
        .unwrap_or_default()
}
