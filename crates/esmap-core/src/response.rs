//! Adapters between raw JSON text/responses and the domain types.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::ResultDocument;

/// Parse the user's query body. It must be a single JSON object.
pub fn parse_query(text: &str) -> Result<Value> {
    if text.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }
    let body: Value =
        serde_json::from_str(text).map_err(|e| Error::InvalidQuery(e.to_string()))?;
    if !body.is_object() {
        return Err(Error::InvalidQuery("expected a JSON object".to_string()));
    }
    Ok(body)
}

/// Extract `hits.hits[*]._source` as result documents.
///
/// A response without hits yields no documents. A hit whose `_source` is
/// missing or not an object becomes an empty document.
pub fn documents_from_response(response: &Value) -> Result<Vec<ResultDocument>> {
    if !response.is_object() {
        return Err(Error::MalformedResponse("expected a JSON object".to_string()));
    }
    let hits = match response.pointer("/hits/hits") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(hits)) => hits,
        Some(_) => return Err(Error::MalformedResponse("`hits.hits` is not an array".to_string())),
    };
    Ok(hits
        .iter()
        .map(|hit| hit.get("_source").map(ResultDocument::from_source).unwrap_or_default())
        .collect())
}

/// Indented rendering of a response for display next to the layer.
pub fn pretty_response(response: &Value) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
}
