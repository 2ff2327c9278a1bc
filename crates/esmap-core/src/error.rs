use thiserror::Error;

use crate::types::GeometryKind;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("All fields are required. Missing: {}", .0.join(", "))]
    MissingConnectionFields(Vec<&'static str>),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Please connect to Elasticsearch first")]
    NotConnected,

    #[error("Please enter a query")]
    EmptyQuery,

    #[error("Invalid JSON query format: {0}")]
    InvalidQuery(String),

    #[error("Error running query: {0}")]
    Query(String),

    #[error("Malformed search response: {0}")]
    MalformedResponse(String),

    #[error("Error creating layer: {0}")]
    LayerCreation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a geometry payload could not be turned into WKT.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("geometry is not a JSON object")]
    NotAnObject,

    #[error("geometry has no `type` tag")]
    MissingType,

    #[error("unknown geometry type `{0}`")]
    UnknownType(String),

    #[error("{0} geometry has no coordinates")]
    MissingCoordinates(GeometryKind),

    #[error("{kind} coordinates are malformed: {source}")]
    BadCoordinates {
        kind: GeometryKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Point needs at least two coordinate components, got {0}")]
    ShortPoint(usize),

    #[error("{0} geometry has a polygon without an outer ring")]
    MissingOuterRing(GeometryKind),
}
