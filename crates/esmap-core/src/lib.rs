#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

//! esmap-core
//!
//! Turns search-engine hits carrying GeoJSON geometries into WKT map features.
//! `wkt` encodes single geometries, `materialize` builds a feature batch with a
//! shared attribute schema, and `session`/`layer` wire that to the query
//! executor and layer sink collaborators.

pub mod config;
pub mod connection;
pub mod error;
pub mod layer;
pub mod materialize;
pub mod response;
pub mod session;
pub mod traits;
pub mod types;
pub mod wkt;

pub use error::{EncodeError, Error, Result};
pub use materialize::materialize;
pub use types::{Feature, GeometryKind, MaterializationResult, ResultDocument, Schema};
pub use wkt::{encode, to_wkt};
