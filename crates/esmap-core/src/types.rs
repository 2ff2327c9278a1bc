//! Domain types shared by the encoder, the materializer and the layer loader.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::EncodeError;

/// Raw attribute mapping of a search hit's `_source`.
pub type Attributes = Map<String, Value>;

/// Key that carries the geometry inside `_source`. Never an attribute column.
pub const GEOMETRY_KEY: &str = "geometry";

/// The geometry kinds a layer can be created with.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    #[default]
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 6] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPoint,
        GeometryKind::MultiLineString,
        GeometryKind::MultiPolygon,
    ];

    /// GeoJSON spelling, also used in memory-layer URIs.
    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }

    pub fn wkt_tag(self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
            GeometryKind::MultiPoint => "MULTIPOINT",
            GeometryKind::MultiLineString => "MULTILINESTRING",
            GeometryKind::MultiPolygon => "MULTIPOLYGON",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive: `point`, `Point` and `POINT` all parse.
impl FromStr for GeometryKind {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeometryKind::ALL
            .into_iter()
            .find(|kind| kind.wkt_tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| EncodeError::UnknownType(s.to_string()))
    }
}

/// One search hit, split into plain attributes and its optional geometry.
///
/// A `geometry` key holding `null` still counts as present; the encoder then
/// rejects it and the materializer reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultDocument {
    pub attributes: Attributes,
    pub geometry: Option<Value>,
}

impl ResultDocument {
    pub fn new(attributes: Attributes, geometry: Option<Value>) -> Self {
        Self { attributes, geometry }
    }

    /// Build from a hit's `_source`. Anything but an object yields an empty document.
    pub fn from_source(source: &Value) -> Self {
        let Some(object) = source.as_object() else {
            return Self::default();
        };
        let mut attributes = object.clone();
        let geometry = attributes.remove(GEOMETRY_KEY);
        Self::new(attributes, geometry)
    }

    pub fn has_geometry(&self) -> bool {
        self.geometry.is_some()
    }
}

/// Ordered union of attribute names across one batch of documents.
///
/// Fields are kept in lexical order so every row built from the same schema
/// lines up position by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<String>,
}

impl Schema {
    pub fn from_documents(documents: &[ResultDocument]) -> Self {
        let names: BTreeSet<&str> = documents
            .iter()
            .flat_map(|doc| doc.attributes.keys())
            .map(String::as_str)
            .filter(|name| *name != GEOMETRY_KEY)
            .collect();
        Self { fields: names.into_iter().map(str::to_string).collect() }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn position(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|name| name == field)
    }

    /// Attribute row for `document`, one text cell per schema field.
    pub fn row_for(&self, document: &ResultDocument) -> Vec<String> {
        self.fields
            .iter()
            .map(|field| document.attributes.get(field).map(attribute_text).unwrap_or_default())
            .collect()
    }
}

/// Text form of an attribute value as stored in a string-typed layer column.
///
/// Strings are taken verbatim, `null` becomes empty, everything else is its
/// compact JSON text.
pub fn attribute_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// A map feature ready for the layer sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feature {
    geometry_wkt: String,
    attributes: Vec<String>,
}

impl Feature {
    pub(crate) fn new(geometry_wkt: String, attributes: Vec<String>) -> Self {
        Self { geometry_wkt, attributes }
    }

    pub fn geometry_wkt(&self) -> &str {
        &self.geometry_wkt
    }

    /// Cells aligned with the [`Schema`] of the result that produced this feature.
    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn attribute<'a>(&'a self, schema: &Schema, field: &str) -> Option<&'a str> {
        schema
            .position(field)
            .and_then(|index| self.attributes.get(index))
            .map(String::as_str)
    }
}

/// Everything one materialization pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterializationResult {
    pub features: Vec<Feature>,
    pub warnings: Vec<String>,
    pub layer_geometry_kind: GeometryKind,
    pub schema: Schema,
}
