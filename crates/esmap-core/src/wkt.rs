//! GeoJSON geometry objects to WKT text.
//!
//! The output keeps the punctuation the map layer has always been fed:
//! `LINESTRING` and `POLYGON` rings join their pairs with spaces only,
//! `MULTIPOINT` separates parenthesized points with a space, and the
//! `MULTILINESTRING`/`MULTIPOLYGON` forms use commas. Only the outer ring of a
//! polygon is kept; holes are dropped.

use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use std::fmt;

use crate::error::EncodeError;
use crate::types::GeometryKind;

type Position = (Number, Number);
type Ring = Vec<Position>;

/// Typed view over a geometry payload. Polygons only hold their outer ring.
#[derive(Debug, Clone, PartialEq)]
enum Geometry {
    Point(Number, Number),
    LineString(Vec<Position>),
    Polygon(Ring),
    MultiPoint(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    MultiPolygon(Vec<Ring>),
}

impl Geometry {
    fn from_json(value: &Value) -> Result<Self, EncodeError> {
        let object = value.as_object().ok_or(EncodeError::NotAnObject)?;
        let kind: GeometryKind = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(EncodeError::MissingType)?
            .parse()?;
        let coordinates = object
            .get("coordinates")
            .ok_or(EncodeError::MissingCoordinates(kind))?;

        let geometry = match kind {
            GeometryKind::Point => {
                // only the first two components have to be numbers
                let components: Vec<Value> = coords(kind, coordinates)?;
                match components.as_slice() {
                    [x, y, ..] => Geometry::Point(coords(kind, x)?, coords(kind, y)?),
                    short => return Err(EncodeError::ShortPoint(short.len())),
                }
            }
            GeometryKind::LineString => Geometry::LineString(coords(kind, coordinates)?),
            GeometryKind::Polygon => {
                let rings: Vec<Ring> = coords(kind, coordinates)?;
                Geometry::Polygon(outer_ring(kind, rings)?)
            }
            GeometryKind::MultiPoint => Geometry::MultiPoint(coords(kind, coordinates)?),
            GeometryKind::MultiLineString => {
                Geometry::MultiLineString(coords(kind, coordinates)?)
            }
            GeometryKind::MultiPolygon => {
                let polygons: Vec<Vec<Ring>> = coords(kind, coordinates)?;
                Geometry::MultiPolygon(
                    polygons
                        .into_iter()
                        .map(|rings| outer_ring(kind, rings))
                        .collect::<Result<_, _>>()?,
                )
            }
        };
        Ok(geometry)
    }
}

fn coords<T: DeserializeOwned>(kind: GeometryKind, coordinates: &Value) -> Result<T, EncodeError> {
    T::deserialize(coordinates).map_err(|source| EncodeError::BadCoordinates { kind, source })
}

fn outer_ring(kind: GeometryKind, rings: Vec<Ring>) -> Result<Ring, EncodeError> {
    rings.into_iter().next().ok_or(EncodeError::MissingOuterRing(kind))
}

fn pair((x, y): &Position) -> String {
    format!("{x} {y}")
}

fn join_pairs(positions: &[Position], separator: &str) -> String {
    positions.iter().map(pair).collect::<Vec<_>>().join(separator)
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Geometry::Point(x, y) => write!(f, "POINT({x} {y})"),
            Geometry::LineString(points) => write!(f, "LINESTRING({})", join_pairs(points, " ")),
            Geometry::Polygon(ring) => write!(f, "POLYGON(({}))", join_pairs(ring, " ")),
            Geometry::MultiPoint(points) => {
                let points: Vec<String> = points.iter().map(|p| format!("({})", pair(p))).collect();
                write!(f, "MULTIPOINT({})", points.join(" "))
            }
            Geometry::MultiLineString(lines) => {
                let lines: Vec<String> = lines
                    .iter()
                    .map(|line| format!("({})", join_pairs(line, ", ")))
                    .collect();
                write!(f, "MULTILINESTRING({})", lines.join(", "))
            }
            Geometry::MultiPolygon(rings) => {
                let polygons: Vec<String> = rings
                    .iter()
                    .map(|ring| format!("(({}))", join_pairs(ring, ", ")))
                    .collect();
                write!(f, "MULTIPOLYGON({})", polygons.join(", "))
            }
        }
    }
}

/// Encode a GeoJSON geometry object as WKT.
pub fn encode(geometry: &Value) -> Result<String, EncodeError> {
    Geometry::from_json(geometry).map(|geometry| geometry.to_string())
}

/// Like [`encode`], but an empty string stands for "no geometry producible".
pub fn to_wkt(geometry: &Value) -> String {
    encode(geometry).unwrap_or_default()
}

/// Declared kind of a geometry object, without checking its coordinates.
pub fn declared_kind(geometry: &Value) -> Option<GeometryKind> {
    geometry.get("type")?.as_str()?.parse().ok()
}
