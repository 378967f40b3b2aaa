use super::geojson::Geometry;
use geo::prelude::*;
use geo_types::{LineString, Point};

/// Arbitrary 0.1m tolerance; was `geo::COORD_PRECISION` before it was
/// dropped from the `geo`/`geo-types` crates. Restored here unchanged.
const COORD_PRECISION: f32 = 0.1;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Geographic center of the contiguous US, used when no alert geometry is
/// usable and as the stand-in coordinate for points without one.
pub const CONUS_CENTER: Location = Location {
    lat: 39.833,
    lon: -98.583,
};

/// Zoom for a view centered on a single warning.
pub const ALERT_ZOOM: u32 = 6;
/// Zoom for the nation-wide fallback view.
pub const CONUS_ZOOM: u32 = 4;

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl PartialEq<Location> for Location {
    fn eq(&self, other: &Self) -> bool {
        let self_point = Point::new(self.lon, self.lat);
        let other_point = Point::new(other.lon, other.lat);
        let distance = self_point.haversine_distance(&other_point);
        distance < COORD_PRECISION.into()
    }
}

impl From<Location> for [f64; 2] {
    fn from(loc: Location) -> Self {
        [loc.lat, loc.lon]
    }
}

/// A map center plus zoom level, recomputed on every filter change.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u32,
}

impl Viewport {
    pub fn over(center: Location) -> Self {
        Viewport {
            latitude: center.lat,
            longitude: center.lon,
            zoom: ALERT_ZOOM,
        }
    }

    /// The CONUS-wide fallback view.
    pub fn conus() -> Self {
        Viewport {
            latitude: CONUS_CENTER.lat,
            longitude: CONUS_CENTER.lon,
            zoom: CONUS_ZOOM,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Copy)]
pub struct Bounds {
    e: f64,
    n: f64,
    s: f64,
    w: f64,
}

fn coordinate_pair(value: &Value) -> Option<(f64, f64)> {
    let pair = value.as_array()?;
    let lon = pair.get(0)?.as_f64()?;
    let lat = pair.get(1)?.as_f64()?;
    Some((lon, lat))
}

/// A linear ring as lon/lat tuples. Empty arrays and rings with any
/// malformed vertex are unusable.
fn ring(value: &Value) -> Option<Vec<(f64, f64)>> {
    let vertices = value.as_array()?;
    if vertices.is_empty() {
        return None;
    }
    vertices.iter().map(coordinate_pair).collect()
}

fn first_ring(value: &Value) -> Option<Vec<(f64, f64)>> {
    let rings = value.as_array()?;
    ring(rings.first()?)
}

/// Arithmetic mean of the ring vertices, lon and lat independently.
fn ring_centroid(ring: &[(f64, f64)]) -> Option<Location> {
    if ring.is_empty() {
        return None;
    }
    let len = ring.len() as f64;
    let lon = ring.iter().map(|vertex| vertex.0).sum::<f64>() / len;
    let lat = ring.iter().map(|vertex| vertex.1).sum::<f64>() / len;
    Some(Location { lat, lon })
}

pub trait Centerable {
    fn center(&self) -> Option<Location>;
}

/// Per-geometry-type validation: a geometry either yields a center or is
/// unusable (`None`), it never errors. Polygons center on their first
/// ring, multi-polygons on the first polygon's first ring, points on
/// their own coordinates (or [`CONUS_CENTER`] when the coordinates are
/// missing). Everything else is unusable.
impl Centerable for Geometry {
    fn center(&self) -> Option<Location> {
        match self {
            Geometry::Polygon { coordinates } => {
                let exterior = first_ring(coordinates.as_ref()?)?;
                ring_centroid(&exterior)
            }
            Geometry::MultiPolygon { coordinates } => {
                let polygons = coordinates.as_ref()?.as_array()?;
                let rings = polygons.first()?.as_array()?;
                let exterior = ring(rings.first()?)?;
                ring_centroid(&exterior)
            }
            Geometry::Point { coordinates } => match coordinates {
                Some(value) => {
                    let (lon, lat) = coordinate_pair(value)?;
                    Some(Location { lat, lon })
                }
                None => Some(CONUS_CENTER),
            },
            _ => None,
        }
    }
}

fn exterior_coordinates(geometry: &Geometry) -> Vec<(f64, f64)> {
    match geometry {
        Geometry::Point { coordinates } => coordinates
            .as_ref()
            .and_then(coordinate_pair)
            .map(|pair| vec![pair])
            .unwrap_or_default(),
        Geometry::Polygon { coordinates } => coordinates
            .as_ref()
            .and_then(first_ring)
            .unwrap_or_default(),
        Geometry::MultiPolygon { coordinates } => coordinates
            .as_ref()
            .and_then(Value::as_array)
            .map(|polygons| {
                polygons
                    .iter()
                    .filter_map(first_ring)
                    .flatten()
                    .collect()
            })
            .unwrap_or_default(),
        _ => vec![],
    }
}

/// Bounding box over every usable coordinate of the given geometries,
/// for renderers that fit the view to the warnings instead of centering.
pub fn bounds<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> Option<Bounds> {
    let coordinates: Vec<(f64, f64)> = geometries
        .into_iter()
        .flat_map(exterior_coordinates)
        .collect();
    if coordinates.is_empty() {
        return None;
    }
    let line_string: LineString<f64> = coordinates.into();
    let rect = line_string.bounding_rect()?;
    Some(Bounds {
        e: rect.max().x,
        n: rect.max().y,
        s: rect.min().y,
        w: rect.min().x,
    })
}
