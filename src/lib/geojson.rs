use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// GeoJSON geometry with loosely typed coordinate payloads.
///
/// The alerts feed is not guaranteed to be well-formed, so coordinates are
/// kept as raw JSON here and validated per geometry type in [`crate::geo`].
/// A geometry with a `type` tag outside the GeoJSON vocabulary parses as
/// `Unknown` instead of failing the whole collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Value>,
    },
    MultiPoint {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Value>,
    },
    LineString {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Value>,
    },
    MultiLineString {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Value>,
    },
    Polygon {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Value>,
    },
    MultiPolygon {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Value>,
    },
    GeometryCollection {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        geometries: Option<Value>,
    },
    #[serde(other)]
    Unknown,
}

/// A single alert feature. `areaDesc` and friends live in `properties`,
/// everything else (`id`, `type`, ...) is carried through `extra` so a
/// filtered feature round-trips unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Feature {
    /// The free-text list of affected areas, e.g. "Travis County, TX".
    /// Missing or non-string values degrade to an empty string.
    pub fn area_desc(&self) -> &str {
        self.property_str("areaDesc").unwrap_or_default()
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref()?.get(key)
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key)?.as_str()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
