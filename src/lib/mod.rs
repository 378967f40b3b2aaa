//! Fetch active NWS Flash Flood Warnings, filter them by county/state
//! text match and derive the map view and overlay layers for a renderer.

use self::geo::{Centerable, Viewport};
use self::geojson::FeatureCollection;
use filter::{Filter, Query};
use output::Output;
use std::error::Error;
use std::io::{Read, Write};

pub mod client;
pub mod config;
pub mod filter;
pub mod geo;
pub mod geojson;
pub mod map;
pub mod output;

/// Select the features matching the query. The input is left untouched:
/// the result is an order-preserving subset with the collection's
/// top-level fields carried over.
pub fn filter_features(collection: &FeatureCollection, query: &Query) -> FeatureCollection {
    let features = collection
        .features
        .iter()
        .filter(|feature| feature.matches(query))
        .cloned()
        .collect();
    FeatureCollection {
        features,
        extra: collection.extra.clone(),
    }
}

/// Map view for a collection: the first feature with a usable geometry
/// provides the center, otherwise the CONUS-wide fallback applies.
pub fn viewport(collection: &FeatureCollection) -> Viewport {
    collection
        .features
        .iter()
        .filter_map(|feature| feature.geometry.as_ref())
        .find_map(Centerable::center)
        .map(Viewport::over)
        .unwrap_or_else(Viewport::conus)
}

/// Read an alerts feature collection, filter it and write the matching
/// features back out as GeoJSON.
pub fn process(
    file: impl Read,
    writer: &mut dyn Write,
    query: &Query,
) -> Result<(), Box<dyn Error>> {
    let collection: FeatureCollection = serde_json::from_reader(file)?;
    let filtered = filter_features(&collection, query);
    filtered.write_geojson(writer)
}
