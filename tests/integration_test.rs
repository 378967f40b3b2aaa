use flood_tracker::filter::parse;
use flood_tracker::geojson::FeatureCollection;
use flood_tracker::map::{MapDocument, MapOptions};
use flood_tracker::output::Output;
use flood_tracker::{filter_features, process, viewport};
use geojson::GeoJson;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};

fn get_string(cursor: &mut Cursor<Vec<u8>>) -> String {
    cursor.seek(SeekFrom::Start(0)).unwrap();
    let mut out = Vec::new();
    cursor.read_to_end(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn load() -> FeatureCollection {
    let file = File::open("./tests/data/alerts.json").unwrap();
    serde_json::from_reader(file).unwrap()
}

#[test]
fn filter_by_county() {
    let mut cursor = Cursor::new(Vec::new());
    let query = parse("travis", "(Any)");
    let file = File::open("./tests/data/alerts.json").unwrap();
    process(file, &mut cursor, &query).unwrap();

    let string = get_string(&mut cursor);
    let lines: Vec<&str> = string.trim().split('\n').collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Travis County, TX"));
    assert!(!lines[0].contains("Harris County, TX"));
}

#[test]
fn filter_by_state() {
    let collection = load();
    let filtered = filter_features(&collection, &parse("", "TX"));
    let areas: Vec<&str> = filtered
        .features
        .iter()
        .map(|feature| feature.area_desc())
        .collect();
    assert_eq!(
        areas,
        vec![
            "Travis County, TX; Williamson County, TX",
            "Harris County, TX",
            "Bexar County, TX",
        ]
    );
}

#[test]
fn filtered_output_is_valid_geojson() {
    let mut cursor = Cursor::new(Vec::new());
    let collection = load();
    let filtered = filter_features(&collection, &parse("", ""));
    filtered.write_geojson(&mut cursor).unwrap();

    let string = get_string(&mut cursor);
    let geojson: GeoJson = string.trim().parse().unwrap();
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            assert_eq!(collection.features.len(), 5);
        }
        other => panic!("expected a feature collection, got {:?}", other),
    }
}

#[test]
fn summaries_one_line_per_warning() {
    let mut cursor = Cursor::new(Vec::new());
    let collection = load();
    let filtered = filter_features(&collection, &parse("", "LA"));
    filtered.write_json_lines(&mut cursor).unwrap();

    let string = get_string(&mut cursor);
    let lines: Vec<&str> = string.trim().split('\n').collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("Cameron Parish, LA"));
    assert!(lines[0].contains(r#""severity":"Severe""#));
}

#[test]
fn viewport_centers_on_first_warning() {
    let collection = load();
    let viewport = viewport(&collection);
    assert_eq!(viewport.latitude, 30.2);
    assert_eq!(viewport.longitude, -97.8);
    assert_eq!(viewport.zoom, 6);
}

#[test]
fn viewport_of_point_warning() {
    let collection = load();
    let filtered = filter_features(&collection, &parse("harris", "(Any)"));
    let viewport = viewport(&filtered);
    assert_eq!(viewport.latitude, 29.8);
    assert_eq!(viewport.longitude, -95.3);
    assert_eq!(viewport.zoom, 6);
}

#[test]
fn line_string_warning_cannot_center_the_view() {
    let collection = load();
    let filtered = filter_features(&collection, &parse("bexar", "TX"));
    assert_eq!(filtered.features.len(), 1);
    let viewport = viewport(&filtered);
    assert_eq!(viewport.latitude, 39.833);
    assert_eq!(viewport.longitude, -98.583);
    assert_eq!(viewport.zoom, 4);
}

#[test]
fn map_document_for_a_filtered_view() {
    let collection = load();
    let filtered = filter_features(&collection, &parse("travis", "TX"));
    let document = MapDocument::compose(&collection, &filtered, &MapOptions::default());

    assert_eq!(document.center, [30.2, -97.8]);
    assert_eq!(document.zoom, 6);
    assert_eq!(document.tiles, "CartoDB positron");
    assert_eq!(document.wms_layers.len(), 2);
    assert_eq!(document.alerts.collection.features.len(), 1);
    let tooltip = document.alerts.tooltip.unwrap();
    assert_eq!(
        tooltip.fields,
        vec![
            "headline",
            "areaDesc",
            "severity",
            "certainty",
            "effective",
            "expires",
        ]
    );
    assert!(document.bounds.is_some());
}

#[test]
fn map_document_with_no_matches_still_centers_somewhere() {
    let collection = load();
    let filtered = filter_features(&collection, &parse("nowhere", "(Any)"));
    assert!(filtered.features.is_empty());
    let document = MapDocument::compose(&collection, &filtered, &MapOptions::default());

    // an over-narrow filter keeps the view on the active warnings
    assert_eq!(document.center, [30.2, -97.8]);
    assert_eq!(document.zoom, 6);
    assert_eq!(document.alerts.tooltip, None);
    assert_eq!(document.bounds, None);
}

#[test]
fn map_document_round_trips_through_json() {
    let collection = load();
    let filtered = filter_features(&collection, &parse("", "TX"));
    let document = MapDocument::compose(&collection, &filtered, &MapOptions::default());
    let json = serde_json::to_string(&document).unwrap();
    let parsed: MapDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, document);
}
