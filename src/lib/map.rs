use super::geo::{bounds, Bounds};
use super::geojson::{Feature, FeatureCollection};
use super::viewport;
use serde::{Deserialize, Serialize};

/// MRMS QPE rasters from the Iowa State IEM WMS endpoint; `mrms_p1h` is
/// the 1-hour accumulation, `mrms_p24h` the 24-hour one.
pub const MRMS_WMS_BASE: &str = "https://mesonet.agron.iastate.edu/cgi-bin/wms/us/mrms_nn.cgi";
pub const BASEMAP_TILES: &str = "CartoDB positron";

const ALERT_LAYER_NAME: &str = "Active Flash Flood Warnings (NWS)";
const MRMS_ATTRIBUTION: &str = "MRMS QPE via IEM";

const TOOLTIP_FIELDS: [(&str, &str); 6] = [
    ("headline", "Headline"),
    ("areaDesc", "Areas"),
    ("severity", "Severity"),
    ("certainty", "Certainty"),
    ("effective", "Effective"),
    ("expires", "Expires"),
];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LayerStyle {
    pub color: String,
    pub weight: u32,
    #[serde(rename = "fillOpacity")]
    pub fill_opacity: f64,
}

impl LayerStyle {
    fn alert() -> Self {
        LayerStyle {
            color: "#B80D57".to_string(),
            weight: 2,
            fill_opacity: 0.15,
        }
    }

    fn highlight() -> Self {
        LayerStyle {
            color: "#FF2E63".to_string(),
            weight: 3,
            fill_opacity: 0.25,
        }
    }
}

/// One georeferenced raster overlay, described the way a WMS tile layer
/// is configured.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WmsLayer {
    pub url: String,
    pub name: String,
    pub layers: String,
    pub fmt: String,
    pub transparent: bool,
    pub version: String,
    pub opacity: f64,
    pub attribution: String,
}

impl WmsLayer {
    fn mrms(layers: &str, name: &str, opacity: f64) -> Self {
        WmsLayer {
            url: MRMS_WMS_BASE.to_string(),
            name: name.to_string(),
            layers: layers.to_string(),
            fmt: "image/png".to_string(),
            transparent: true,
            version: "1.3.0".to_string(),
            opacity,
            attribution: MRMS_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub fields: Vec<String>,
    pub aliases: Vec<String>,
    pub sticky: bool,
    pub localize: bool,
}

/// Tooltip wiring for the alert overlay: of the fields worth showing,
/// keep those present on the first feature. No features, no properties or
/// no overlap means no tooltip.
fn tooltip(features: &[Feature]) -> Option<Tooltip> {
    let properties = features.first()?.properties.as_ref()?;
    let (fields, aliases): (Vec<_>, Vec<_>) = TOOLTIP_FIELDS
        .iter()
        .filter(|(field, _)| properties.contains_key(*field))
        .map(|(field, alias)| (field.to_string(), alias.to_string()))
        .unzip();
    if fields.is_empty() {
        return None;
    }
    Some(Tooltip {
        fields,
        aliases,
        sticky: true,
        localize: true,
    })
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AlertOverlay {
    pub name: String,
    pub style: LayerStyle,
    pub highlight: LayerStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
    pub collection: FeatureCollection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub show_p1h: bool,
    pub show_p24h: bool,
    pub opacity: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        MapOptions {
            show_p1h: true,
            show_p24h: true,
            opacity: 0.55,
        }
    }
}

/// Everything a renderer needs to draw the dashboard map: center/zoom,
/// basemap, rainfall overlays and the styled alert layer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapDocument {
    pub center: [f64; 2],
    pub zoom: u32,
    pub tiles: String,
    pub wms_layers: Vec<WmsLayer>,
    pub alerts: AlertOverlay,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

impl MapDocument {
    /// Compose a map over the filtered warnings. The view centers on the
    /// filtered features, or on the full set when the filter matched
    /// nothing, so an over-narrow query still shows where the action is.
    pub fn compose(
        all: &FeatureCollection,
        filtered: &FeatureCollection,
        options: &MapOptions,
    ) -> Self {
        let centered_on = if filtered.features.is_empty() {
            all
        } else {
            filtered
        };
        let viewport = viewport(centered_on);
        let mut wms_layers = vec![];
        if options.show_p24h {
            wms_layers.push(WmsLayer::mrms(
                "mrms_p24h",
                "MRMS 24-hour Precip",
                options.opacity,
            ));
        }
        if options.show_p1h {
            wms_layers.push(WmsLayer::mrms(
                "mrms_p1h",
                "MRMS 1-hour Precip",
                options.opacity,
            ));
        }
        let tooltip = tooltip(&filtered.features);
        let bounds = bounds(
            filtered
                .features
                .iter()
                .filter_map(|feature| feature.geometry.as_ref()),
        );
        MapDocument {
            center: [viewport.latitude, viewport.longitude],
            zoom: viewport.zoom,
            tiles: BASEMAP_TILES.to_string(),
            wms_layers,
            alerts: AlertOverlay {
                name: ALERT_LAYER_NAME.to_string(),
                style: LayerStyle::alert(),
                highlight: LayerStyle::highlight(),
                tooltip,
                collection: filtered.clone(),
            },
            bounds,
        }
    }
}
