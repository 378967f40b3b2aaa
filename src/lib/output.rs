use super::geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};
use serde_json::to_string;
use std::error::Error;
use std::io::Write;

pub trait Output {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;
}

/// The fields the warning list panel shows, one JSON line per warning.
#[derive(Serialize, Deserialize)]
struct JSONAlert {
    headline: String,
    #[serde(rename = "areaDesc")]
    area_desc: String,
    severity: String,
    certainty: String,
    effective: String,
    expires: String,
}

impl From<&Feature> for JSONAlert {
    fn from(feature: &Feature) -> Self {
        JSONAlert {
            headline: feature
                .property_str("headline")
                .unwrap_or("Flash Flood Warning")
                .to_string(),
            area_desc: feature.area_desc().to_string(),
            severity: feature.property_str("severity").unwrap_or_default().to_string(),
            certainty: feature.property_str("certainty").unwrap_or_default().to_string(),
            effective: feature.property_str("effective").unwrap_or_default().to_string(),
            expires: feature.property_str("expires").unwrap_or_default().to_string(),
        }
    }
}

impl Output for FeatureCollection {
    fn write_geojson(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let string = to_string(self)?;
        writeln!(writer, "{}", string)?;
        Ok(())
    }

    fn write_json_lines(&self, writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        for feature in self.features.iter() {
            let alert = JSONAlert::from(feature);
            let json = to_string(&alert)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }
}
