use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::country::{Boundary, CountryFeature, Ring};

/// Antarctica is excluded from the picker at load time.
const EXCLUDED_ISO: &str = "AQ";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("invalid GeoJSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, got {0:?}")]
    NotACollection(String),
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    properties: RawProperties,
    #[serde(default)]
    geometry: Option<serde_json::Value>,
}

#[derive(Deserialize, Default)]
struct RawProperties {
    // Natural Earth ships both ADMIN and NAME; aliasing only ADMIN avoids
    // serde's duplicate-field error on such files.
    #[serde(alias = "ADMIN", alias = "admin")]
    name: Option<String>,
    #[serde(alias = "ISO_A2", alias = "iso_a2")]
    iso: Option<String>,
}

/// Raw positions keep their full length so 3-element (lng, lat, alt)
/// positions parse; only the first two components are used.
#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
}

/// Parses a country-boundary FeatureCollection.
///
/// Features are keyed by admin name and two-letter ISO code. Per-feature
/// problems (missing identity, non-polygonal or missing geometry, Antarctica)
/// skip that feature with a warning; only a malformed collection is an error,
/// and the page recovers from that by mounting an empty, non-interactive
/// globe.
pub fn parse_countries(bytes: &[u8]) -> Result<Vec<CountryFeature>, DatasetError> {
    let raw: RawCollection = serde_json::from_slice(bytes)?;
    if raw.kind != "FeatureCollection" {
        return Err(DatasetError::NotACollection(raw.kind));
    }

    let mut out = Vec::with_capacity(raw.features.len());
    for feature in raw.features {
        let Some(name) = feature.properties.name else {
            warn!("skipping feature without an admin name");
            continue;
        };
        let Some(iso) = feature.properties.iso else {
            warn!(country = %name, "skipping feature without an ISO code");
            continue;
        };
        let iso = iso.to_ascii_uppercase();
        if iso.len() != 2 || !iso.bytes().all(|b| b.is_ascii_uppercase()) {
            warn!(country = %name, iso = %iso, "skipping feature with a non-ISO code");
            continue;
        }
        if iso == EXCLUDED_ISO {
            continue;
        }

        let Some(geometry) = feature.geometry else {
            warn!(country = %name, "skipping feature without geometry");
            continue;
        };
        let boundary = match serde_json::from_value::<RawGeometry>(geometry) {
            Ok(RawGeometry::Polygon { coordinates }) => Boundary::Polygon(to_rings(coordinates)),
            Ok(RawGeometry::MultiPolygon { coordinates }) => {
                Boundary::MultiPolygon(coordinates.into_iter().map(to_rings).collect())
            }
            Err(_) => {
                warn!(country = %name, "skipping feature with non-polygonal geometry");
                continue;
            }
        };

        out.push(CountryFeature {
            name,
            iso,
            boundary,
        });
    }

    Ok(out)
}

fn to_rings(raw: Vec<Vec<Vec<f64>>>) -> Vec<Ring> {
    raw.into_iter()
        .map(|ring| {
            ring.into_iter()
                .filter_map(|pos| match pos.as_slice() {
                    [lng, lat, ..] => Some([*lng, *lat]),
                    _ => None,
                })
                .collect()
        })
        .collect()
}
