use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ShadeConfig;
use crate::types::{BuildingFootprint, GeoPoint, Poi, PoiKind};

/// Parses the numeric prefix of an OSM value such as `"12.5 m"`.
pub fn parse_leading_number(value: &str) -> Option<f64> {
    let value = value.trim_start();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in value.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => seen_dot = true,
            '+' | '-' if i == 0 => {}
            _ => break,
        }
    }
    value[..end].parse().ok()
}

pub fn estimate_height(tags: &HashMap<String, String>, config: &ShadeConfig) -> f64 {
    let tagged = tags
        .get("height")
        .and_then(|h| parse_leading_number(h))
        .filter(|h| h.is_finite() && *h > 0.0);
    if let Some(height) = tagged {
        return height;
    }

    let from_levels = tags
        .get("building:levels")
        .and_then(|l| parse_leading_number(l))
        .map(|levels| levels.trunc() * config.meters_per_level)
        .filter(|h| h.is_finite() && *h > 0.0);
    from_levels.unwrap_or(config.default_height_m)
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum OverpassElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    Way {
        id: i64,
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// Builds footprints from an Overpass `out body; >; out skel` response.
/// Ways whose node references cannot all be resolved keep the ones that can.
pub fn parse_overpass(
    json: &str,
    config: &ShadeConfig,
) -> Result<Vec<BuildingFootprint>, serde_json::Error> {
    let response: OverpassResponse = serde_json::from_str(json)?;

    let nodes: HashMap<i64, GeoPoint> = response
        .elements
        .iter()
        .filter_map(|e| match e {
            OverpassElement::Node { id, lat, lon, .. } => Some((*id, GeoPoint::new(*lat, *lon))),
            _ => None,
        })
        .collect();

    let buildings: Vec<BuildingFootprint> = response
        .elements
        .iter()
        .filter_map(|e| match e {
            OverpassElement::Way { id, nodes: refs, tags } if tags.contains_key("building") => {
                let vertices = refs.iter().filter_map(|r| nodes.get(r).copied()).collect();
                Some(BuildingFootprint::new(
                    id.to_string(),
                    vertices,
                    estimate_height(tags, config),
                ))
            }
            _ => None,
        })
        .collect();

    log::debug!(
        "overpass response: {} nodes, {} buildings",
        nodes.len(),
        buildings.len()
    );
    Ok(buildings)
}

fn poi_kind(tags: &HashMap<String, String>) -> Option<PoiKind> {
    if tags.get("amenity").map(String::as_str) == Some("drinking_water") {
        Some(PoiKind::Water)
    } else if tags.get("shop").map(String::as_str) == Some("convenience") {
        Some(PoiKind::Store)
    } else {
        None
    }
}

/// Drinking fountains and convenience stores among the response's nodes.
/// Unnamed places get their kind's default name.
pub fn parse_overpass_pois(json: &str) -> Result<Vec<Poi>, serde_json::Error> {
    let response: OverpassResponse = serde_json::from_str(json)?;

    let pois: Vec<Poi> = response
        .elements
        .iter()
        .filter_map(|e| match e {
            OverpassElement::Node { id, lat, lon, tags } => {
                let kind = poi_kind(tags)?;
                let name = tags
                    .get("name")
                    .filter(|n| !n.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| kind.default_name().to_string());
                Some(Poi {
                    id: format!("poi-{}", id),
                    location: GeoPoint::new(*lat, *lon),
                    kind,
                    name,
                })
            }
            _ => None,
        })
        .collect();

    log::debug!("overpass response: {} points of interest", pois.len());
    Ok(pois)
}
