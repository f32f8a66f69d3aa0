//! Regional choropleth join.
//!
//! Joins the boundary file's feature collection against the latest
//! per-region counts on the numeric `codregion` property, producing an
//! enriched feature collection the D3 map renders directly. The join is
//! strict in both directions; a mismatch means the scrape or the boundary
//! file drifted and is reported instead of drawing a partial map.

use cvp_db::models::RegionCount;
use geojson::{FeatureCollection, GeoJson};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Property carrying the numeric region code in the boundary file.
pub const REGION_CODE_PROPERTY: &str = "codregion";

/// Errors raised while joining counts onto the boundary features.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapJoinError {
    /// The boundary file is not valid GeoJSON.
    Parse(String),
    /// The boundary file is valid GeoJSON but not a FeatureCollection.
    NotACollection,
    /// A feature carries no usable numeric region code.
    MissingRegionCode { feature: usize },
    /// A boundary feature's code has no count row.
    UnmatchedFeature { code: i64 },
    /// A count row's code has no boundary feature.
    UnmatchedCount { code: i64 },
}

impl fmt::Display for MapJoinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapJoinError::Parse(msg) => write!(f, "boundary file is not valid GeoJSON: {}", msg),
            MapJoinError::NotACollection => {
                write!(f, "boundary file must be a FeatureCollection")
            }
            MapJoinError::MissingRegionCode { feature } => {
                write!(f, "feature {} has no numeric '{}' property", feature, REGION_CODE_PROPERTY)
            }
            MapJoinError::UnmatchedFeature { code } => {
                write!(f, "no count row for boundary region code {}", code)
            }
            MapJoinError::UnmatchedCount { code } => {
                write!(f, "no boundary feature for region code {}", code)
            }
        }
    }
}

impl std::error::Error for MapJoinError {}

fn property_as_code(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Join per-region counts onto the boundary feature collection.
///
/// Each matched feature gains `name` and `cases` properties; geometry is
/// passed through untouched. Returns an owned collection; the caller's
/// inputs are not modified.
pub fn merge_regional_counts(
    boundary_geojson: &str,
    counts: &[RegionCount],
) -> Result<FeatureCollection, MapJoinError> {
    let geojson: GeoJson = boundary_geojson
        .parse()
        .map_err(|e: geojson::Error| MapJoinError::Parse(e.to_string()))?;
    let mut collection = match geojson {
        GeoJson::FeatureCollection(fc) => fc,
        _ => return Err(MapJoinError::NotACollection),
    };

    let by_code: HashMap<i64, &RegionCount> = counts.iter().map(|r| (r.code, r)).collect();
    let mut matched: Vec<i64> = Vec::with_capacity(counts.len());

    for (idx, feature) in collection.features.iter_mut().enumerate() {
        let code = feature
            .properties
            .as_ref()
            .and_then(|props| props.get(REGION_CODE_PROPERTY))
            .and_then(property_as_code)
            .ok_or(MapJoinError::MissingRegionCode { feature: idx })?;

        let count = by_code
            .get(&code)
            .ok_or(MapJoinError::UnmatchedFeature { code })?;
        matched.push(code);

        let props = feature.properties.get_or_insert_with(Default::default);
        props.insert(String::from("name"), Value::from(count.name.clone()));
        props.insert(String::from("cases"), Value::from(count.cases));
    }

    for count in counts {
        if !matched.contains(&count.code) {
            return Err(MapJoinError::UnmatchedCount { code: count.code });
        }
    }

    log::info!(
        "choropleth: joined {} regions onto {} features",
        counts.len(),
        collection.features.len()
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::{merge_regional_counts, MapJoinError};
    use cvp_db::models::RegionCount;

    const BOUNDARIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "codregion": 13 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-71.0,-33.0],[-70.0,-33.0],[-70.0,-34.0],[-71.0,-34.0],[-71.0,-33.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "codregion": 5 },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-72.0,-32.0],[-71.0,-32.0],[-71.0,-33.0],[-72.0,-33.0],[-72.0,-32.0]]]
                }
            }
        ]
    }"#;

    fn counts() -> Vec<RegionCount> {
        vec![
            RegionCount {
                code: 13,
                name: String::from("Metropolitana"),
                cases: 1554,
            },
            RegionCount {
                code: 5,
                name: String::from("Valparaiso"),
                cases: 312,
            },
        ]
    }

    #[test]
    fn test_merge_sets_properties() {
        let collection = merge_regional_counts(BOUNDARIES, &counts()).unwrap();
        assert_eq!(collection.features.len(), 2);
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["name"], "Metropolitana");
        assert_eq!(props["cases"], 1554);
    }

    #[test]
    fn test_unmatched_feature_is_an_error() {
        let only_one = &counts()[..1];
        let err = merge_regional_counts(BOUNDARIES, only_one).unwrap_err();
        assert_eq!(err, MapJoinError::UnmatchedFeature { code: 5 });
    }

    #[test]
    fn test_unmatched_count_is_an_error() {
        let mut extra = counts();
        extra.push(RegionCount {
            code: 99,
            name: String::from("Atlantis"),
            cases: 1,
        });
        let err = merge_regional_counts(BOUNDARIES, &extra).unwrap_err();
        assert_eq!(err, MapJoinError::UnmatchedCount { code: 99 });
    }

    #[test]
    fn test_missing_code_property_is_an_error() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": {}, "geometry": null }
            ]
        }"#;
        let err = merge_regional_counts(body, &[]).unwrap_err();
        assert_eq!(err, MapJoinError::MissingRegionCode { feature: 0 });
    }

    #[test]
    fn test_not_a_collection_is_an_error() {
        let body = r#"{ "type": "Feature", "properties": {}, "geometry": null }"#;
        let err = merge_regional_counts(body, &[]).unwrap_err();
        assert_eq!(err, MapJoinError::NotACollection);
    }
}
