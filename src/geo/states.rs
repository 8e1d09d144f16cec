// src/geo/states.rs
// =============================================================================
// Point-in-polygon lookup against a named-region boundary dataset.
//
// The resolver is an explicitly constructed value: whoever runs a crawl
// builds one (from a file or an in-memory GeoJSON string) and shares it.
// Parsing happens once at construction; after that the dataset is read-only
// and safe to share across concurrent tasks behind an Arc.
// =============================================================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use geo::{Contains, Geometry, Point};
use geojson::{FeatureCollection, GeoJson};

struct BoundaryRegion {
    name: Option<String>,
    geometry: Geometry<f64>,
}

/// Resolves a latitude/longitude pair to the name of the containing region.
pub struct RegionResolver {
    regions: Vec<BoundaryRegion>,
}

impl RegionResolver {
    /// Loads a GeoJSON FeatureCollection of region polygons from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read boundary file {}", path.display()))?;
        Self::from_geojson(&raw)
            .with_context(|| format!("failed to parse boundary file {}", path.display()))
    }

    /// Parses a GeoJSON FeatureCollection into resolver geometry.
    /// Features without usable geometry are skipped.
    pub fn from_geojson(raw: &str) -> Result<Self> {
        let geojson: GeoJson = raw.parse().context("invalid GeoJSON")?;
        let collection = FeatureCollection::try_from(geojson)
            .context("boundary data must be a FeatureCollection")?;

        let mut regions = Vec::new();
        for feature in collection.features {
            let name = feature
                .property("name")
                .and_then(|value| value.as_str())
                .map(str::to_string);
            let Some(geometry) = feature.geometry.as_ref() else {
                log::debug!("skipping boundary feature without geometry: {:?}", name);
                continue;
            };
            match Geometry::<f64>::try_from(geometry) {
                Ok(geometry) => regions.push(BoundaryRegion { name, geometry }),
                Err(e) => {
                    log::debug!("skipping unusable boundary geometry for {:?}: {}", name, e);
                }
            }
        }
        Ok(RegionResolver { regions })
    }

    /// Returns the name of the first region containing the point, in dataset
    /// order. Absent when no region contains the point or the containing
    /// feature has no name.
    pub fn resolve(&self, lat: f64, lng: f64) -> Option<&str> {
        let point = Point::new(lng, lat);
        let containing = self
            .regions
            .iter()
            .find(|region| region.geometry.contains(&point))?;
        containing.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(name: Option<&str>, min: f64, max: f64) -> String {
        let props = match name {
            Some(n) => format!(r#"{{"name": "{n}"}}"#),
            None => "{}".to_string(),
        };
        format!(
            r#"{{
                "type": "Feature",
                "properties": {props},
                "geometry": {{
                    "type": "Polygon",
                    "coordinates": [[
                        [{min}, {min}], [{max}, {min}], [{max}, {max}],
                        [{min}, {max}], [{min}, {min}]
                    ]]
                }}
            }}"#
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{"type": "FeatureCollection", "features": [{}]}}"#,
            features.join(",")
        )
    }

    #[test]
    fn test_point_inside_polygon_resolves_name() {
        let data = collection(&[square(Some("MockState"), 0.0, 10.0)]);
        let resolver = RegionResolver::from_geojson(&data).unwrap();
        assert_eq!(resolver.resolve(5.0, 5.0), Some("MockState"));
    }

    #[test]
    fn test_point_outside_all_polygons_is_absent() {
        let data = collection(&[square(Some("MockState"), 0.0, 10.0)]);
        let resolver = RegionResolver::from_geojson(&data).unwrap();
        assert_eq!(resolver.resolve(20.0, 20.0), None);
    }

    #[test]
    fn test_first_containing_region_wins() {
        let data = collection(&[
            square(Some("First"), 0.0, 10.0),
            square(Some("Second"), 0.0, 10.0),
        ]);
        let resolver = RegionResolver::from_geojson(&data).unwrap();
        assert_eq!(resolver.resolve(5.0, 5.0), Some("First"));
    }

    #[test]
    fn test_unnamed_containing_feature_is_absent() {
        let data = collection(&[square(None, 0.0, 10.0)]);
        let resolver = RegionResolver::from_geojson(&data).unwrap();
        assert_eq!(resolver.resolve(5.0, 5.0), None);
    }

    #[test]
    fn test_axis_order_is_lng_lat() {
        // GeoJSON coordinates are [lng, lat]; resolve takes (lat, lng)
        let feature = r#"{
            "type": "Feature",
            "properties": {"name": "Westish"},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-120.0, 30.0], [-110.0, 30.0], [-110.0, 40.0],
                    [-120.0, 40.0], [-120.0, 30.0]
                ]]
            }
        }"#;
        let data = collection(&[feature.to_string()]);
        let resolver = RegionResolver::from_geojson(&data).unwrap();
        assert_eq!(resolver.resolve(35.0, -115.0), Some("Westish"));
        assert_eq!(resolver.resolve(-115.0, 35.0), None);
    }

    #[test]
    fn test_invalid_geojson_is_an_error() {
        assert!(RegionResolver::from_geojson("not geojson").is_err());
        assert!(RegionResolver::from_geojson(r#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
    }
}
