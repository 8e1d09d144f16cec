// src/geo/mod.rs
// =============================================================================
// Coordinate-to-state resolution.
//
// Detail pages usually declare their state, but not always; when they don't,
// we fall back to a point-in-polygon lookup against a GeoJSON boundary file.
// =============================================================================

mod states;

pub use states::RegionResolver;
