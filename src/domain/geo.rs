//! Geometry helpers for team service areas.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Ray-casting point-in-polygon test.
///
/// The polygon is treated as closed (last vertex connects back to the
/// first). Polygons with fewer than three vertices contain nothing.
pub fn point_in_polygon(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;

    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        let crosses = (pi.lng > point.lng) != (pj.lng > point.lng)
            && point.lat
                < (pj.lat - pi.lat) * (point.lng - pi.lng) / (pj.lng - pi.lng) + pi.lat;
        if crosses {
            inside = !inside;
        }
        j = i;
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(-34.0, 150.0),
            GeoPoint::new(-34.0, 151.0),
            GeoPoint::new(-33.0, 151.0),
            GeoPoint::new(-33.0, 150.0),
        ]
    }

    #[test]
    fn contains_interior_point() {
        assert!(point_in_polygon(GeoPoint::new(-33.5, 150.5), &square()));
    }

    #[test]
    fn excludes_exterior_point() {
        assert!(!point_in_polygon(GeoPoint::new(-32.0, 150.5), &square()));
        assert!(!point_in_polygon(GeoPoint::new(-33.5, 152.0), &square()));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = vec![GeoPoint::new(-34.0, 150.0), GeoPoint::new(-33.0, 151.0)];
        assert!(!point_in_polygon(GeoPoint::new(-33.5, 150.5), &line));
        assert!(!point_in_polygon(GeoPoint::new(-33.5, 150.5), &[]));
    }
}
