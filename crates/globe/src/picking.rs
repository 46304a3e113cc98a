use dataset::{Boundary, CountryFeature, Ring};
use geomath::LatLng;

/// Point-in-boundary hit test over the loaded polygon set.
///
/// Ordering contract: the first feature in dataset order that contains the
/// point wins. Containment is even-odd ray casting per sub-polygon, so a
/// point inside a hole ring is not a hit.
pub fn hit_test(features: &[CountryFeature], point: LatLng) -> Option<usize> {
    let point = point.normalized();
    features
        .iter()
        .position(|f| boundary_contains(&f.boundary, point))
}

fn boundary_contains(boundary: &Boundary, point: LatLng) -> bool {
    match boundary {
        Boundary::Polygon(rings) => rings_contain(rings, point),
        Boundary::MultiPolygon(polys) => polys.iter().any(|rings| rings_contain(rings, point)),
    }
}

/// Even-odd parity across one sub-polygon's rings (outer + holes).
fn rings_contain(rings: &[Ring], point: LatLng) -> bool {
    let mut inside = false;
    for ring in rings {
        if ring_contains(ring, point.lng_deg, point.lat_deg) {
            inside = !inside;
        }
    }
    inside
}

fn ring_contains(ring: &Ring, x: f64, y: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
