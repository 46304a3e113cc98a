use thiserror::Error;

use crate::latlng::LatLng;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("boundary has no vertices")]
    EmptyBoundary,
}

/// Vertex-average center of a boundary's ring set.
///
/// Every vertex of every ring contributes equally: holes are not subtracted
/// and rings are not area-weighted, so multi-part countries with many small
/// islands can land visibly off their main landmass. Vertices are
/// `[lng, lat]` pairs in degrees, matching GeoJSON position order.
///
/// Pure function: no state, safe to call repeatedly and concurrently.
/// A boundary with zero vertices is malformed input and yields
/// [`GeometryError::EmptyBoundary`] rather than a division by zero.
pub fn vertex_centroid<'a, I>(rings: I) -> Result<LatLng, GeometryError>
where
    I: IntoIterator<Item = &'a [[f64; 2]]>,
{
    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut count = 0usize;

    for ring in rings {
        for &[lng, lat] in ring {
            sum_lng += lng;
            sum_lat += lat;
            count += 1;
        }
    }

    if count == 0 {
        return Err(GeometryError::EmptyBoundary);
    }

    Ok(LatLng::new(sum_lat / count as f64, sum_lng / count as f64))
}
