use geomath::{GeometryError, LatLng, vertex_centroid};

/// A closed ring of `[lng, lat]` pairs in degrees (GeoJSON position order).
pub type Ring = Vec<[f64; 2]>;

/// Country boundary geometry.
///
/// The nesting depth is static: a `Polygon` is one outer ring plus optional
/// hole rings, a `MultiPolygon` is a list of such ring sets. Centroid and hit
/// testing walk all rings either way.
#[derive(Debug, Clone, PartialEq)]
pub enum Boundary {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Boundary {
    /// Every ring of every sub-polygon, holes included, in dataset order.
    pub fn rings(&self) -> impl Iterator<Item = &[[f64; 2]]> {
        let flat: Vec<&[[f64; 2]]> = match self {
            Boundary::Polygon(rings) => rings.iter().map(|r| r.as_slice()).collect(),
            Boundary::MultiPolygon(polys) => polys
                .iter()
                .flat_map(|rings| rings.iter().map(|r| r.as_slice()))
                .collect(),
        };
        flat.into_iter()
    }
}

/// One selectable country: identity, display name, and boundary.
///
/// Immutable once loaded; owned by the page orchestrator and shared
/// read-only with the focus controller.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryFeature {
    /// Display name ("France").
    pub name: String,
    /// Uppercase two-letter ISO code ("FR").
    pub iso: String,
    pub boundary: Boundary,
}

impl CountryFeature {
    /// Representative center used to aim the camera at this country.
    pub fn center(&self) -> Result<LatLng, GeometryError> {
        vertex_centroid(self.boundary.rings())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Boundary, CountryFeature};
    use geomath::{GeometryError, LatLng};

    fn square(name: &str, iso: &str, origin: [f64; 2], size: f64) -> CountryFeature {
        let [x, y] = origin;
        CountryFeature {
            name: name.to_string(),
            iso: iso.to_string(),
            boundary: Boundary::Polygon(vec![vec![
                [x, y],
                [x + size, y],
                [x + size, y + size],
                [x, y + size],
            ]]),
        }
    }

    #[test]
    fn center_of_square_france() {
        let france = square("France", "FR", [0.0, 0.0], 2.0);
        assert_eq!(france.center().unwrap(), LatLng::new(1.0, 1.0));
    }

    #[test]
    fn center_of_empty_boundary_fails() {
        let broken = CountryFeature {
            name: "Atlantis".to_string(),
            iso: "AT".to_string(),
            boundary: Boundary::Polygon(vec![]),
        };
        assert_eq!(broken.center(), Err(GeometryError::EmptyBoundary));
    }

    #[test]
    fn multipolygon_rings_flatten_in_order() {
        let b = Boundary::MultiPolygon(vec![
            vec![vec![[0.0, 0.0]], vec![[1.0, 1.0]]],
            vec![vec![[2.0, 2.0]]],
        ]);
        let firsts: Vec<[f64; 2]> = b.rings().map(|r| r[0]).collect();
        assert_eq!(firsts, vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
    }
}
