use crate::vec::{Vec3, slerp_unit};

/// Geographic position in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LatLng {
    pub lat_deg: f64,
    pub lng_deg: f64,
}

impl LatLng {
    pub fn new(lat_deg: f64, lng_deg: f64) -> Self {
        Self { lat_deg, lng_deg }
    }

    /// Wraps longitude into [-180, 180) and clamps latitude to the poles.
    pub fn normalized(self) -> Self {
        let lat = self.lat_deg.clamp(-90.0, 90.0);
        let mut lng = (self.lng_deg + 180.0).rem_euclid(360.0) - 180.0;
        if lng >= 180.0 {
            lng -= 360.0;
        }
        Self::new(lat, lng)
    }

    /// Unit vector on the sphere (x toward lng 0, z toward the north pole).
    pub fn to_unit(self) -> Vec3 {
        let lat = self.lat_deg.to_radians();
        let lng = self.lng_deg.to_radians();
        Vec3::new(lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin())
    }

    pub fn from_unit(v: Vec3) -> Self {
        let v = v.normalized();
        Self::new(
            v.z.clamp(-1.0, 1.0).asin().to_degrees(),
            v.y.atan2(v.x).to_degrees(),
        )
    }
}

/// Interpolates along the great circle between `a` and `b`.
pub fn slerp_latlng(a: LatLng, b: LatLng, t: f64) -> LatLng {
    LatLng::from_unit(slerp_unit(a.to_unit(), b.to_unit(), t))
}

/// Smoothstep easing on [0, 1]; used for camera flights so every focus move
/// accelerates and settles the same way.
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
