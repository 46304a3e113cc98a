#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }

    /// Normalizes to unit length; degenerate vectors collapse to zero.
    pub fn normalized(self) -> Self {
        let n = self.length();
        if n > 1e-12 {
            self.scale(1.0 / n)
        } else {
            Self::new(0.0, 0.0, 0.0)
        }
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

/// Spherical interpolation between two unit vectors.
///
/// Falls back to normalized linear interpolation when the endpoints are
/// nearly parallel, where the spherical formula loses precision.
pub fn slerp_unit(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    let dot = a.dot(b).clamp(-1.0, 1.0);

    if dot > 0.9995 {
        return (a.scale(1.0 - t) + b.scale(t)).normalized();
    }

    // Nearly antipodal endpoints have no unique great circle; pick the one
    // through an arbitrary orthogonal axis.
    if dot < -0.999999 {
        let mut axis = Vec3::new(1.0, 0.0, 0.0).cross(a);
        if axis.dot(axis) < 1e-12 {
            axis = Vec3::new(0.0, 1.0, 0.0).cross(a);
        }
        let axis = axis.normalized();
        let theta = std::f64::consts::PI * t;
        return (a.scale(theta.cos()) + axis.scale(theta.sin())).normalized();
    }

    let theta_0 = dot.acos();
    let theta = theta_0 * t;
    let sin_theta_0 = theta_0.sin();

    let s0 = (theta_0 - theta).sin() / sin_theta_0;
    let s1 = theta.sin() / sin_theta_0;
    (a.scale(s0) + b.scale(s1)).normalized()
}

#[cfg(test)]
mod tests {
    use super::{Vec3, slerp_unit};

    fn assert_close(a: Vec3, b: Vec3, eps: f64) {
        assert!(
            (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps && (a.z - b.z).abs() <= eps,
            "expected {a:?} ~= {b:?}"
        );
    }

    #[test]
    fn cross_of_axes() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn slerp_endpoints() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 1.0, 0.0);
        assert_close(slerp_unit(a, b, 0.0), a, 1e-12);
        assert_close(slerp_unit(a, b, 1.0), b, 1e-12);
    }

    #[test]
    fn slerp_midpoint_stays_unit() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(0.0, 0.0, 1.0);
        let mid = slerp_unit(a, b, 0.5);
        assert!((mid.length() - 1.0).abs() < 1e-12);
        assert!((mid.x - mid.z).abs() < 1e-12);
    }
}
