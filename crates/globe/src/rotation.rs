use crate::camera::Camera;

/// Default auto-rotation speed (degrees of longitude per second).
pub const DEFAULT_ROTATION_SPEED_DEG_S: f64 = 6.0;

/// Idle auto-rotation of the globe.
///
/// Rotation halts the instant a selection candidate exists and is only
/// resumed explicitly on cancel; a confirmed selection navigates away, so it
/// never resumes. Owned exclusively by the focus controller.
#[derive(Debug)]
pub struct Rotation {
    auto: bool,
    speed_deg_s: f64,
}

impl Default for Rotation {
    fn default() -> Self {
        Self {
            auto: true,
            speed_deg_s: DEFAULT_ROTATION_SPEED_DEG_S,
        }
    }
}

impl Rotation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_auto(&self) -> bool {
        self.auto
    }

    pub fn speed_deg_s(&self) -> f64 {
        self.speed_deg_s
    }

    pub fn halt(&mut self) {
        self.auto = false;
    }

    /// Resumes auto-rotation at the default speed.
    pub fn resume(&mut self) {
        self.auto = true;
        self.speed_deg_s = DEFAULT_ROTATION_SPEED_DEG_S;
    }

    /// Advances the camera aim by one tick's worth of rotation.
    pub fn advance(&self, camera: &mut Camera, dt_s: f64) {
        if self.auto {
            camera.nudge_lng(self.speed_deg_s * dt_s);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_ROTATION_SPEED_DEG_S, Rotation};
    use crate::camera::Camera;

    #[test]
    fn advances_longitude_while_auto() {
        let mut cam = Camera::new();
        let start = cam.viewpoint().target.lng_deg;
        let rot = Rotation::new();
        rot.advance(&mut cam, 1.0);
        let moved = cam.viewpoint().target.lng_deg - start;
        assert!((moved - DEFAULT_ROTATION_SPEED_DEG_S).abs() < 1e-9);
    }

    #[test]
    fn halted_rotation_does_not_move_the_camera() {
        let mut cam = Camera::new();
        let start = cam.viewpoint().target.lng_deg;
        let mut rot = Rotation::new();
        rot.halt();
        rot.advance(&mut cam, 1.0);
        assert_eq!(cam.viewpoint().target.lng_deg, start);
    }

    #[test]
    fn resume_restores_the_default_speed() {
        let mut rot = Rotation::new();
        rot.halt();
        rot.resume();
        assert!(rot.is_auto());
        assert_eq!(rot.speed_deg_s(), DEFAULT_ROTATION_SPEED_DEG_S);
    }
}
