use geomath::{LatLng, slerp_latlng, smoothstep};
use runtime::Time;

/// Duration of every focus flight (seconds). Fixed so all selections feel
/// uniform; callers cannot override it.
pub const FLIGHT_DURATION_S: f64 = 1.5;
/// Altitude the camera settles at over a focused country (globe radii).
pub const FOCUS_ALTITUDE: f64 = 1.8;
/// Default overview altitude (globe radii).
pub const OVERVIEW_ALTITUDE: f64 = 2.5;

/// Where the camera is aimed and how far out it sits.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewpoint {
    pub target: LatLng,
    pub altitude: f64,
}

impl Default for Viewpoint {
    fn default() -> Self {
        // Initial view roughly over Africa, matching the mounted page.
        Self {
            target: LatLng::new(5.0, 20.0),
            altitude: OVERVIEW_ALTITUDE,
        }
    }
}

#[derive(Debug, Copy, Clone)]
struct Flight {
    from: Viewpoint,
    to: Viewpoint,
    start: Time,
    duration_s: f64,
}

/// Smoothly animated globe camera.
///
/// A new flight replaces any in-progress one; the replacement starts from
/// the camera's current interpolated viewpoint, so superseded flights never
/// cause a visible jump.
#[derive(Debug, Default)]
pub struct Camera {
    current: Viewpoint,
    flight: Option<Flight>,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewpoint(&self) -> Viewpoint {
        self.current
    }

    pub fn is_in_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Starts the fixed-duration flight toward a focused country.
    pub fn fly_to_focus(&mut self, target: LatLng, now: Time) {
        self.flight = Some(Flight {
            from: self.current,
            to: Viewpoint {
                target: target.normalized(),
                altitude: FOCUS_ALTITUDE,
            },
            start: now,
            duration_s: FLIGHT_DURATION_S,
        });
    }

    /// Animates back to the overview altitude without changing the aim.
    pub fn fly_to_overview(&mut self, now: Time) {
        self.flight = Some(Flight {
            from: self.current,
            to: Viewpoint {
                target: self.current.target,
                altitude: OVERVIEW_ALTITUDE,
            },
            start: now,
            duration_s: FLIGHT_DURATION_S,
        });
    }

    /// Shifts the aim longitude; used by auto-rotation between flights.
    pub fn nudge_lng(&mut self, delta_deg: f64) {
        self.current.target = LatLng::new(
            self.current.target.lat_deg,
            self.current.target.lng_deg + delta_deg,
        )
        .normalized();
    }

    /// Advances any in-progress flight to `now`.
    pub fn update(&mut self, now: Time) {
        let Some(flight) = self.flight else {
            return;
        };

        let elapsed = now.0 - flight.start.0;
        let t = smoothstep(elapsed / flight.duration_s);
        self.current = Viewpoint {
            target: slerp_latlng(flight.from.target, flight.to.target, t),
            altitude: flight.from.altitude + (flight.to.altitude - flight.from.altitude) * t,
        };

        if elapsed >= flight.duration_s {
            self.current = flight.to;
            self.flight = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Camera, FLIGHT_DURATION_S, FOCUS_ALTITUDE, OVERVIEW_ALTITUDE};
    use geomath::LatLng;
    use runtime::Time;

    #[test]
    fn flight_reaches_target_after_duration() {
        let mut cam = Camera::new();
        cam.fly_to_focus(LatLng::new(46.0, 2.0), Time(0.0));
        assert!(cam.is_in_flight());

        cam.update(Time(FLIGHT_DURATION_S));
        assert!(!cam.is_in_flight());
        let vp = cam.viewpoint();
        assert!((vp.target.lat_deg - 46.0).abs() < 1e-9);
        assert!((vp.target.lng_deg - 2.0).abs() < 1e-9);
        assert_eq!(vp.altitude, FOCUS_ALTITUDE);
    }

    #[test]
    fn midflight_viewpoint_is_between_endpoints() {
        let mut cam = Camera::new();
        let start_alt = cam.viewpoint().altitude;
        cam.fly_to_focus(LatLng::new(0.0, 100.0), Time(0.0));
        cam.update(Time(FLIGHT_DURATION_S / 2.0));
        let vp = cam.viewpoint();
        assert!(cam.is_in_flight());
        assert!(vp.altitude < start_alt && vp.altitude > FOCUS_ALTITUDE);
    }

    #[test]
    fn overview_flight_keeps_the_aim() {
        let mut cam = Camera::new();
        cam.fly_to_focus(LatLng::new(46.0, 2.0), Time(0.0));
        cam.update(Time(FLIGHT_DURATION_S));

        cam.fly_to_overview(Time(2.0));
        cam.update(Time(2.0 + FLIGHT_DURATION_S));
        let vp = cam.viewpoint();
        assert!((vp.target.lat_deg - 46.0).abs() < 1e-9);
        assert_eq!(vp.altitude, OVERVIEW_ALTITUDE);
    }

    #[test]
    fn superseding_flight_starts_from_current_viewpoint() {
        let mut cam = Camera::new();
        cam.fly_to_focus(LatLng::new(0.0, 90.0), Time(0.0));
        cam.update(Time(0.5));
        let mid = cam.viewpoint();

        cam.fly_to_focus(LatLng::new(0.0, -90.0), Time(0.5));
        cam.update(Time(0.5));
        let after = cam.viewpoint();
        assert!((after.target.lng_deg - mid.target.lng_deg).abs() < 1e-9);
    }

    #[test]
    fn nudge_wraps_longitude() {
        let mut cam = Camera::new();
        cam.nudge_lng(350.0);
        let lng = cam.viewpoint().target.lng_deg;
        assert!((-180.0..180.0).contains(&lng));
    }
}
