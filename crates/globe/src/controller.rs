use std::collections::HashMap;

use dataset::CountryFeature;
use geomath::GeometryError;
use runtime::{EventBus, Frame, Stamped, Time, TimerQueue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::camera::{Camera, Viewpoint};
use crate::events::{GlobeEvent, SelectionOrigin};
use crate::rotation::Rotation;
use crate::visual::{CountryVisual, VisualTable};

/// Delay after `select` before the focused country pops (seconds).
/// Shorter than the camera flight, so the pop lands while the camera is
/// still closing in.
pub const POP_DELAY_S: f64 = 0.9;
/// Delay after the pop before `CountryFocused` is emitted (seconds).
pub const POP_SETTLE_S: f64 = 0.4;

#[derive(Debug, Error)]
pub enum FocusError {
    #[error("country boundary is malformed: {0}")]
    Geometry(#[from] GeometryError),
}

/// Focus state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusState {
    Idle,
    Hovering(String),
    Focused {
        iso: String,
        origin: SelectionOrigin,
    },
    /// The page is fading out after a confirm; input is ignored.
    Transitioning,
}

/// Choreography steps scheduled by `select`, keyed by ISO so they survive a
/// dataset reload (and simply drop out if the country vanished).
#[derive(Debug)]
enum StageAction {
    ApplyPop { iso: String },
    EmitFocused { iso: String, origin: SelectionOrigin },
}

/// The globe focus controller.
///
/// Owns the render-facing state (per-country visuals, camera, rotation) and
/// the selection state machine. Adapters and the page orchestrator never
/// mutate these directly; they call the operations below and read results
/// from drained [`GlobeEvent`]s.
///
/// Within one `select`, the stages (flight start, rotation halt, pop, event
/// emission) are strictly ordered via deadline timers. Across calls, every
/// `select` bumps the selection epoch, so stages scheduled by a superseded
/// selection are dropped at their deadline instead of firing.
#[derive(Debug)]
pub struct GlobeController {
    features: Vec<CountryFeature>,
    index_by_iso: HashMap<String, usize>,
    state: FocusState,
    epoch: u64,
    clock: Time,
    camera: Camera,
    rotation: Rotation,
    visuals: VisualTable,
    timers: TimerQueue<StageAction>,
    bus: EventBus<GlobeEvent>,
    disposed: bool,
}

impl Default for GlobeController {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            index_by_iso: HashMap::new(),
            state: FocusState::Idle,
            epoch: 0,
            clock: Time(0.0),
            camera: Camera::new(),
            rotation: Rotation::new(),
            visuals: VisualTable::new(),
            timers: TimerQueue::new(),
            bus: EventBus::new(),
            disposed: false,
        }
    }
}

impl GlobeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the renderable polygon set.
    ///
    /// Idempotent for late-arriving fetches: existing focus/hover state is
    /// preserved unless the country it points at is absent from the new
    /// data, in which case the controller falls back to `Idle`.
    pub fn load_dataset(&mut self, features: Vec<CountryFeature>) {
        if self.disposed {
            return;
        }

        self.index_by_iso = features
            .iter()
            .enumerate()
            .map(|(i, f)| (f.iso.clone(), i))
            .collect();
        self.features = features;

        let focused_iso = match &self.state {
            FocusState::Hovering(iso) => Some(iso.clone()),
            FocusState::Focused { iso, .. } => Some(iso.clone()),
            FocusState::Idle | FocusState::Transitioning => None,
        };
        if let Some(iso) = focused_iso {
            if !self.index_by_iso.contains_key(&iso) {
                debug!(iso = %iso, "focused country absent from new dataset, resetting");
                self.reset_appearance();
            }
        }
    }

    /// Hover feedback; legal only while `Idle` or already `Hovering`.
    ///
    /// A focused country must not be visually disturbed by incidental hover,
    /// so this is a no-op in every other state.
    pub fn hover(&mut self, iso: Option<&str>) {
        if self.disposed {
            return;
        }
        match self.state {
            FocusState::Idle | FocusState::Hovering(_) => {}
            _ => return,
        }

        match iso {
            Some(iso) if self.index_by_iso.contains_key(iso) => {
                self.visuals.set_hovered(Some(iso));
                self.state = FocusState::Hovering(iso.to_string());
            }
            // Unknown ISO: the pointer is not over anything we render, so
            // drop any lingering highlight rather than keep it.
            Some(_) | None => {
                self.visuals.set_hovered(None);
                self.state = FocusState::Idle;
            }
        }
    }

    /// Focuses a country: aims the camera at its centroid, halts rotation,
    /// and schedules the visual pop and the `CountryFocused` emission.
    ///
    /// Last write wins: re-invoking while already focused supersedes the
    /// prior selection, and the epoch bump keeps its pending stages from
    /// firing. Ignored during the fade-out, like `hover`. An unknown ISO
    /// (including any select against an empty dataset) is a no-op. A
    /// malformed boundary is reported and leaves the prior state untouched;
    /// the country is simply not selectable.
    pub fn select(&mut self, iso: &str, origin: SelectionOrigin) -> Result<(), FocusError> {
        if self.disposed {
            return Ok(());
        }
        if self.state == FocusState::Transitioning {
            debug!(iso = %iso, "select during fade-out ignored");
            return Ok(());
        }
        let Some(&index) = self.index_by_iso.get(iso) else {
            debug!(iso = %iso, "select against unknown country ignored");
            return Ok(());
        };

        let center = self.features[index].center().map_err(|e| {
            warn!(iso = %iso, error = %e, "country not selectable");
            e
        })?;

        self.epoch += 1;
        self.visuals.set_hovered(None);
        self.visuals.set_popped(None);

        self.camera.fly_to_focus(center, self.clock);
        self.rotation.halt();

        self.timers.schedule(
            self.clock.offset(POP_DELAY_S),
            self.epoch,
            StageAction::ApplyPop {
                iso: iso.to_string(),
            },
        );
        self.timers.schedule(
            self.clock.offset(POP_DELAY_S + POP_SETTLE_S),
            self.epoch,
            StageAction::EmitFocused {
                iso: iso.to_string(),
                origin,
            },
        );

        self.state = FocusState::Focused {
            iso: iso.to_string(),
            origin,
        };
        Ok(())
    }

    /// Forces every country back to base visual state and clears the focused
    /// pointer, regardless of controller state. Idempotent.
    pub fn reset_appearance(&mut self) {
        self.visuals.clear();
        self.state = FocusState::Idle;
        // Invalidate pending pop/emit stages from any live selection.
        self.epoch += 1;
    }

    /// Animates the camera back to the overview altitude. Leaves visual
    /// state and rotation alone.
    pub fn reset_view(&mut self) {
        if self.disposed {
            return;
        }
        self.camera.fly_to_overview(self.clock);
    }

    /// Resumes auto-rotation at the default speed. Only meaningful after a
    /// cancel; a confirm navigates away instead.
    pub fn resume_rotation(&mut self) {
        if self.disposed {
            return;
        }
        self.rotation.resume();
    }

    /// Enters the fade-out phase; hover and selection are ignored until the
    /// page navigates away.
    pub fn begin_transition(&mut self) {
        if self.disposed {
            return;
        }
        self.state = FocusState::Transitioning;
    }

    /// Releases the polygon set and pending work. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.features.clear();
        self.index_by_iso.clear();
        self.timers.clear();
        self.visuals.clear();
        self.state = FocusState::Idle;
    }

    /// Advances animations and fires due choreography stages.
    pub fn tick(&mut self, frame: Frame) {
        if self.disposed {
            return;
        }
        self.clock = frame.time;
        self.camera.update(frame.time);
        if !self.camera.is_in_flight() {
            self.rotation.advance(&mut self.camera, frame.dt_s);
        }

        let due = self.timers.drain_due(frame.time, self.epoch);
        if due.superseded > 0 {
            debug!(count = due.superseded, "dropped stages from superseded selections");
        }
        for action in due.actions {
            match action {
                StageAction::ApplyPop { iso } => {
                    if self.index_by_iso.contains_key(&iso) {
                        self.visuals.set_popped(Some(&iso));
                    }
                }
                StageAction::EmitFocused { iso, origin } => {
                    let Some(&index) = self.index_by_iso.get(&iso) else {
                        continue;
                    };
                    let name = self.features[index].name.clone();
                    self.bus.emit(frame, GlobeEvent::CountryFocused { iso, name, origin });
                }
            }
        }
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<GlobeEvent>> {
        self.bus.drain()
    }

    pub fn state(&self) -> &FocusState {
        &self.state
    }

    pub fn features(&self) -> &[CountryFeature] {
        &self.features
    }

    pub fn viewpoint(&self) -> Viewpoint {
        self.camera.viewpoint()
    }

    pub fn is_camera_in_flight(&self) -> bool {
        self.camera.is_in_flight()
    }

    pub fn is_auto_rotating(&self) -> bool {
        self.rotation.is_auto()
    }

    pub fn rotation_speed_deg_s(&self) -> f64 {
        self.rotation.speed_deg_s()
    }

    pub fn popped_iso(&self) -> Option<&str> {
        self.visuals.popped()
    }

    /// Rendering attributes for one country, or `None` if it is not loaded.
    pub fn visual_of(&self, iso: &str) -> Option<CountryVisual> {
        let &index = self.index_by_iso.get(iso)?;
        Some(self.visuals.visual_of(iso, &self.features[index].name))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{FocusState, GlobeController, POP_DELAY_S, POP_SETTLE_S};
    use crate::events::{GlobeEvent, SelectionOrigin};
    use crate::visual::Tint;
    use dataset::{Boundary, CountryFeature};
    use runtime::Frame;

    const DT: f64 = 0.1;

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

    fn controller() -> GlobeController {
        let mut ctrl = GlobeController::new();
        ctrl.load_dataset(vec![
            square("France", "FR", [0.0, 42.0], 6.0),
            square("Spain", "ES", [-8.0, 36.0], 6.0),
        ]);
        ctrl
    }

    /// Ticks until `frame.time` passes `until_s`, returning the next frame.
    /// The bound is epsilon-inclusive so a deadline exactly on a frame
    /// boundary still gets its tick despite f64 accumulation.
    fn run_until(ctrl: &mut GlobeController, mut frame: Frame, until_s: f64) -> Frame {
        while frame.time.0 <= until_s + 1e-9 {
            ctrl.tick(frame);
            frame = frame.next();
        }
        frame
    }

    #[test]
    fn select_halts_rotation_and_starts_flight() {
        let mut ctrl = controller();
        assert!(ctrl.is_auto_rotating());

        ctrl.select("FR", SelectionOrigin::Search).unwrap();
        assert!(!ctrl.is_auto_rotating());
        assert!(ctrl.is_camera_in_flight());
        assert_eq!(
            ctrl.state(),
            &FocusState::Focused {
                iso: "FR".to_string(),
                origin: SelectionOrigin::Search,
            }
        );
        // Pop has not applied yet.
        assert!(ctrl.popped_iso().is_none());
    }

    #[test]
    fn pop_then_single_focus_event() {
        let mut ctrl = controller();
        ctrl.select("FR", SelectionOrigin::Direct).unwrap();

        let frame = run_until(&mut ctrl, Frame::new(0, DT), POP_DELAY_S);
        assert_eq!(ctrl.popped_iso(), Some("FR"));
        assert_eq!(ctrl.visual_of("FR").unwrap().tint, Tint::Focus);
        assert_eq!(ctrl.visual_of("FR").unwrap().label.as_deref(), Some("France"));
        assert!(ctrl.drain_events().is_empty(), "event must not precede settle");

        let frame = run_until(&mut ctrl, frame, POP_DELAY_S + POP_SETTLE_S);
        let events = ctrl.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].event,
            GlobeEvent::CountryFocused {
                iso: "FR".to_string(),
                name: "France".to_string(),
                origin: SelectionOrigin::Direct,
            }
        );

        // No repeats on later frames.
        run_until(&mut ctrl, frame, frame.time.0 + 2.0);
        assert!(ctrl.drain_events().is_empty());
    }

    #[test]
    fn superseding_selection_wins_and_fires_once() {
        let mut ctrl = controller();
        ctrl.select("FR", SelectionOrigin::Search).unwrap();

        // Let some time pass, but less than the pop delay.
        let frame = run_until(&mut ctrl, Frame::new(0, DT), POP_DELAY_S / 2.0);
        ctrl.select("ES", SelectionOrigin::Direct).unwrap();

        // Run well past both selections' schedules.
        run_until(&mut ctrl, frame, frame.time.0 + POP_DELAY_S + POP_SETTLE_S + 1.0);

        assert_eq!(ctrl.popped_iso(), Some("ES"));
        assert_eq!(ctrl.visual_of("FR").unwrap().tint, Tint::Base);
        let events = ctrl.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0].event,
            GlobeEvent::CountryFocused { iso, .. } if iso == "ES"
        ));
    }

    #[test]
    fn hover_is_ignored_while_focused() {
        let mut ctrl = controller();
        ctrl.hover(Some("ES"));
        assert_eq!(ctrl.state(), &FocusState::Hovering("ES".to_string()));
        assert_eq!(ctrl.visual_of("ES").unwrap().tint, Tint::Hover);

        ctrl.select("FR", SelectionOrigin::Direct).unwrap();
        ctrl.hover(Some("ES"));
        assert_eq!(ctrl.visual_of("ES").unwrap().tint, Tint::Base);
        assert!(matches!(ctrl.state(), FocusState::Focused { .. }));
    }

    #[test]
    fn hover_over_unknown_country_clears_the_highlight() {
        let mut ctrl = controller();
        ctrl.hover(Some("ES"));
        assert_eq!(ctrl.visual_of("ES").unwrap().tint, Tint::Hover);

        // Pointer moved onto something that is not a loaded country.
        ctrl.hover(Some("ZZ"));
        assert_eq!(ctrl.visual_of("ES").unwrap().tint, Tint::Base);
        assert_eq!(ctrl.state(), &FocusState::Idle);
    }

    #[test]
    fn select_is_ignored_during_fade_out() {
        let mut ctrl = controller();
        ctrl.select("FR", SelectionOrigin::Direct).unwrap();
        ctrl.begin_transition();

        ctrl.select("ES", SelectionOrigin::Direct).unwrap();
        assert_eq!(ctrl.state(), &FocusState::Transitioning);

        // Nothing from the late select may fire.
        run_until(&mut ctrl, Frame::new(0, DT), POP_DELAY_S + POP_SETTLE_S + 1.0);
        assert_ne!(ctrl.popped_iso(), Some("ES"));
        assert!(
            !ctrl
                .drain_events()
                .iter()
                .any(|s| matches!(&s.event, GlobeEvent::CountryFocused { iso, .. } if iso == "ES"))
        );
    }

    #[test]
    fn reset_appearance_clears_focus_and_pending_stages() {
        let mut ctrl = controller();
        ctrl.select("FR", SelectionOrigin::Direct).unwrap();
        ctrl.reset_appearance();
        ctrl.reset_appearance(); // idempotent

        run_until(&mut ctrl, Frame::new(0, DT), POP_DELAY_S + POP_SETTLE_S + 1.0);
        assert!(ctrl.popped_iso().is_none());
        assert!(ctrl.drain_events().is_empty());
        assert_eq!(ctrl.state(), &FocusState::Idle);
    }

    #[test]
    fn select_against_empty_dataset_is_a_noop() {
        let mut ctrl = GlobeController::new();
        ctrl.load_dataset(Vec::new());
        ctrl.select("FR", SelectionOrigin::Search).unwrap();
        assert_eq!(ctrl.state(), &FocusState::Idle);
        assert!(ctrl.is_auto_rotating());
    }

    #[test]
    fn malformed_boundary_is_reported_and_state_kept() {
        let mut ctrl = GlobeController::new();
        ctrl.load_dataset(vec![
            square("France", "FR", [0.0, 42.0], 6.0),
            CountryFeature {
                name: "Atlantis".to_string(),
                iso: "AT".to_string(),
                boundary: Boundary::Polygon(vec![]),
            },
        ]);
        ctrl.select("FR", SelectionOrigin::Search).unwrap();

        assert!(ctrl.select("AT", SelectionOrigin::Direct).is_err());
        // Prior selection is untouched.
        assert!(matches!(
            ctrl.state(),
            FocusState::Focused { iso, .. } if iso == "FR"
        ));
    }

    #[test]
    fn reload_preserves_focus_unless_country_vanished() {
        let mut ctrl = controller();
        ctrl.select("FR", SelectionOrigin::Search).unwrap();

        ctrl.load_dataset(vec![
            square("France", "FR", [0.0, 42.0], 6.0),
            square("Italy", "IT", [7.0, 37.0], 6.0),
        ]);
        assert!(matches!(
            ctrl.state(),
            FocusState::Focused { iso, .. } if iso == "FR"
        ));

        ctrl.load_dataset(vec![square("Italy", "IT", [7.0, 37.0], 6.0)]);
        assert_eq!(ctrl.state(), &FocusState::Idle);
    }

    #[test]
    fn dispose_is_idempotent_and_silences_everything() {
        let mut ctrl = controller();
        ctrl.select("FR", SelectionOrigin::Direct).unwrap();
        ctrl.dispose();
        ctrl.dispose();

        ctrl.select("FR", SelectionOrigin::Direct).unwrap();
        ctrl.tick(Frame::new(0, DT));
        assert!(ctrl.drain_events().is_empty());
        assert!(ctrl.features().is_empty());
    }
}
