use chrono::Utc;
use dataset::{CountryFeature, DatasetError};
use geomath::LatLng;
use globe::{FocusState, GlobeController, GlobeEvent, SelectionOrigin, hit_test, random_pick, suggest};
use runtime::{EventBus, Frame, Stamped, TimerQueue};
use tracing::warn;

use crate::candidate::SelectionCandidate;
use crate::gate::{GateView, gate_view};
use crate::handoff::{HandoffStore, SelectedCountry};

/// Fade-out duration after a confirm (seconds).
pub const FADE_DURATION_S: f64 = 1.2;
/// Delay before the route change fires (seconds). Shorter than the fade, so
/// the fade is visibly underway before navigation; the two timers are
/// independent and navigation never waits for the fade to complete.
pub const NAVIGATE_DELAY_S: f64 = 0.8;
/// Route of the planning page.
pub const PLANNING_ROUTE: &str = "/planning";

/// Events the page surface reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// The confirmation gate became visible for this candidate.
    GateShown { iso: String },
    FadeStarted,
    NavigateTo(String),
    FadeCompleted,
}

#[derive(Debug)]
enum TransitionStep {
    Navigate,
    FadeDone,
}

/// Sequences the page: dataset → controller → candidates → gate → handoff →
/// fade → route change.
///
/// Both selection sources converge here as a tagged [`SelectionCandidate`];
/// the gate pacing switches on the tag. Search candidates prompt
/// immediately; direct candidates wait for the controller's
/// `CountryFocused`, so the user sees what they hit before being asked.
#[derive(Debug)]
pub struct PageOrchestrator {
    controller: GlobeController,
    candidate: Option<SelectionCandidate>,
    gate_visible: bool,
    handoff: HandoffStore,
    timers: TimerQueue<TransitionStep>,
    bus: EventBus<FlowEvent>,
    transition_epoch: u64,
    frame: Frame,
}

impl PageOrchestrator {
    /// Mounts the page. A failed dataset fetch degrades to an empty,
    /// non-interactive globe: selection attempts become no-ops and nothing
    /// crashes.
    pub fn mount(dataset: Result<Vec<CountryFeature>, DatasetError>) -> Self {
        let features = match dataset {
            Ok(features) => features,
            Err(e) => {
                warn!(error = %e, "country dataset unavailable, mounting empty globe");
                Vec::new()
            }
        };

        let mut controller = GlobeController::new();
        controller.load_dataset(features);

        Self {
            controller,
            candidate: None,
            gate_visible: false,
            handoff: HandoffStore::new(),
            timers: TimerQueue::new(),
            bus: EventBus::new(),
            transition_epoch: 0,
            frame: Frame::new(0, 1.0 / 60.0),
        }
    }

    /// Direct adapter entry: pointer interaction against the rendered
    /// polygons. The gate stays hidden until the focus pop has settled.
    pub fn click_at(&mut self, point: LatLng) {
        if matches!(self.controller.state(), FocusState::Transitioning) {
            return;
        }
        let Some(index) = hit_test(self.controller.features(), point) else {
            return;
        };
        let feature = &self.controller.features()[index];
        let (iso, name) = (feature.iso.clone(), feature.name.clone());

        if let Err(e) = self.controller.select(&iso, SelectionOrigin::Direct) {
            warn!(iso = %iso, error = %e, "direct selection rejected");
            return;
        }
        self.candidate = Some(SelectionCandidate {
            iso,
            name,
            origin: SelectionOrigin::Direct,
        });
        self.gate_visible = false;
    }

    /// Search adapter entry: a picked suggestion (or random pick). Search is
    /// a deliberate act, so the gate shows immediately rather than waiting
    /// for the camera.
    pub fn pick_from_search(&mut self, iso: &str) {
        if matches!(self.controller.state(), FocusState::Transitioning) {
            return;
        }
        let Some(feature) = self.controller.features().iter().find(|f| f.iso == iso) else {
            return;
        };
        let (iso, name) = (feature.iso.clone(), feature.name.clone());

        if let Err(e) = self.controller.select(&iso, SelectionOrigin::Search) {
            warn!(iso = %iso, error = %e, "search selection rejected");
            return;
        }
        self.candidate = Some(SelectionCandidate {
            iso: iso.clone(),
            name,
            origin: SelectionOrigin::Search,
        });
        self.gate_visible = true;
        self.bus.emit(self.frame, FlowEvent::GateShown { iso });
    }

    /// Uniform-random pick over the full dataset; flows through the search
    /// path, so the gate shows immediately.
    pub fn surprise_me<R>(&mut self, rng: &mut R)
    where
        R: rand::Rng + ?Sized,
    {
        let Some(feature) = random_pick(self.controller.features(), rng) else {
            return;
        };
        let iso = feature.iso.clone();
        self.pick_from_search(&iso);
    }

    pub fn suggestions(&self, query: &str) -> Vec<&CountryFeature> {
        suggest(self.controller.features(), query)
    }

    /// Confirms the pending candidate: persists the handoff record, starts
    /// the fade, and schedules the route change on an independent timer.
    /// No-op unless the gate is actually showing.
    pub fn confirm(&mut self) -> Result<(), serde_json::Error> {
        if !self.gate_visible {
            return Ok(());
        }
        let Some(candidate) = self.candidate.take() else {
            return Ok(());
        };

        self.handoff.write(&SelectedCountry {
            name: candidate.name,
            iso_code: candidate.iso,
            selected_at: Utc::now(),
        })?;

        self.gate_visible = false;
        self.controller.begin_transition();

        self.transition_epoch += 1;
        self.bus.emit(self.frame, FlowEvent::FadeStarted);
        self.timers.schedule(
            self.frame.time.offset(NAVIGATE_DELAY_S),
            self.transition_epoch,
            TransitionStep::Navigate,
        );
        self.timers.schedule(
            self.frame.time.offset(FADE_DURATION_S),
            self.transition_epoch,
            TransitionStep::FadeDone,
        );
        Ok(())
    }

    /// Rejects the pending candidate and restores the pre-selection state:
    /// overview camera, base visuals, auto-rotation — in that order. The
    /// gate hides immediately, independent of any in-flight animation.
    pub fn cancel(&mut self) {
        self.candidate = None;
        self.gate_visible = false;
        self.controller.reset_view();
        self.controller.reset_appearance();
        self.controller.resume_rotation();
    }

    /// Advances the controller and the transition timers by one frame and
    /// routes controller events into gate visibility.
    pub fn tick(&mut self, frame: Frame) {
        self.frame = frame;
        self.controller.tick(frame);

        for stamped in self.controller.drain_events() {
            let GlobeEvent::CountryFocused { iso, origin, .. } = stamped.event;
            if origin != SelectionOrigin::Direct || self.gate_visible {
                continue;
            }
            let matches_candidate = self
                .candidate
                .as_ref()
                .is_some_and(|c| c.iso == iso && c.origin == SelectionOrigin::Direct);
            if matches_candidate {
                self.gate_visible = true;
                self.bus.emit(frame, FlowEvent::GateShown { iso });
            }
        }

        let due = self.timers.drain_due(frame.time, self.transition_epoch);
        for step in due.actions {
            match step {
                TransitionStep::Navigate => self
                    .bus
                    .emit(frame, FlowEvent::NavigateTo(PLANNING_ROUTE.to_string())),
                TransitionStep::FadeDone => self.bus.emit(frame, FlowEvent::FadeCompleted),
            }
        }
    }

    pub fn gate(&self) -> GateView {
        gate_view(self.candidate.as_ref(), self.gate_visible)
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<FlowEvent>> {
        self.bus.drain()
    }

    pub fn controller(&self) -> &GlobeController {
        &self.controller
    }

    pub fn take_handoff(&mut self) -> Option<SelectedCountry> {
        self.handoff.take()
    }

    /// Tears the page down. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        self.timers.clear();
        self.candidate = None;
        self.gate_visible = false;
        self.controller.dispose();
    }
}
