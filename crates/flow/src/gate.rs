use crate::candidate::SelectionCandidate;

/// What the confirmation affordance should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
    Hidden,
    /// Confirm/cancel prompt for this candidate.
    Visible(SelectionCandidate),
}

/// Pure view function of `(candidate, visible)`.
///
/// The orchestrator decides *when* `visible` flips: immediately for search
/// candidates (an explicit, deliberate act), and only after the visual pop
/// for direct candidates (a click is ambiguous, so the prompt follows the
/// same pacing as the visual feedback).
pub fn gate_view(candidate: Option<&SelectionCandidate>, visible: bool) -> GateView {
    match candidate {
        Some(c) if visible => GateView::Visible(c.clone()),
        _ => GateView::Hidden,
    }
}
