/// Which entry path produced a selection.
///
/// A tagged origin rather than separate code paths: the confirmation gate
/// downstream switches behavior on this tag, not on adapter identity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// Pointer interaction against the rendered polygons.
    Direct,
    /// Text search or the random "surprise me" pick.
    Search,
}

/// Events emitted by the focus controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobeEvent {
    /// Fired exactly once per completed, non-superseded selection, after the
    /// visual pop has settled.
    CountryFocused {
        iso: String,
        name: String,
        origin: SelectionOrigin,
    },
}
