/// Base polygon elevation for unfocused countries (globe radii).
pub const BASE_ELEVATION: f64 = 0.006;
/// Hover elevation; lighter than the focus pop.
pub const HOVER_ELEVATION: f64 = 0.05;
/// Elevation of the popped, focused country.
pub const POP_ELEVATION: f64 = 0.12;

/// Fill tint applied to a country polygon.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Tint {
    #[default]
    Base,
    Hover,
    Focus,
}

/// Per-country rendering attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryVisual {
    pub elevation: f64,
    pub tint: Tint,
    /// Marker label shown only on the popped country.
    pub label: Option<String>,
}

impl CountryVisual {
    pub fn base() -> Self {
        Self {
            elevation: BASE_ELEVATION,
            tint: Tint::Base,
            label: None,
        }
    }
}

/// Visual state of the whole polygon set.
///
/// Stores only the deviations (the hovered and the popped country), so "at
/// most one country popped, everything else at base" holds structurally and
/// stale highlighting cannot survive a reset: `visual_of` is a pure function
/// of these two fields.
#[derive(Debug, Default)]
pub struct VisualTable {
    hovered: Option<String>,
    popped: Option<String>,
}

impl VisualTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_hovered(&mut self, iso: Option<&str>) {
        self.hovered = iso.map(str::to_string);
    }

    /// Pops `iso`, displacing any previously popped country.
    pub fn set_popped(&mut self, iso: Option<&str>) {
        self.popped = iso.map(str::to_string);
    }

    pub fn popped(&self) -> Option<&str> {
        self.popped.as_deref()
    }

    /// Forces every country back to base state.
    pub fn clear(&mut self) {
        self.hovered = None;
        self.popped = None;
    }

    /// Rendering attributes for one country. The pop takes precedence over
    /// hover if both somehow name the same country.
    pub fn visual_of(&self, iso: &str, name: &str) -> CountryVisual {
        if self.popped.as_deref() == Some(iso) {
            return CountryVisual {
                elevation: POP_ELEVATION,
                tint: Tint::Focus,
                label: Some(name.to_string()),
            };
        }
        if self.hovered.as_deref() == Some(iso) {
            return CountryVisual {
                elevation: HOVER_ELEVATION,
                tint: Tint::Hover,
                label: None,
            };
        }
        CountryVisual::base()
    }
}
