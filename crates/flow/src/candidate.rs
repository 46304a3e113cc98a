use globe::SelectionOrigin;

/// A country the user has picked but not yet confirmed.
///
/// Created the instant a user act identifies a country; destroyed when the
/// confirmation gate resolves or a newer candidate supersedes it. The origin
/// tag is what the gate switches its pacing on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionCandidate {
    pub iso: String,
    pub name: String,
    pub origin: SelectionOrigin,
}
