use dataset::CountryFeature;
use rand::seq::SliceRandom;

/// Suggestion list cap, for UI stability.
pub const MAX_SUGGESTIONS: usize = 10;

/// Case-insensitive substring match on display names, in dataset order,
/// capped at [`MAX_SUGGESTIONS`]. A blank query matches nothing.
pub fn suggest<'a>(features: &'a [CountryFeature], query: &str) -> Vec<&'a CountryFeature> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    features
        .iter()
        .filter(|f| f.name.to_lowercase().contains(&needle))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Uniform "surprise me" pick over the full dataset.
pub fn random_pick<'a, R>(features: &'a [CountryFeature], rng: &mut R) -> Option<&'a CountryFeature>
where
    R: rand::Rng + ?Sized,
{
    features.choose(rng)
}
