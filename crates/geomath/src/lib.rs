pub mod centroid;
pub mod latlng;
pub mod vec;

// Geomath crate: small, well-tested geographic primitives only.
pub use centroid::*;
pub use latlng::*;
pub use vec::*;
