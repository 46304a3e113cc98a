pub mod country;
pub mod loader;

pub use country::*;
pub use loader::*;
