pub mod camera;
pub mod controller;
pub mod events;
pub mod picking;
pub mod rotation;
pub mod search;
pub mod visual;

pub use camera::*;
pub use controller::*;
pub use events::*;
pub use picking::*;
pub use rotation::*;
pub use search::*;
pub use visual::*;
