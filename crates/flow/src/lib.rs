pub mod candidate;
pub mod gate;
pub mod handoff;
pub mod orchestrator;

pub use candidate::*;
pub use gate::*;
pub use handoff::*;
pub use orchestrator::*;
