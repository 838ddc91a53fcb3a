pub mod clock;
pub mod types;

pub use clock::PhaseClock;
pub use types::Phase;
