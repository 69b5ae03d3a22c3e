//! Display computations
//! 
//! Pure functions turning a remaining time span into the digits and ring
//! progress a presentation layer renders.

pub mod breakdown;
pub mod format;

// Re-export main types
pub use breakdown::{Breakdown, ClockFace, RingProgress};
pub use format::humanize;
