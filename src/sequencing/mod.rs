pub mod arp;
pub mod clock;
pub mod pattern;

pub use arp::{ArpDirection, ArpSequencer};
pub use clock::BeatClock;
pub use pattern::{PatternSlot, MAX_STEPS};
