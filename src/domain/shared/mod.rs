pub mod clock;
pub mod usage_dto;

pub use clock::{Clock, FixedClock, SystemClock};
