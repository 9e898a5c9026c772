//! Recurrence value model.
//!
//! - [`Weekday`] / [`WeekdaySet`]: BYDAY tokens in canonical `SU..SA` order
//! - [`FloatingDateTime`]: a date and time with no offset semantics
//! - [`DailyRecurrence`]: the `DTSTART` + `FREQ=DAILY;BYDAY;UNTIL` rule

mod floating;
mod rule;
mod weekday;

pub use floating::FloatingDateTime;
pub use rule::DailyRecurrence;
pub use weekday::{Weekday, WeekdaySet};
