//! Schedule extraction, rule compilation, and week expansion.

pub mod compile;
pub mod expand;
pub mod extract;
pub mod model;

pub use compile::{CompileOptions, compile_from_buckets, compile_recurrence};
pub use expand::{WeekWindow, expand_current_week, expand_window};
pub use extract::extract_schedules;
pub use model::{
    DateRange, RecurrenceRecord, ScheduleEntry, ScheduleItem, SessionInstance, WeekdayBuckets,
};
