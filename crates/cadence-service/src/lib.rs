//! Recurring-session scheduling: compiles weekday schedules into stored
//! recurrence records and expands them into the sessions of a week.

pub mod cohort;
pub mod error;
pub mod schedule;
pub mod store;
