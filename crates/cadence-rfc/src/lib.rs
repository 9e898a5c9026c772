//! Time-of-day utilities and the iCalendar recurrence-rule subset used to
//! store recurring class sessions.

pub mod error;
pub mod rfc;
pub mod time;
