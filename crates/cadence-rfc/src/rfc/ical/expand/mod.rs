//! Recurrence expansion over floating windows.

mod occurrences;
mod timezone;

pub use occurrences::{FloatingWindow, occurrences_within};
pub use timezone::{TimeZoneResolver, resolve_timezone};
