//! Scenario tests for compiling and expanding cohort schedules.

mod cohort;
mod expand;
mod fixtures;
