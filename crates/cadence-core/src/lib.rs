//! Shared configuration, errors, and closed vocabularies for the cadence
//! scheduling engine.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
