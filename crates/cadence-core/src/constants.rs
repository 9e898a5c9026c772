/// Wall-clock hour of the UNTIL boundary placed on a range's last calendar day.
pub const UNTIL_BOUNDARY_HOUR: u32 = 23;
/// Wall-clock minute of the UNTIL boundary.
pub const UNTIL_BOUNDARY_MINUTE: u32 = 59;
/// Default seconds field of the UNTIL boundary (`23:59:00`).
pub const DEFAULT_UNTIL_BOUNDARY_SECONDS: u32 = 0;

pub const DEFAULT_LOG_LEVEL: &str = "debug";
pub const DEFAULT_STORE_PATH: &str = "cadence-store.json";

/// Prefix for environment variable overrides, e.g. `CADENCE_LOGGING__LEVEL`.
pub const ENV_PREFIX: &str = "CADENCE";
