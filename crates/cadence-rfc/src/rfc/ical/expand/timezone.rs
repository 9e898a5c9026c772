//! Timezone resolution for schedule entries and stored records.

use chrono_tz::Tz;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{RfcError, RfcResult};

/// Resolver for IANA timezone names.
///
/// Keeps a cache of resolved zones so a batch of records sharing a zone
/// parses the name once.
#[derive(Debug, Default)]
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
}

impl TimeZoneResolver {
    /// Creates a new timezone resolver.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// ## Summary
    /// Resolves an IANA timezone name to a `chrono_tz::Tz`.
    ///
    /// ## Errors
    ///
    /// Returns `RfcError::UnknownTimezone` if the name is not a known IANA zone.
    ///
    /// ## Side Effects
    ///
    /// Caches successful resolutions to avoid repeated parsing.
    pub fn resolve(&mut self, tzid: &str) -> RfcResult<Tz> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let tz = resolve_timezone(tzid)?;
        self.cache.insert(tzid.to_string(), tz);

        Ok(tz)
    }
}

/// ## Summary
/// Resolves an IANA timezone name without caching.
///
/// ## Errors
/// Returns `RfcError::UnknownTimezone` if the name is not a known IANA zone.
pub fn resolve_timezone(tzid: &str) -> RfcResult<Tz> {
    Tz::from_str(tzid).map_err(|_e| RfcError::UnknownTimezone(tzid.to_string()))
}
