//! Day-of-week values and the BYDAY weekday set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Day of the week, numbered from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl Weekday {
    /// Returns the two-letter BYDAY token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Parses a weekday from an upper-case two-letter BYDAY token.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "SU" => Self::Sunday,
            "MO" => Self::Monday,
            "TU" => Self::Tuesday,
            "WE" => Self::Wednesday,
            "TH" => Self::Thursday,
            "FR" => Self::Friday,
            "SA" => Self::Saturday,
            _ => return None,
        })
    }

    /// Returns all weekdays in order (Sunday through Saturday).
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Sunday,
            Self::Monday,
            Self::Tuesday,
            Self::Wednesday,
            Self::Thursday,
            Self::Friday,
            Self::Saturday,
        ]
    }

    #[must_use]
    pub const fn num_days_from_sunday(self) -> u8 {
        self as u8
    }

    const fn bit(self) -> u8 {
        1 << self.num_days_from_sunday()
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(weekday: chrono::Weekday) -> Self {
        match weekday {
            chrono::Weekday::Sun => Self::Sunday,
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of weekdays a rule fires on.
///
/// Inserting a weekday twice is a no-op, and iteration always follows the
/// canonical `SU,MO,TU,WE,TH,FR,SA` order regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, weekday: Weekday) -> bool {
        let fresh = !self.contains(weekday);
        self.0 |= weekday.bit();
        fresh
    }

    #[must_use]
    pub const fn contains(self, weekday: Weekday) -> bool {
        self.0 & weekday.bit() != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        Weekday::all().into_iter().filter(move |day| self.contains(*day))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        let mut set = Self::new();
        for day in iter {
            set.insert(day);
        }
        set
    }
}

impl Extend<Weekday> for WeekdaySet {
    fn extend<I: IntoIterator<Item = Weekday>>(&mut self, iter: I) {
        for day in iter {
            self.insert(day);
        }
    }
}

/// Comma-separated BYDAY tokens, e.g. `MO,WE,FR`.
impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.iter().map(Weekday::as_str).collect();
        f.write_str(&tokens.join(","))
    }
}
