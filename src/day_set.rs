//! Membership sets for holidays, working weekends and short days
//!
//! Style documents list dates either as plain day numbers that apply to every
//! month, or nested by year and month:
//!
//! ```yaml
//! holidays: [1, 8]
//! short_days:
//!   2025:
//!     3: [7]
//!     0: [31]     # month 0: any month of 2025
//! ```
//!
//! Both shapes normalize to `(year, month, day)` triples where `0` in the
//! year or month slot matches anything.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ANY: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DaySetRepr", into = "DaySetRepr")]
pub struct DaySet {
    entries: BTreeSet<(i32, u32, u32)>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DaySetRepr {
    Flat(Vec<u32>),
    Nested(BTreeMap<NumKey, BTreeMap<NumKey, Vec<u32>>>),
}

/// Map key written as a YAML integer or a JSON string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct NumKey(i64);

impl Serialize for NumKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for NumKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumKeyVisitor;

        impl<'de> Visitor<'de> for NumKeyVisitor {
            type Value = NumKey;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a year or month number")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<NumKey, E> {
                Ok(NumKey(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<NumKey, E> {
                i64::try_from(v).map(NumKey).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<NumKey, E> {
                v.trim().parse().map(NumKey).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(NumKeyVisitor)
    }
}

impl DaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Day numbers matching any year and month
    pub fn from_days<I: IntoIterator<Item = u32>>(days: I) -> Self {
        let mut set = Self::new();
        for day in days {
            set.insert(0, ANY, day);
        }
        set
    }

    /// Add a day; `year == 0` or `month == 0` widen the match
    pub fn insert(&mut self, year: i32, month: u32, day: u32) {
        self.entries.insert((year, month, day));
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let (year, month, day) = (date.year(), date.month(), date.day());
        self.entries.contains(&(year, month, day))
            || self.entries.contains(&(year, ANY, day))
            || self.entries.contains(&(0, month, day))
            || self.entries.contains(&(0, ANY, day))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_flat(&self) -> bool {
        self.entries
            .iter()
            .all(|&(year, month, _)| year == 0 && month == ANY)
    }
}

impl TryFrom<DaySetRepr> for DaySet {
    type Error = String;

    fn try_from(repr: DaySetRepr) -> Result<Self, Self::Error> {
        match repr {
            DaySetRepr::Flat(days) => Ok(DaySet::from_days(days)),
            DaySetRepr::Nested(years) => {
                let mut set = DaySet::new();
                for (year, months) in years {
                    let year = i32::try_from(year.0)
                        .map_err(|_| format!("year {} is out of range", year.0))?;
                    for (month, days) in months {
                        let month = u32::try_from(month.0)
                            .map_err(|_| format!("month {} is out of range", month.0))?;
                        for day in days {
                            set.insert(year, month, day);
                        }
                    }
                }
                Ok(set)
            }
        }
    }
}

impl From<DaySet> for DaySetRepr {
    fn from(set: DaySet) -> Self {
        if set.is_flat() {
            return DaySetRepr::Flat(set.entries.into_iter().map(|(_, _, day)| day).collect());
        }
        let mut years: BTreeMap<NumKey, BTreeMap<NumKey, Vec<u32>>> = BTreeMap::new();
        for (year, month, day) in set.entries {
            years
                .entry(NumKey(i64::from(year)))
                .or_default()
                .entry(NumKey(i64::from(month)))
                .or_default()
                .push(day);
        }
        DaySetRepr::Nested(years)
    }
}
