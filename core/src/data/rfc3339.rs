/*
 * rfc3339.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Segnaposto, a URI template and data-binding library.
 *
 * Segnaposto is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Segnaposto is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Segnaposto.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Serde helpers that render chrono date-times in the canonical RFC 3339 form of
//! [`format_rfc3339`]: millisecond precision, `Z` for a zero offset.
//!
//! chrono's own `Serialize` omits zero fractional seconds, so a field meant to expand as
//! `2011-03-14T18:30:00.000Z` names this module:
//!
//! ```
//! use chrono::{DateTime, TimeZone, Utc};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Changes {
//!     #[serde(serialize_with = "segnaposto_core::data::rfc3339::serialize")]
//!     since: DateTime<Utc>,
//! }
//!
//! let params = Changes { since: Utc.with_ymd_and_hms(2011, 3, 14, 18, 30, 0).unwrap() };
//! let path = segnaposto_core::expand("/changes{?since}", &params, false).unwrap();
//! assert_eq!(path, "/changes?since=2011-03-14T18%3A30%3A00.000Z");
//! ```

use chrono::{DateTime, Offset, TimeZone};
use serde::Serializer;

use super::primitive::format_rfc3339;

/// Serialize a date-time as its canonical RFC 3339 string.
pub fn serialize<S, Tz>(dt: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    Tz: TimeZone,
{
    serializer.serialize_str(&format_rfc3339(&dt.with_timezone(&dt.offset().fix())))
}

/// The same for `Option<DateTime<_>>`; `None` stays null and is skipped by projection.
pub mod option {
    use chrono::{DateTime, TimeZone};
    use serde::Serializer;

    pub fn serialize<S, Tz>(dt: &Option<DateTime<Tz>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        Tz: TimeZone,
    {
        match dt {
            Some(dt) => super::serialize(dt, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};
    use serde::Serialize;

    use super::*;
    use crate::data::{project, Value};

    #[derive(Serialize)]
    struct Window {
        #[serde(serialize_with = "serialize")]
        start: DateTime<Utc>,
        #[serde(serialize_with = "serialize")]
        local: DateTime<FixedOffset>,
        #[serde(serialize_with = "option::serialize")]
        end: Option<DateTime<Utc>>,
    }

    #[test]
    fn millis_and_offsets() {
        let offset = FixedOffset::west_opt(7 * 3600).unwrap();
        let window = Window {
            start: Utc.with_ymd_and_hms(2011, 3, 14, 18, 30, 0).unwrap(),
            local: offset.with_ymd_and_hms(2011, 3, 14, 11, 30, 0).unwrap(),
            end: None,
        };
        let map = project(&window).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["local", "start"]);
        assert_eq!(map.get("start"), Some(&Value::from("2011-03-14T18:30:00.000Z")));
        assert_eq!(map.get("local"), Some(&Value::from("2011-03-14T11:30:00.000-07:00")));
    }

    #[test]
    fn option_some() {
        let window = Window {
            start: Utc.with_ymd_and_hms(2011, 3, 14, 18, 30, 0).unwrap(),
            local: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2011, 3, 14, 18, 30, 0)
                .unwrap(),
            end: Some(Utc.with_ymd_and_hms(2011, 3, 15, 0, 0, 0).unwrap()),
        };
        let map = project(&window).unwrap();
        assert_eq!(map.get("end"), Some(&Value::from("2011-03-15T00:00:00.000Z")));
        assert_eq!(map.get("local"), Some(&Value::from("2011-03-14T18:30:00.000Z")));
    }
}
