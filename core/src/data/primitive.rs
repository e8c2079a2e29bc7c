/*
 * primitive.rs
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

//! Primitive value parsing and RFC 3339 date-time handling.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};

use super::error::DataError;
use super::value::Value;

/// Target type when parsing a primitive from its string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    String,
    Char,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U64,
    F32,
    F64,
    DateTime,
}

impl PrimitiveKind {
    fn name(self) -> &'static str {
        match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Bool => "boolean",
            PrimitiveKind::I8 => "i8",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::DateTime => "RFC 3339 date-time",
        }
    }
}

/// Parse `s` as a primitive of the given kind.
///
/// Booleans follow the lenient rule: `true` in any case is true, anything else is false.
/// Date-times are normalized to their canonical RFC 3339 string.
pub fn parse_primitive(kind: PrimitiveKind, s: &str) -> Result<Value, DataError> {
    let invalid = || DataError::invalid_primitive(kind.name(), s);
    let value = match kind {
        PrimitiveKind::String => Value::String(s.to_string()),
        PrimitiveKind::Char => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Value::Char(c),
                _ => return Err(invalid()),
            }
        }
        PrimitiveKind::Bool => Value::Bool(s.eq_ignore_ascii_case("true")),
        PrimitiveKind::I8 => Value::Int(i64::from(s.parse::<i8>().map_err(|_| invalid())?)),
        PrimitiveKind::I16 => Value::Int(i64::from(s.parse::<i16>().map_err(|_| invalid())?)),
        PrimitiveKind::I32 => Value::Int(i64::from(s.parse::<i32>().map_err(|_| invalid())?)),
        PrimitiveKind::I64 => Value::Int(s.parse::<i64>().map_err(|_| invalid())?),
        PrimitiveKind::U64 => Value::UInt(s.parse::<u64>().map_err(|_| invalid())?),
        PrimitiveKind::F32 => {
            s.parse::<f32>().map_err(|_| invalid())?;
            Value::Float(s.parse::<f64>().map_err(|_| invalid())?)
        }
        PrimitiveKind::F64 => Value::Float(s.parse::<f64>().map_err(|_| invalid())?),
        PrimitiveKind::DateTime => match parse_rfc3339(s)? {
            Rfc3339::DateTime(dt) => Value::String(format_rfc3339(&dt)),
            Rfc3339::Date(d) => Value::String(d.format("%Y-%m-%d").to_string()),
        },
    };
    Ok(value)
}

/// A parsed RFC 3339 value: full date-time, or a bare `full-date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rfc3339 {
    DateTime(DateTime<FixedOffset>),
    Date(NaiveDate),
}

/// Parse an RFC 3339 date-time (`2011-03-14T18:30:00.000-07:00`) or date (`2011-03-14`).
/// A lower-case `t` or `z` is accepted.
pub fn parse_rfc3339(s: &str) -> Result<Rfc3339, DataError> {
    let s = s.trim();
    if s.len() == 10 {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Rfc3339::Date)
            .map_err(|_| DataError::invalid_primitive(PrimitiveKind::DateTime.name(), s));
    }
    DateTime::parse_from_rfc3339(&s.to_ascii_uppercase())
        .map(Rfc3339::DateTime)
        .map_err(|_| DataError::invalid_primitive(PrimitiveKind::DateTime.name(), s))
}

/// Render with millisecond precision; a zero offset renders as `Z`.
pub fn format_rfc3339(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
