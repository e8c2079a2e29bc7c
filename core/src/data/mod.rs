/*
 * mod.rs
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

//! Key/value projection: turns any `Serialize` type into an ordered name → value map.
//!
//! `#[derive(Serialize)]` is the opt-in: `#[serde(rename = "...")]` sets the key name,
//! `#[serde(skip)]` excludes a field, and `Option::None` fields are omitted.

mod error;
mod param_map;
mod primitive;
pub mod rfc3339;
mod serializer;
mod value;

use serde::Serialize;

pub use error::DataError;
pub use param_map::ParamMap;
pub use primitive::{format_rfc3339, parse_primitive, parse_rfc3339, PrimitiveKind, Rfc3339};
pub use value::Value;

use serializer::ValueSerializer;

/// Default limit on value nesting.
pub const MAX_DEPTH: usize = 64;

/// Project `source` into an ordered key/value map.
///
/// Maps keep their serialization order; structs are ordered by ascending key name.
/// `None` and unit project to an empty map. Scalars and lists are rejected.
///
/// Date-times render through their own `Serialize`; annotate chrono fields with
/// `#[serde(serialize_with = "segnaposto_core::data::rfc3339::serialize")]` for the
/// canonical millisecond form.
pub fn project<T: Serialize + ?Sized>(source: &T) -> Result<ParamMap, DataError> {
    project_with_limit(source, MAX_DEPTH)
}

/// [`project`] with an explicit nesting limit.
pub fn project_with_limit<T: Serialize + ?Sized>(
    source: &T,
    max_depth: usize,
) -> Result<ParamMap, DataError> {
    match source.serialize(ValueSerializer::new(max_depth))? {
        Value::Null => Ok(ParamMap::new()),
        Value::Map(map) => Ok(map),
        other => Err(DataError::NotKeyed(other.kind())),
    }
}

/// Serialize `source` into a [`Value`] of any shape.
pub fn to_value<T: Serialize + ?Sized>(source: &T) -> Result<Value, DataError> {
    source.serialize(ValueSerializer::new(MAX_DEPTH))
}
