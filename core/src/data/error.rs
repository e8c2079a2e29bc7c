/*
 * error.rs
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

//! Projection and primitive parsing errors.

use std::fmt::Display;

use thiserror::Error;

/// Error while turning a value into key/value pairs or parsing a primitive.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// The top-level value is not a struct or map (e.g. a bare string or a list).
    #[error("cannot project a {0} value into key/value pairs")]
    NotKeyed(&'static str),
    /// A map key serialized to something other than a string, number, bool or char.
    #[error("map key must be a scalar value")]
    KeyMustBeScalar,
    /// Value nesting went deeper than the configured limit.
    #[error("value nesting exceeds {0} levels")]
    DepthExceeded(usize),
    /// A list or map appeared where only a scalar can be rendered.
    #[error("value of {0:?} is a nested composite and cannot be rendered as a scalar")]
    NotScalar(String),
    /// A string could not be parsed as the requested primitive kind.
    #[error("expected {expected} but got {value:?}")]
    InvalidPrimitive {
        expected: &'static str,
        value: String,
    },
    /// Error raised by a `Serialize` implementation.
    #[error("{0}")]
    Custom(String),
}

impl DataError {
    pub fn invalid_primitive(expected: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidPrimitive {
            expected,
            value: value.into(),
        }
    }
}

impl serde::ser::Error for DataError {
    fn custom<T: Display>(msg: T) -> Self {
        DataError::Custom(msg.to_string())
    }
}
