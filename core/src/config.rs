/*
 * config.rs
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

//! Expansion options. Defaults suit the common case; a JSON document can override any field.

use serde::Deserialize;

use crate::data::MAX_DEPTH;

/// Options for [`UriTemplate::expand_with`](crate::template::UriTemplate::expand_with).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExpandOptions {
    /// Append parameters not named by any expression as query parameters.
    pub append_unused_as_query: bool,
    /// Maximum nesting of projected parameter values.
    pub max_depth: usize,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            append_unused_as_query: false,
            max_depth: MAX_DEPTH,
        }
    }
}

impl ExpandOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_append_unused_as_query(mut self, append: bool) -> Self {
        self.append_unused_as_query = append;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Load from JSON, e.g. `{"append_unused_as_query": true}`. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
