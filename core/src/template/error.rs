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

//! Template parse and expansion errors.

use thiserror::Error;

use crate::data::DataError;

/// Error from parsing or expanding a URI template. None of these are retryable:
/// the template or the parameters must be fixed by the caller.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// A `{` with no closing `}`.
    #[error("unterminated expression starting at byte {position}")]
    Unterminated { position: usize },
    /// `{}` with nothing inside.
    #[error("empty expression at byte {position}")]
    EmptyExpression { position: usize },
    /// The base URL of a relative expansion could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The parameters could not be projected or rendered.
    #[error(transparent)]
    Data(#[from] DataError),
}
