/*
 * lib.rs
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

//! Segnaposto core: RFC 6570 URI template expansion over serde key/value projection,
//! with the percent-encoding, query and URL-encoded form helpers it is built on.
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct ListMessages {
//!     #[serde(rename = "userId")]
//!     user_id: String,
//!     labels: Vec<String>,
//!     #[serde(rename = "pageToken")]
//!     page_token: Option<String>,
//! }
//!
//! let params = ListMessages {
//!     user_id: "me".into(),
//!     labels: vec!["INBOX".into(), "UNREAD".into()],
//!     page_token: None,
//! };
//! let path = segnaposto_core::expand("users/{userId}/messages", &params, true).unwrap();
//! assert_eq!(path, "users/me/messages?labels=INBOX&labels=UNREAD");
//! ```

pub mod config;
pub mod data;
pub mod escape;
pub mod form;
pub mod query;
pub mod template;

pub use config::ExpandOptions;
pub use data::{project, DataError, ParamMap, Value};
pub use template::{expand, expand_map, expand_relative, TemplateError, UriTemplate};
