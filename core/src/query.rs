/*
 * query.rs
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

//! Query-string building for parameters left over after template expansion.

use crate::data::{DataError, Value};
use crate::escape::escape_conformant;

/// Append `entries` to `buf` as query parameters.
///
/// The first parameter is introduced with `?` unless `buf` already has a query, in which
/// case every parameter is introduced with `&`. A list value repeats `name=value` once per
/// element. An empty value is written as a bare `name`. Null values and null list elements
/// are skipped. A nested struct, map or list has no scalar form and is written as compact
/// JSON.
pub fn append_query_params<'a, I>(buf: &mut String, entries: I) -> Result<(), DataError>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut first = !buf.contains('?');
    for (name, value) in entries {
        let name = escape_conformant(name);
        match value {
            Value::List(items) => {
                for item in items {
                    append_param(buf, &mut first, &name, item)?;
                }
            }
            other => append_param(buf, &mut first, &name, other)?,
        }
    }
    Ok(())
}

fn append_param(
    buf: &mut String,
    first: &mut bool,
    encoded_name: &str,
    value: &Value,
) -> Result<(), DataError> {
    if value.is_null() {
        return Ok(());
    }
    let s = match value.to_scalar_string() {
        Some(s) => s,
        None => serde_json::to_string(value).map_err(|e| DataError::Custom(e.to_string()))?,
    };
    buf.push(if *first { '?' } else { '&' });
    *first = false;
    buf.push_str(encoded_name);
    if !s.is_empty() {
        buf.push('=');
        buf.push_str(&escape_conformant(&s));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ParamMap;

    #[test]
    fn first_param_gets_question_mark() {
        let params: ParamMap = [("a", "1"), ("b", "x y")].into_iter().collect();
        let mut buf = String::from("/path");
        append_query_params(&mut buf, params.iter()).unwrap();
        assert_eq!(buf, "/path?a=1&b=x%20y");
    }

    #[test]
    fn existing_query_continues_with_ampersand() {
        let params: ParamMap = [("b", "2")].into_iter().collect();
        let mut buf = String::from("/path?a=1");
        append_query_params(&mut buf, params.iter()).unwrap();
        assert_eq!(buf, "/path?a=1&b=2");
    }

    #[test]
    fn lists_repeat_and_empty_is_bare() {
        let mut params = ParamMap::new();
        params.insert("tag", vec!["x", "y"]);
        params.insert("flag", "");
        params.insert("skip", Value::Null);
        let mut buf = String::new();
        append_query_params(&mut buf, params.iter()).unwrap();
        assert_eq!(buf, "?tag=x&tag=y&flag");
    }

    #[test]
    fn nested_composites_written_as_json() {
        let mut params = ParamMap::new();
        let inner: ParamMap = [("k", "v"), ("n", "1")].into_iter().collect();
        params.insert("m", inner);
        params.insert("grid", vec![Value::from(vec![1, 2]), Value::from(3)]);
        let mut buf = String::from("/x");
        append_query_params(&mut buf, params.iter()).unwrap();
        assert_eq!(
            buf,
            "/x?m=%7B%22k%22%3A%22v%22%2C%22n%22%3A%221%22%7D&grid=%5B1%2C2%5D&grid=3"
        );
    }
}
