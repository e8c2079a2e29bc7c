/*
 * form.rs
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

//! application/x-www-form-urlencoded content built from, and parsed into, parameter maps.

use serde::Serialize;

use crate::data::{project, DataError, ParamMap, Value};
use crate::escape::{decode_form, escape_form};

/// Project `source` and write it as form content.
///
/// Pairs are joined with `&`. A list value repeats `name=value` once per element, an empty
/// value is written as a bare `name`, and null values are skipped.
pub fn to_form_string<T: Serialize + ?Sized>(source: &T) -> Result<String, DataError> {
    let params = project(source)?;
    let mut out = String::new();
    for (name, value) in params.iter() {
        match value {
            Value::List(items) => {
                for item in items {
                    append_pair(&mut out, name, item)?;
                }
            }
            other => append_pair(&mut out, name, other)?,
        }
    }
    Ok(out)
}

fn append_pair(out: &mut String, name: &str, value: &Value) -> Result<(), DataError> {
    if value.is_null() {
        return Ok(());
    }
    let s = value
        .to_scalar_string()
        .ok_or_else(|| DataError::NotScalar(name.to_string()))?;
    if !out.is_empty() {
        out.push('&');
    }
    out.push_str(&escape_form(name));
    if !s.is_empty() {
        out.push('=');
        out.push_str(&escape_form(&s));
    }
    Ok(())
}

/// Parse form content into a map in order of first appearance.
///
/// A name seen once maps to a string; a repeated name collects its values into a list.
/// Pairs with an empty name are ignored and a pair without `=` has an empty value.
pub fn parse_form(content: &str) -> ParamMap {
    let mut params = ParamMap::new();
    for pair in content.split('&') {
        let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = decode_form(name);
        if name.is_empty() {
            continue;
        }
        let value = Value::String(decode_form(value));
        match params.get_mut(&name) {
            Some(Value::List(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::List(vec![first, value]);
            }
            None => {
                params.insert(name, value);
            }
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Serialize;

    use super::*;

    #[test]
    fn struct_to_form() {
        #[derive(Serialize)]
        struct Login {
            user: &'static str,
            password: &'static str,
            remember: bool,
            scope: Vec<&'static str>,
            hint: Option<&'static str>,
            blank: &'static str,
        }
        let login = Login {
            user: "a b",
            password: "p&ss=word*",
            remember: true,
            scope: vec!["mail", "read-only"],
            hint: None,
            blank: "",
        };
        assert_eq!(
            to_form_string(&login).unwrap(),
            "blank&password=p%26ss%3Dword*&remember=true&scope=mail&scope=read-only&user=a+b"
        );
    }

    #[test]
    fn map_keeps_order_and_rejects_nesting() {
        let mut params = ParamMap::new();
        params.insert("z", "1");
        params.insert("a", "ü");
        assert_eq!(to_form_string(&params).unwrap(), "z=1&a=%C3%BC");

        let mut nested = BTreeMap::new();
        nested.insert("outer", BTreeMap::from([("inner", 1)]));
        assert_eq!(to_form_string(&nested), Err(DataError::NotScalar("outer".into())));
    }

    #[test]
    fn parse_accumulates_repeats() {
        let params = parse_form("a=1&b=x+y&a=2&&=skip&flag&a=3&c=%2B");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["a", "b", "flag", "c"]);
        assert_eq!(params.get("a"), Some(&Value::from(vec!["1", "2", "3"])));
        assert_eq!(params.get("b"), Some(&Value::from("x y")));
        assert_eq!(params.get("flag"), Some(&Value::from("")));
        assert_eq!(params.get("c"), Some(&Value::from("+")));
    }

    #[test]
    fn parse_empty() {
        assert!(parse_form("").is_empty());
    }
}
