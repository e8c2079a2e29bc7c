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

//! URI template expansion (RFC 6570 level 1 plus all level 4 composite expansions).
//!
//! For the variables
//!
//! ```text
//! var  := "value"
//! list := ["red", "green", "blue"]
//! keys := [("semi", ";"), ("dot", "."), ("comma", ",")]
//! ```
//!
//! the operators expand as:
//!
//! ```text
//! {var}    value               {list*}   red,green,blue
//! {keys}   semi,%3B,dot,.,comma,%2C    {keys*}   semi=%3B,dot=.,comma=%2C
//! {+keys}  semi,;,dot,.,comma,,        {#list}   #red,green,blue
//! X{.list*} X.red.green.blue   {/list*}  /red/green/blue
//! {;list*} ;list=red;list=green;list=blue
//! {?keys*} ?semi=%3B&dot=.&comma=%2C   {&list}   &list=red,green,blue
//! ```
//!
//! Parameters are projected once per expansion into an owned [`ParamMap`]; each variable
//! named by an expression is removed from it, so with `append_unused` only the variables
//! that no expression named are appended as query parameters. The caller's value is never
//! modified.

mod error;
mod expression;
mod operator;

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::Serialize;
use url::Url;

use crate::config::ExpandOptions;
use crate::data::{project_with_limit, DataError, ParamMap, Value};
use crate::escape::escape_conformant;
use crate::query::append_query_params;

pub use error::TemplateError;
pub use expression::{Expression, VarSpec};
pub use operator::{CompositeOutput, Operator};

/// Joiner between list items and map entries when the explode modifier is absent.
const NON_EXPLODE_JOINER: &str = ",";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Expression(Expression),
}

/// A parsed URI template, reusable across expansions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Split `template` into literal text and `{...}` expressions.
    ///
    /// A `}` outside an expression is literal text. A `{` without a closing `}`, or an
    /// empty `{}`, is an error.
    pub fn parse(template: &str) -> Result<UriTemplate, TemplateError> {
        let mut segments = Vec::new();
        let mut cur = 0;
        while let Some(offset) = template[cur..].find('{') {
            let open = cur + offset;
            if open > cur {
                segments.push(Segment::Literal(template[cur..open].to_string()));
            }
            let close = template[open + 1..]
                .find('}')
                .map(|i| open + 1 + i)
                .ok_or(TemplateError::Unterminated { position: open })?;
            let body = &template[open + 1..close];
            if body.is_empty() {
                return Err(TemplateError::EmptyExpression { position: open });
            }
            segments.push(Segment::Expression(Expression::parse(body)));
            cur = close + 1;
        }
        if cur < template.len() {
            segments.push(Segment::Literal(template[cur..].to_string()));
        }
        Ok(UriTemplate {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn has_expressions(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, Segment::Expression(_)))
    }

    /// Variable names in template order (a name used twice appears twice).
    pub fn variable_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().flat_map(|segment| match segment {
            Segment::Expression(expr) => expr.varspecs.iter().map(|v| v.name.as_str()).collect(),
            Segment::Literal(_) => Vec::new(),
        })
    }

    /// Expand with `parameters` projected through serde.
    pub fn expand<T: Serialize + ?Sized>(
        &self,
        parameters: &T,
        append_unused: bool,
    ) -> Result<String, TemplateError> {
        let options = ExpandOptions::new().with_append_unused_as_query(append_unused);
        self.expand_with(parameters, &options)
    }

    pub fn expand_with<T: Serialize + ?Sized>(
        &self,
        parameters: &T,
        options: &ExpandOptions,
    ) -> Result<String, TemplateError> {
        if !self.has_expressions() && !options.append_unused_as_query {
            return Ok(self.source.clone());
        }
        let params = project_with_limit(parameters, options.max_depth)?;
        self.expand_map(params, options.append_unused_as_query)
    }

    /// Expand against an already projected map, consuming it.
    pub fn expand_map(
        &self,
        mut params: ParamMap,
        append_unused: bool,
    ) -> Result<String, TemplateError> {
        if !self.has_expressions() && !append_unused {
            return Ok(self.source.clone());
        }
        let supplied = params.len();
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Expression(expr) => expand_expression(expr, &mut params, &mut out)?,
            }
        }
        if append_unused {
            append_query_params(&mut out, params.iter())?;
        }
        debug!(
            "expanded {:?}: {} of {} parameter(s) consumed, {} unused{}",
            self.source,
            supplied - params.len(),
            supplied,
            params.len(),
            if append_unused { " and appended" } else { "" }
        );
        Ok(out)
    }
}

impl FromStr for UriTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, TemplateError> {
        UriTemplate::parse(s)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Expand `template` with `parameters`.
///
/// With `append_unused`, parameters that no expression names are appended as query
/// parameters. Without it, a template with no expressions is returned unchanged.
pub fn expand<T: Serialize + ?Sized>(
    template: &str,
    parameters: &T,
    append_unused: bool,
) -> Result<String, TemplateError> {
    UriTemplate::parse(template)?.expand(parameters, append_unused)
}

/// Expand `template` against an owned, already projected map.
pub fn expand_map(
    template: &str,
    parameters: ParamMap,
    append_unused: bool,
) -> Result<String, TemplateError> {
    UriTemplate::parse(template)?.expand_map(parameters, append_unused)
}

/// Expand a template relative to `base_url`; see [`resolve_relative`].
pub fn expand_relative<T: Serialize + ?Sized>(
    base_url: &str,
    template: &str,
    parameters: &T,
    append_unused: bool,
) -> Result<String, TemplateError> {
    let full = resolve_relative(base_url, template)?;
    expand(&full, parameters, append_unused)
}

/// Join a template onto a base URL.
///
/// A template starting with `/` replaces the base URL's path (and drops its query and
/// fragment). An absolute `http://` or `https://` template is used as is. Anything else
/// is appended to the base URL verbatim.
pub fn resolve_relative(base_url: &str, template: &str) -> Result<String, TemplateError> {
    if template.starts_with('/') {
        let mut url = Url::parse(base_url).map_err(|source| TemplateError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        url.set_path("");
        url.set_query(None);
        url.set_fragment(None);
        Ok(format!("{}{}", url.as_str().trim_end_matches('/'), template))
    } else if template.starts_with("http://") || template.starts_with("https://") {
        Ok(template.to_string())
    } else {
        Ok(format!("{}{}", base_url, template))
    }
}

fn expand_expression(
    expr: &Expression,
    params: &mut ParamMap,
    out: &mut String,
) -> Result<(), DataError> {
    let output = expr.operator.output();
    let mut first = true;
    for spec in &expr.varspecs {
        let value = match params.remove(&spec.name) {
            Some(value) if is_defined(&value) => value,
            _ => {
                trace!("variable {:?} undefined, skipped", spec.name);
                continue;
            }
        };
        out.push_str(if first {
            output.output_prefix
        } else {
            output.explode_joiner
        });
        first = false;
        match value {
            Value::List(items) => render_list(spec, &items, output, out)?,
            Value::Map(map) => render_map(spec, &map, output, out)?,
            scalar => {
                if output.requires_var_assignment {
                    push_assignment(&spec.name, out);
                }
                out.push_str(&output.encode(&scalar_string(&spec.name, &scalar)?));
            }
        }
    }
    Ok(())
}

/// Null, empty lists and empty maps are undefined and contribute nothing.
fn is_defined(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::List(items) => items.iter().any(|v| !v.is_null()),
        Value::Map(map) => map.iter().any(|(_, v)| !v.is_null()),
        _ => true,
    }
}

fn scalar_string(name: &str, value: &Value) -> Result<String, DataError> {
    value
        .to_scalar_string()
        .ok_or_else(|| DataError::NotScalar(name.to_string()))
}

/// Variable names are always encoded conformantly, whatever the operator.
fn push_assignment(name: &str, out: &mut String) {
    out.push_str(&escape_conformant(name));
    out.push('=');
}

fn render_list(
    spec: &VarSpec,
    items: &[Value],
    output: &CompositeOutput,
    out: &mut String,
) -> Result<(), DataError> {
    let joiner = if spec.explode {
        output.explode_joiner
    } else {
        if output.requires_var_assignment {
            push_assignment(&spec.name, out);
        }
        NON_EXPLODE_JOINER
    };
    for (i, item) in items.iter().filter(|v| !v.is_null()).enumerate() {
        if i > 0 {
            out.push_str(joiner);
        }
        if spec.explode && output.requires_var_assignment {
            push_assignment(&spec.name, out);
        }
        out.push_str(&output.encode(&scalar_string(&spec.name, item)?));
    }
    Ok(())
}

fn render_map(
    spec: &VarSpec,
    map: &ParamMap,
    output: &CompositeOutput,
    out: &mut String,
) -> Result<(), DataError> {
    let (joiner, pair_joiner) = if spec.explode {
        (output.explode_joiner, "=")
    } else {
        if output.requires_var_assignment {
            push_assignment(&spec.name, out);
        }
        (NON_EXPLODE_JOINER, NON_EXPLODE_JOINER)
    };
    for (i, (key, value)) in map.iter().filter(|(_, v)| !v.is_null()).enumerate() {
        if i > 0 {
            out.push_str(joiner);
        }
        let s = scalar_string(&format!("{}.{}", spec.name, key), value)?;
        out.push_str(&output.encode(key));
        out.push_str(pair_joiner);
        out.push_str(&output.encode(&s));
    }
    Ok(())
}
