/*
 * expression.rs
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

//! Parsing of a single `{...}` expression body.

use super::operator::Operator;

/// One variable reference: `name` or `name*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    pub name: String,
    pub explode: bool,
}

/// A parsed expression: operator plus comma-separated variable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    pub operator: Operator,
    pub varspecs: Vec<VarSpec>,
}

impl Expression {
    /// Parse the text between `{` and `}`.
    ///
    /// Only the first character can be an operator; later tokens in the list are taken
    /// literally, so in `{?a,b}` the name `b` is never read as carrying an operator.
    /// Empty names (`{a,,b}`, `{?}`) are dropped.
    pub fn parse(body: &str) -> Expression {
        let (operator, rest) = match body.chars().next().and_then(Operator::from_char) {
            Some(op) => (op, &body[1..]),
            None => (Operator::Simple, body),
        };
        let varspecs = rest
            .split(',')
            .filter_map(|token| {
                let (name, explode) = match token.strip_suffix('*') {
                    Some(name) => (name, true),
                    None => (token, false),
                };
                if name.is_empty() {
                    None
                } else {
                    Some(VarSpec {
                        name: name.to_string(),
                        explode,
                    })
                }
            })
            .collect();
        Expression { operator, varspecs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(expr: &Expression) -> Vec<(&str, bool)> {
        expr.varspecs.iter().map(|v| (v.name.as_str(), v.explode)).collect()
    }

    #[test]
    fn simple_single() {
        let expr = Expression::parse("var");
        assert_eq!(expr.operator, Operator::Simple);
        assert_eq!(names(&expr), vec![("var", false)]);
    }

    #[test]
    fn operator_only_on_first_token() {
        let expr = Expression::parse("?a,b*,#c");
        assert_eq!(expr.operator, Operator::Query);
        assert_eq!(names(&expr), vec![("a", false), ("b", true), ("#c", false)]);
    }

    #[test]
    fn explode_stripped_per_token() {
        let expr = Expression::parse("/list*,path");
        assert_eq!(expr.operator, Operator::PathSegment);
        assert_eq!(names(&expr), vec![("list", true), ("path", false)]);
    }

    #[test]
    fn empty_names_dropped() {
        assert!(Expression::parse("?").varspecs.is_empty());
        assert_eq!(names(&Expression::parse("a,,b")), vec![("a", false), ("b", false)]);
        assert!(Expression::parse("*").varspecs.is_empty());
    }
}
