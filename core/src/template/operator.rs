/*
 * operator.rs
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

//! The eight RFC 6570 expression operators and how each one renders.

use crate::escape::{escape_conformant, escape_reserved};

/// How an expression's values are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositeOutput {
    /// Written before the first defined value of the expression.
    pub output_prefix: &'static str,
    /// Between exploded values, and between the variables of one expression.
    pub explode_joiner: &'static str,
    /// Values are written as `name=value`.
    pub requires_var_assignment: bool,
    /// Reserved characters and `%XX` triplets are left unencoded.
    pub reserved_expansion: bool,
}

impl CompositeOutput {
    /// Percent-encode a value under this output's policy.
    pub fn encode(&self, value: &str) -> String {
        if self.reserved_expansion {
            escape_reserved(value)
        } else {
            escape_conformant(value)
        }
    }
}

/// Expression operator, selected by the first character of `{...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `{+var}`
    Reserved,
    /// `{#var}`
    Fragment,
    /// `{.var}`
    Label,
    /// `{/var}`
    PathSegment,
    /// `{;var}`
    PathParameter,
    /// `{?var}`
    Query,
    /// `{&var}`
    QueryContinuation,
    /// `{var}`
    Simple,
}

/// Indexed by `Operator as usize`.
const COMPOSITE_OUTPUTS: [CompositeOutput; 8] = [
    CompositeOutput {
        output_prefix: "",
        explode_joiner: ",",
        requires_var_assignment: false,
        reserved_expansion: true,
    },
    CompositeOutput {
        output_prefix: "#",
        explode_joiner: ",",
        requires_var_assignment: false,
        reserved_expansion: true,
    },
    CompositeOutput {
        output_prefix: ".",
        explode_joiner: ".",
        requires_var_assignment: false,
        reserved_expansion: false,
    },
    CompositeOutput {
        output_prefix: "/",
        explode_joiner: "/",
        requires_var_assignment: false,
        reserved_expansion: false,
    },
    CompositeOutput {
        output_prefix: ";",
        explode_joiner: ";",
        requires_var_assignment: true,
        reserved_expansion: false,
    },
    CompositeOutput {
        output_prefix: "?",
        explode_joiner: "&",
        requires_var_assignment: true,
        reserved_expansion: false,
    },
    CompositeOutput {
        output_prefix: "&",
        explode_joiner: "&",
        requires_var_assignment: true,
        reserved_expansion: false,
    },
    CompositeOutput {
        output_prefix: "",
        explode_joiner: ",",
        requires_var_assignment: false,
        reserved_expansion: false,
    },
];

impl Operator {
    #[cfg(test)]
    const ALL: [Operator; 8] = [
        Operator::Reserved,
        Operator::Fragment,
        Operator::Label,
        Operator::PathSegment,
        Operator::PathParameter,
        Operator::Query,
        Operator::QueryContinuation,
        Operator::Simple,
    ];

    /// Operator for a leading expression character; `None` means simple expansion.
    pub fn from_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            _ => None,
        }
    }

    #[cfg(test)]
    fn as_char(self) -> Option<char> {
        match self {
            Operator::Reserved => Some('+'),
            Operator::Fragment => Some('#'),
            Operator::Label => Some('.'),
            Operator::PathSegment => Some('/'),
            Operator::PathParameter => Some(';'),
            Operator::Query => Some('?'),
            Operator::QueryContinuation => Some('&'),
            Operator::Simple => None,
        }
    }

    pub fn output(self) -> &'static CompositeOutput {
        &COMPOSITE_OUTPUTS[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_lookup_round_trips() {
        for op in Operator::ALL {
            match op.as_char() {
                Some(c) => assert_eq!(Operator::from_char(c), Some(op)),
                None => assert_eq!(op, Operator::Simple),
            }
        }
        assert_eq!(Operator::from_char('v'), None);
        assert_eq!(Operator::from_char('='), None);
    }

    #[test]
    fn only_plus_and_hash_are_reserved() {
        let reserved: Vec<Operator> =
            Operator::ALL.into_iter().filter(|op| op.output().reserved_expansion).collect();
        assert_eq!(reserved, vec![Operator::Reserved, Operator::Fragment]);
    }

    #[test]
    fn query_descriptor() {
        let out = Operator::Query.output();
        assert_eq!(out.output_prefix, "?");
        assert_eq!(out.explode_joiner, "&");
        assert!(out.requires_var_assignment);
        assert_eq!(out.encode("a b/c"), "a%20b%2Fc");
        assert_eq!(Operator::Reserved.output().encode("a b/c"), "a%20b/c");
    }
}
