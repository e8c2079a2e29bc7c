/*
 * escape.rs
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

//! Percent-encoding policies for URI template output and URL-encoded forms.
//! All policies work on the UTF-8 bytes of the input and emit upper-case hex.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything outside the RFC 3986 unreserved set (`ALPHA DIGIT - . _ ~`) is encoded.
const CONFORMANT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Unreserved plus the RFC 3986 reserved set (gen-delims and sub-delims) pass through.
const RESERVED: &AsciiSet = &CONFORMANT
    .remove(b':')
    .remove(b'/')
    .remove(b'?')
    .remove(b'#')
    .remove(b'[')
    .remove(b']')
    .remove(b'@')
    .remove(b'!')
    .remove(b'$')
    .remove(b'&')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*')
    .remove(b'+')
    .remove(b',')
    .remove(b';')
    .remove(b'=');

/// application/x-www-form-urlencoded: alphanumerics and `- _ . *` are kept; space becomes `+`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'*');

/// Encode everything outside the unreserved set.
pub fn escape_conformant(value: &str) -> String {
    utf8_percent_encode(value, CONFORMANT).to_string()
}

/// Encode for reserved expansion (`{+var}`, `{#var}`): reserved characters and existing
/// `%XX` triplets are kept; a `%` not starting a valid triplet becomes `%25`.
pub fn escape_reserved(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = String::with_capacity(value.len());
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && is_pct_triplet(bytes, i) {
            out.extend(utf8_percent_encode(&value[start..i], RESERVED));
            out.push_str(&value[i..i + 3]);
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }
    out.extend(utf8_percent_encode(&value[start..], RESERVED));
    out
}

fn is_pct_triplet(bytes: &[u8], at: usize) -> bool {
    at + 2 < bytes.len() && bytes[at + 1].is_ascii_hexdigit() && bytes[at + 2].is_ascii_hexdigit()
}

/// Form-encode a name or value.
pub fn escape_form(value: &str) -> String {
    // A literal "%20" in the input is itself encoded to "%2520", so this replace is exact.
    utf8_percent_encode(value, FORM).to_string().replace("%20", "+")
}

/// Percent-decode; invalid UTF-8 is replaced with U+FFFD.
pub fn decode(value: &str) -> String {
    percent_decode_str(value).decode_utf8_lossy().into_owned()
}

/// Decode form content: `+` is a space, then percent-decode.
pub fn decode_form(value: &str) -> String {
    decode(&value.replace('+', " "))
}
