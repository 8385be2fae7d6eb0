/*
 * scanner.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Lexical scanners for the placeholder tokens.
//!
//! The token grammars are a contract shared with template authors and other
//! tooling, so they are preserved exactly:
//!
//! - variable reference: `$name`, name = `[A-Za-z_][A-Za-z0-9_]*`
//! - brace group: `{...}` with at least one character and no nested brace
//! - wildcard reference: `__name__`, name = `[A-Za-z0-9_]+`; within a run of
//!   word characters the token extends to the last `__`
//! - built-in call: `rand(lo, hi)`, anchored to the whole fragment, each
//!   bound an optional sign and digits with an optional decimal point
//!
//! All tokens are ASCII; scanning works on bytes and copies everything else
//! through untouched.

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// One pass of `$name` substitution.
///
/// Names that `lookup` does not resolve are kept as the literal token.
pub(crate) fn substitute_variables(
    text: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut seg_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'$' && i + 1 < bytes.len() && is_ident_start(bytes[i + 1]) {
            let name_start = i + 1;
            let mut end = name_start + 1;
            while end < bytes.len() && is_word(bytes[end]) {
                end += 1;
            }
            let name = &text[name_start..end];
            if let Some(value) = lookup(name) {
                out.push_str(&text[seg_start..i]);
                out.push_str(&value);
                seg_start = end;
            }
            i = end;
        } else {
            i += 1;
        }
    }

    out.push_str(&text[seg_start..]);
    out
}

/// Replace every innermost brace group in one pass.
///
/// A group is `{` followed by at least one character, none of which is a
/// brace, followed by `}`. Outer braces around a nested group are left as
/// literal text, as is an empty `{}`.
pub(crate) fn replace_brace_groups<E>(
    text: &str,
    mut resolve: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut seg_start = 0;
    let mut last_open: Option<usize> = None;

    for i in 0..bytes.len() {
        match bytes[i] {
            b'{' => last_open = Some(i),
            b'}' => {
                if let Some(open) = last_open.take() {
                    let body = &text[open + 1..i];
                    if !body.is_empty() {
                        out.push_str(&text[seg_start..open]);
                        out.push_str(&resolve(body)?);
                        seg_start = i + 1;
                    }
                }
            }
            _ => {}
        }
    }

    out.push_str(&text[seg_start..]);
    Ok(out)
}

/// Replace every `__name__` wildcard token in one pass.
///
/// Within one run of word characters the name is greedy: `__a__b__` is a
/// single token named `a__b`, while the `b` in `__a__b` is literal text.
pub(crate) fn replace_wildcards<E>(
    text: &str,
    mut resolve: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut seg_start = 0;
    let mut i = 0;

    while i + 5 <= bytes.len() {
        if bytes[i] != b'_' || bytes[i + 1] != b'_' {
            i += 1;
            continue;
        }

        // Extent of the word-character run starting at the opening `__`.
        let mut run_end = i + 2;
        while run_end < bytes.len() && is_word(bytes[run_end]) {
            run_end += 1;
        }

        // The closing `__` is the last one in the run that leaves a
        // non-empty name.
        let close = (i + 3..=run_end.saturating_sub(2))
            .rev()
            .find(|&j| bytes[j] == b'_' && bytes[j + 1] == b'_');

        match close {
            Some(j) => {
                out.push_str(&text[seg_start..i]);
                out.push_str(&resolve(&text[i + 2..j])?);
                seg_start = j + 2;
                i = j + 2;
            }
            None => i = run_end,
        }
    }

    out.push_str(&text[seg_start..]);
    Ok(out)
}

/// Parse a whole-fragment `rand(lo, hi)` call, returning the two bounds.
///
/// Whitespace is allowed after the opening parenthesis and around the comma
/// and closing parenthesis; anything else must match exactly.
pub(crate) fn parse_rand_call(text: &str) -> Option<(f64, f64)> {
    let rest = text.strip_prefix("rand(")?;
    let rest = rest.trim_start();
    let (lo, rest) = scan_number(rest)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(',')?;
    let rest = rest.trim_start();
    let (hi, rest) = scan_number(rest)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(')')?;
    if rest.is_empty() { Some((lo, hi)) } else { None }
}

/// Scan a number of the form `[-+]?digits*[.?]digits+` off the front of
/// `text`, returning the value and the remainder.
fn scan_number(text: &str) -> Option<(f64, &str)> {
    let bytes = text.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        // The grammar requires digits after the decimal point.
        if i == frac_start {
            return None;
        }
    } else if i == int_start {
        return None;
    }

    let value = text[..i].parse::<f64>().ok()?;
    Some((value, &text[i..]))
}
