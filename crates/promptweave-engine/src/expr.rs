/*
 * expr.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The single built-in expression, `rand(lo, hi)`.

use crate::rng::Sampler;
use crate::scanner;

/// Evaluate a built-in call if the whole fragment is one.
///
/// `rand(lo, hi)` becomes a uniform sample in `[lo, hi]` rounded to two
/// decimal places; any other text passes through unchanged. This is a
/// permissive pass-through, never an error source.
pub(crate) fn evaluate_builtin(text: &str, sampler: &mut Sampler) -> String {
    match scanner::parse_rand_call(text) {
        Some((lo, hi)) => {
            let value = (sampler.uniform(lo, hi) * 100.0).round() / 100.0;
            value.to_string()
        }
        None => text.to_string(),
    }
}
