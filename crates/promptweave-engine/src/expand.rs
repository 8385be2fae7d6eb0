/*
 * expand.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The fixed-point text expansion loop.
//!
//! A fragment is expanded in three stages: one pass of variable
//! substitution, then alternating brace-choice and wildcard resolution until
//! two consecutive passes produce identical text. Choice options and
//! templates can introduce further placeholders, so a single pass is not
//! enough; the loop is bounded to keep cyclic input from spinning forever.

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::rng::stable_index;
use crate::scanner;
use crate::scope::VarTable;

/// Upper bound on expansion passes before giving up.
pub(crate) const MAX_EXPANSION_PASSES: usize = 32;

impl Engine {
    /// Expand `$vars`, brace groups, and wildcards in `text` until stable,
    /// then trim surrounding whitespace.
    ///
    /// Unknown variables and missing wildcards stay as literal tokens.
    pub(crate) fn expand(
        &mut self,
        text: &str,
        vars: &VarTable,
        section: &str,
    ) -> EngineResult<String> {
        let mut expanded =
            scanner::substitute_variables(text, |name| vars.get(name).map(String::from));

        for _ in 0..self.options.max_passes {
            let next = scanner::replace_brace_groups(&expanded, |body| {
                self.resolve_brace(body, vars, section)
            })?;
            let next = scanner::replace_wildcards(&next, |name| self.resolve_wildcard(name))?;

            if next == expanded {
                return Ok(next.trim().to_string());
            }
            expanded = next;
        }

        Err(EngineError::ExpansionDidNotConverge {
            section: section.to_string(),
            fragment: text.to_string(),
            passes: self.options.max_passes,
        })
    }

    /// Resolve one wildcard occurrence. An empty list keeps the token
    /// literal. Each occurrence samples independently unless the engine is
    /// in stable-index mode.
    fn resolve_wildcard(&mut self, name: &str) -> EngineResult<String> {
        let lines = self.store.load(name)?;
        if lines.is_empty() {
            return Ok(format!("__{name}__"));
        }

        let index = match self.options.seed {
            Some(seed) if self.options.stable_wildcards => {
                stable_index(seed, self.store.identity(), name, lines.len())
            }
            _ => self.sampler.index(lines.len()),
        };
        Ok(lines[index].clone())
    }
}
