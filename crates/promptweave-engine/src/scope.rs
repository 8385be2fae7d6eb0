/*
 * scope.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Variable tables and their collection from `vars` mappings.
//!
//! Tables are layered by value: a section-local table starts as a copy of
//! the document-global one and is extended in place, so mutating it can
//! never affect the parent. Within one `vars` mapping, definitions resolve
//! sequentially: later entries see earlier ones, never the reverse.

use std::collections::HashMap;

use crate::engine::Engine;
use crate::error::EngineResult;
use crate::expr::evaluate_builtin;
use crate::node::Node;

/// Resolved `name → text` variable bindings for one scope.
#[derive(Debug, Clone, Default)]
pub(crate) struct VarTable {
    entries: HashMap<String, String>,
}

impl VarTable {
    pub(crate) fn new() -> VarTable {
        VarTable::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }
}

impl Engine {
    /// Resolve a raw `vars` mapping into a table extending `base`.
    ///
    /// Each value goes through item evaluation against the table as built so
    /// far, then through the built-in evaluator, and is immediately visible
    /// to subsequent entries. A value that resolves to nothing stores the
    /// empty string. Non-mapping input contributes no bindings.
    pub(crate) fn collect_variables(
        &mut self,
        raw: &Node,
        base: &VarTable,
        section: &str,
    ) -> EngineResult<VarTable> {
        let mut table = base.clone();
        if let Node::Mapping(entries) = raw {
            for (name, value) in entries {
                let resolved = match self.eval_item(value, &table, section)? {
                    Some(text) => evaluate_builtin(&text, &mut self.sampler),
                    None => String::new(),
                };
                table.insert(name.clone(), resolved);
            }
        }
        Ok(table)
    }
}
