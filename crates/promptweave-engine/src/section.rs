/*
 * section.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Section flattening: one section node to its final output lines.
//!
//! Plain items accumulate in a pending buffer and merge into one
//! comma-joined line; a choice immediately following buffered content joins
//! that line instead of starting its own. Everything else flushes the
//! buffer and emits standalone through the item template.

use crate::choice::{LIST_KEYS, VALUE_SLOT, is_choice_item};
use crate::engine::Engine;
use crate::error::EngineResult;
use crate::node::Node;
use crate::scope::VarTable;

impl Engine {
    /// Flatten one section into its ordered output lines.
    pub(crate) fn flatten_section(
        &mut self,
        name: &str,
        section: &Node,
        vars: &VarTable,
    ) -> EngineResult<Vec<String>> {
        if section.is_null() {
            return Ok(Vec::new());
        }

        // Section-local vars extend the inherited table for this section only
        let local;
        let vars = match section.get("vars") {
            Some(raw @ Node::Mapping(_)) => {
                local = self.collect_variables(raw, vars, name)?;
                &local
            }
            _ => vars,
        };

        let raw_item_template = section
            .get("template")
            .and_then(Node::as_scalar)
            .unwrap_or(VALUE_SLOT);
        let item_template = self.expand(raw_item_template, vars, name)?;
        let block_template = match section.get("block_template").and_then(Node::as_scalar) {
            Some(raw) => Some(self.expand(raw, vars, name)?),
            None => None,
        };

        let empty = Vec::new();
        let single;
        let items: &[Node] = match section {
            Node::Mapping(_) => match section.first_present(&LIST_KEYS) {
                Some(Node::Sequence(items)) => items,
                Some(other) => {
                    single = [other.clone()];
                    &single
                }
                None => &empty,
            },
            Node::Sequence(items) => items,
            other => {
                single = [other.clone()];
                &single
            }
        };

        let mut lines = Vec::new();
        let mut buffer = Vec::new();

        for item in items {
            if let Node::Scalar(text) = item {
                buffer.push(self.expand(text, vars, name)?);
                continue;
            }

            // A choice right after buffered text merges into that line
            if !buffer.is_empty() && is_choice_item(item) {
                if let Some(text) = self.eval_item(item, vars, name)? {
                    buffer.push(text);
                }
                self.flush(&mut buffer, &mut lines, &item_template, vars, name)?;
                continue;
            }

            self.flush(&mut buffer, &mut lines, &item_template, vars, name)?;
            if let Some(text) = self.eval_item(item, vars, name)? {
                let line = item_template.replace(VALUE_SLOT, &text);
                lines.push(self.expand(&line, vars, name)?);
            }
        }
        self.flush(&mut buffer, &mut lines, &item_template, vars, name)?;

        // All-plain sections with no templates collapse to one line
        let all_plain = items.iter().all(|item| matches!(item, Node::Scalar(_)));
        if all_plain && item_template == VALUE_SLOT && block_template.is_none() {
            return Ok(vec![lines.join(", ")]);
        }

        if let Some(block_template) = block_template {
            let merged = lines.join(", ");
            let line = block_template.replace(VALUE_SLOT, &merged);
            return Ok(vec![self.expand(&line, vars, name)?]);
        }

        Ok(lines)
    }

    /// Merge buffered plain values into one comma-joined line wrapped by the
    /// item template.
    fn flush(
        &mut self,
        buffer: &mut Vec<String>,
        lines: &mut Vec<String>,
        item_template: &str,
        vars: &VarTable,
        section: &str,
    ) -> EngineResult<()> {
        if buffer.is_empty() {
            return Ok(());
        }
        let merged = buffer.join(", ");
        buffer.clear();
        let line = item_template.replace(VALUE_SLOT, &merged);
        lines.push(self.expand(&line, vars, section)?);
        Ok(())
    }
}
