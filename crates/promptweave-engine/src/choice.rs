/*
 * choice.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Weighted, chance-gated choice resolution.
//!
//! One algorithm core serves two syntaxes: the inline brace expression
//! `{optA|weight::optB|optC}` and the explicit `choice`/`oneOf` block with
//! per-option `chance` and `weight`. Item evaluation, the mapping from one
//! document node to an optional resolved string, also lives here because
//! choice handling dominates it.

use crate::engine::Engine;
use crate::error::{EngineError, EngineResult};
use crate::node::Node;
use crate::scope::VarTable;

/// Keys that may carry a section's or choice block's option list, in
/// priority order.
pub(crate) const LIST_KEYS: [&str; 3] = ["values", "options", "choices"];

/// Keys that mark a mapping as a choice block.
pub(crate) const CHOICE_KEYS: [&str; 2] = ["choice", "oneOf"];

/// The placeholder replaced by the resolved value in templates.
pub(crate) const VALUE_SLOT: &str = "$value";

/// True for items that resolve as a choice block: either a single-key
/// `choice`/`oneOf` wrapper or a mapping carrying a choice key directly.
pub(crate) fn is_choice_item(item: &Node) -> bool {
    match item {
        Node::Mapping(entries) => {
            (entries.len() == 1 && CHOICE_KEYS.contains(&entries[0].0.as_str()))
                || CHOICE_KEYS.iter().any(|key| item.get(key).is_some())
        }
        _ => false,
    }
}

impl Engine {
    /// Resolve the body of one inline brace group.
    ///
    /// Parts split on `|`; a part is `weight::text` or bare text at weight
    /// 1.0. A non-numeric weight token keeps the entire part (including the
    /// `::`) as the option text; deliberate leniency, not an error. Every
    /// option is expanded before the draw.
    pub(crate) fn resolve_brace(
        &mut self,
        body: &str,
        vars: &VarTable,
        section: &str,
    ) -> EngineResult<String> {
        let mut texts = Vec::new();
        let mut weights = Vec::new();

        for part in body.split('|') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (weight, option) = match part.split_once("::") {
                Some((token, rest)) => match token.trim().parse::<f64>() {
                    Ok(weight) => (weight, rest),
                    Err(_) => (1.0, part),
                },
                None => (1.0, part),
            };
            texts.push(self.expand(option, vars, section)?);
            weights.push(weight);
        }

        if texts.is_empty() {
            return Err(EngineError::MalformedBraceExpression {
                section: section.to_string(),
                expr: body.to_string(),
                message: "no viable options".to_string(),
            });
        }

        let index = self.sampler.pick_weighted(&weights).ok_or_else(|| {
            EngineError::MalformedBraceExpression {
                section: section.to_string(),
                expr: body.to_string(),
                message: "weights must be positive and not all zero".to_string(),
            }
        })?;
        Ok(texts.swap_remove(index))
    }

    /// Resolve an explicit choice block. `Ok(None)` means skip: the block's
    /// own chance gate failed, or every option was gated out.
    pub(crate) fn resolve_choice(
        &mut self,
        block: &Node,
        vars: &VarTable,
        section: &str,
    ) -> EngineResult<Option<String>> {
        let chance = block.get("chance").and_then(Node::as_f64).unwrap_or(1.0);
        if !self.sampler.passes(chance) {
            return Ok(None);
        }

        let template = block
            .get("template")
            .and_then(Node::as_scalar)
            .unwrap_or(VALUE_SLOT);

        let options = block.first_present(&LIST_KEYS).ok_or_else(|| {
            EngineError::MalformedChoiceBlock {
                section: section.to_string(),
                message: "expected one of 'values', 'options', or 'choices'".to_string(),
            }
        })?;

        let single;
        let items: &[Node] = match options {
            Node::Sequence(items) => items,
            other => {
                single = [other.clone()];
                &single
            }
        };

        let mut texts = Vec::new();
        let mut weights = Vec::new();
        for option in items {
            let (text, weight) = match option {
                Node::Mapping(_) => {
                    let chance = option.get("chance").and_then(Node::as_f64).unwrap_or(1.0);
                    if !self.sampler.passes(chance) {
                        continue;
                    }
                    let name = option
                        .get("name")
                        .map(Node::to_string)
                        .unwrap_or_default();
                    let weight = option.get("weight").and_then(Node::as_f64).unwrap_or(1.0);
                    (name, weight)
                }
                other => (other.to_string(), 1.0),
            };
            texts.push(self.expand(&text, vars, section)?);
            weights.push(weight);
        }

        if texts.is_empty() {
            return Ok(None);
        }

        let index = self.sampler.pick_weighted(&weights).ok_or_else(|| {
            EngineError::MalformedChoiceBlock {
                section: section.to_string(),
                message: "option weights must be positive and not all zero".to_string(),
            }
        })?;
        let chosen = texts.swap_remove(index);

        // The templated result is expanded once more so placeholders the
        // template introduces resolve too.
        let line = template.replace(VALUE_SLOT, &chosen);
        self.expand(&line, vars, section).map(Some)
    }

    /// Map one document node to an optional resolved string.
    pub(crate) fn eval_item(
        &mut self,
        item: &Node,
        vars: &VarTable,
        section: &str,
    ) -> EngineResult<Option<String>> {
        if let Node::Mapping(entries) = item {
            // Wrapper shorthand: {choice: ...} / {oneOf: ...}
            if entries.len() == 1 && CHOICE_KEYS.contains(&entries[0].0.as_str()) {
                let payload = &entries[0].1;
                if matches!(payload, Node::Mapping(_)) {
                    return self.resolve_choice(payload, vars, section);
                }
                // A non-mapping payload is an implicit option list
                let block = Node::Mapping(vec![("values".to_string(), payload.clone())]);
                return self.resolve_choice(&block, vars, section);
            }

            // Direct mapping with choice keys
            if CHOICE_KEYS.iter().any(|key| item.get(key).is_some()) {
                return self.resolve_choice(item, vars, section);
            }

            // Named entry with chance
            if let Some(name) = item.get("name") {
                let chance = item.get("chance").and_then(Node::as_f64).unwrap_or(1.0);
                if !self.sampler.passes(chance) {
                    return Ok(None);
                }
                return self.expand(&name.to_string(), vars, section).map(Some);
            }
        }

        // Plain scalar, or anything else stringified
        match item {
            Node::Scalar(text) => self.expand(text, vars, section).map(Some),
            other => self.expand(&other.to_string(), vars, section).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wildcards::MemorySource;

    fn engine() -> Engine {
        Engine::new(MemorySource::new())
    }

    fn no_vars() -> VarTable {
        VarTable::new()
    }

    #[test]
    fn test_brace_single_option() {
        let mut engine = engine();
        let result = engine.resolve_brace("only", &no_vars(), "s").unwrap();
        assert_eq!(result, "only");
    }

    #[test]
    fn test_brace_zero_weight_excludes_option() {
        let mut engine = engine();
        for _ in 0..50 {
            let result = engine.resolve_brace("0::never|1::always", &no_vars(), "s").unwrap();
            assert_eq!(result, "always");
        }
    }

    #[test]
    fn test_brace_non_numeric_weight_keeps_whole_part() {
        let mut engine = engine();
        let result = engine.resolve_brace("w::x", &no_vars(), "s").unwrap();
        assert_eq!(result, "w::x");
    }

    #[test]
    fn test_brace_blank_parts_dropped() {
        let mut engine = engine();
        let result = engine.resolve_brace("| only |", &no_vars(), "s").unwrap();
        assert_eq!(result, "only");
    }

    #[test]
    fn test_brace_all_blank_is_error() {
        let mut engine = engine();
        let error = engine.resolve_brace(" | ", &no_vars(), "s").unwrap_err();
        assert!(matches!(error, EngineError::MalformedBraceExpression { .. }));
    }

    #[test]
    fn test_brace_all_zero_weights_is_error() {
        let mut engine = engine();
        let error = engine.resolve_brace("0::a|0::b", &no_vars(), "s").unwrap_err();
        assert!(matches!(error, EngineError::MalformedBraceExpression { .. }));
    }

    #[test]
    fn test_brace_options_are_expanded() {
        let mut engine = engine();
        let mut vars = VarTable::new();
        vars.insert("x", "expanded");
        let result = engine.resolve_brace("$x", &vars, "s").unwrap();
        assert_eq!(result, "expanded");
    }

    fn choice_block(entries: Vec<(&str, Node)>) -> Node {
        Node::mapping(entries)
    }

    #[test]
    fn test_choice_missing_list_key_is_error() {
        let mut engine = engine();
        let block = choice_block(vec![("template", Node::from("$value"))]);
        let error = engine.resolve_choice(&block, &no_vars(), "sec").unwrap_err();
        match error {
            EngineError::MalformedChoiceBlock { section, .. } => assert_eq!(section, "sec"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_choice_chance_zero_skips_block() {
        let mut engine = engine();
        let block = choice_block(vec![
            ("chance", Node::from("0")),
            ("values", Node::sequence([Node::from("x")])),
        ]);
        for _ in 0..50 {
            assert_eq!(engine.resolve_choice(&block, &no_vars(), "s").unwrap(), None);
        }
    }

    #[test]
    fn test_choice_option_chance_zero_leaves_pool() {
        let mut engine = engine();
        let gated = Node::mapping([("name", Node::from("never")), ("chance", Node::from("0"))]);
        let block = choice_block(vec![(
            "values",
            Node::sequence([gated, Node::from("always")]),
        )]);
        for _ in 0..50 {
            let result = engine.resolve_choice(&block, &no_vars(), "s").unwrap();
            assert_eq!(result.as_deref(), Some("always"));
        }
    }

    #[test]
    fn test_choice_all_options_gated_out_skips() {
        let mut engine = engine();
        let gated = Node::mapping([("name", Node::from("never")), ("chance", Node::from("0"))]);
        let block = choice_block(vec![("values", Node::sequence([gated]))]);
        assert_eq!(engine.resolve_choice(&block, &no_vars(), "s").unwrap(), None);
    }

    #[test]
    fn test_choice_template_wraps_and_expands() {
        let mut engine = engine();
        let mut vars = VarTable::new();
        vars.insert("suffix", "tail");
        let block = choice_block(vec![
            ("values", Node::sequence([Node::from("head")])),
            ("template", Node::from("<$value $suffix>")),
        ]);
        let result = engine.resolve_choice(&block, &vars, "s").unwrap();
        assert_eq!(result.as_deref(), Some("<head tail>"));
    }

    #[test]
    fn test_choice_malformed_chance_defaults_to_one() {
        let mut engine = engine();
        let block = choice_block(vec![
            ("chance", Node::from("often")),
            ("values", Node::sequence([Node::from("x")])),
        ]);
        assert_eq!(
            engine.resolve_choice(&block, &no_vars(), "s").unwrap().as_deref(),
            Some("x")
        );
    }

    #[test]
    fn test_choice_weighted_zero_weight_option() {
        let mut engine = engine();
        let never = Node::mapping([("name", Node::from("never")), ("weight", Node::from("0"))]);
        let block = choice_block(vec![(
            "options",
            Node::sequence([never, Node::from("always")]),
        )]);
        for _ in 0..50 {
            let result = engine.resolve_choice(&block, &no_vars(), "s").unwrap();
            assert_eq!(result.as_deref(), Some("always"));
        }
    }

    #[test]
    fn test_eval_item_wrapper_shorthand() {
        let mut engine = engine();
        let item = Node::mapping([(
            "oneOf",
            Node::mapping([("values", Node::sequence([Node::from("x")]))]),
        )]);
        let result = engine.eval_item(&item, &no_vars(), "s").unwrap();
        assert_eq!(result.as_deref(), Some("x"));
    }

    #[test]
    fn test_eval_item_wrapper_with_bare_list() {
        let mut engine = engine();
        let item = Node::mapping([("choice", Node::sequence([Node::from("x")]))]);
        let result = engine.eval_item(&item, &no_vars(), "s").unwrap();
        assert_eq!(result.as_deref(), Some("x"));
    }

    #[test]
    fn test_eval_item_named_entry() {
        let mut engine = engine();
        let item = Node::mapping([("name", Node::from("value"))]);
        let result = engine.eval_item(&item, &no_vars(), "s").unwrap();
        assert_eq!(result.as_deref(), Some("value"));
    }

    #[test]
    fn test_eval_item_named_entry_chance_zero_skips() {
        let mut engine = engine();
        let item = Node::mapping([("name", Node::from("value")), ("chance", Node::from("0"))]);
        assert_eq!(engine.eval_item(&item, &no_vars(), "s").unwrap(), None);
    }

    #[test]
    fn test_eval_item_plain_scalar() {
        let mut engine = engine();
        let result = engine.eval_item(&Node::from("  padded  "), &no_vars(), "s").unwrap();
        assert_eq!(result.as_deref(), Some("padded"));
    }

    #[test]
    fn test_eval_item_fallback_stringifies() {
        let mut engine = engine();
        let item = Node::sequence([Node::from("a"), Node::from("b")]);
        let result = engine.eval_item(&item, &no_vars(), "s").unwrap();
        assert_eq!(result.as_deref(), Some("[a, b]"));
    }

    #[test]
    fn test_is_choice_item() {
        assert!(is_choice_item(&Node::mapping([(
            "oneOf",
            Node::sequence([Node::from("x")])
        )])));
        assert!(is_choice_item(&Node::mapping([
            ("choice", Node::from("x")),
            ("template", Node::from("$value")),
        ])));
        assert!(!is_choice_item(&Node::mapping([("name", Node::from("x"))])));
        assert!(!is_choice_item(&Node::from("plain")));
    }
}
