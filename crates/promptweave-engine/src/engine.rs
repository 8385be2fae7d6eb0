/*
 * engine.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The engine instance and document-level flattening.
//!
//! An [`Engine`] owns the two pieces of state that outlive a single
//! fragment: the wildcard cache (persistent for the engine's lifetime) and
//! the private random source. Engines are independent of each other: two
//! instances never share cache entries or random state, and a document
//! failure leaves the instance fully usable.

use crate::error::{EngineError, EngineResult};
use crate::expand::MAX_EXPANSION_PASSES;
use crate::node::Node;
use crate::rng::Sampler;
use crate::scope::VarTable;
use crate::wildcards::{WildcardSource, WildcardStore};

/// The reserved document key holding variable definitions.
pub(crate) const VARS_KEY: &str = "vars";

/// Construction-time engine settings.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Seed for the private random source. With a seed, identical input
    /// yields byte-identical output across runs.
    pub seed: Option<u64>,

    /// Derive wildcard picks by hashing {seed, source, name} instead of
    /// consuming the sequential random stream. Only effective when seeded:
    /// a given wildcard name then always yields the same line regardless of
    /// how many other draws occurred elsewhere in the document.
    pub stable_wildcards: bool,

    /// Upper bound on text-expansion passes per fragment.
    pub max_passes: usize,
}

impl Default for EngineOptions {
    fn default() -> EngineOptions {
        EngineOptions {
            seed: None,
            stable_wildcards: false,
            max_passes: MAX_EXPANSION_PASSES,
        }
    }
}

/// A flattening engine bound to one wildcard source.
///
/// Methods take `&mut self`: the random stream and the wildcard cache are
/// not designed for concurrent callers. Run one engine per thread instead.
pub struct Engine {
    pub(crate) store: WildcardStore,
    pub(crate) sampler: Sampler,
    pub(crate) options: EngineOptions,
}

impl Engine {
    /// Create an engine with default options (unseeded).
    pub fn new(source: impl WildcardSource + 'static) -> Engine {
        Engine::with_options(source, EngineOptions::default())
    }

    /// Create an engine with explicit options.
    pub fn with_options(source: impl WildcardSource + 'static, options: EngineOptions) -> Engine {
        Engine {
            store: WildcardStore::new(Box::new(source)),
            sampler: Sampler::new(options.seed),
            options,
        }
    }

    /// Flatten a document into ordered blocks of lines.
    ///
    /// The reserved `vars` entry resolves into the base variable table;
    /// every other top-level entry flattens in document order. Sections
    /// producing no lines are omitted entirely.
    pub fn flatten_document(&mut self, document: &Node) -> EngineResult<Vec<Vec<String>>> {
        let Node::Mapping(entries) = document else {
            return Err(EngineError::InvalidDocument {
                message: "document root must be a mapping".to_string(),
            });
        };

        let base = match document.get(VARS_KEY) {
            Some(raw) => self.collect_variables(raw, &VarTable::new(), VARS_KEY)?,
            None => VarTable::new(),
        };

        let mut blocks = Vec::new();
        for (name, section) in entries {
            if name == VARS_KEY {
                continue;
            }
            let lines = self.flatten_section(name, section, &base)?;
            if !lines.is_empty() {
                blocks.push(lines);
            }
        }
        tracing::debug!(blocks = blocks.len(), "Flattened document");
        Ok(blocks)
    }
}

/// Join blocks for display: lines separated by newlines, blocks separated
/// by a blank line.
///
/// This is deliberately the only place a join policy exists; callers with a
/// different policy work from the blocks directly.
pub fn render_blocks(blocks: &[Vec<String>]) -> String {
    blocks
        .iter()
        .map(|block| block.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}
