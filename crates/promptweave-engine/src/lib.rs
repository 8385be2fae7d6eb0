/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Expansion engine for hierarchical prompt templates.
//!
//! This crate flattens a template document (mappings, sequences, and
//! scalars, as produced by a generic structured-data parser) into ordered
//! blocks of text lines. It supports:
//!
//! - Global and section-local `vars:`, referenced with `$name`
//! - Wildcards: `__name__` is replaced by a random line from the named
//!   resource of the configured [`WildcardSource`]
//! - A single built-in, `rand(lo, hi)`, for one-shot random numbers in
//!   variable values
//! - `choice`/`oneOf` blocks with per-option weight and chance
//! - Inline brace picks like `{foo|0.5::bar|baz}`
//! - Templates: `template:` wraps each item, `block_template:` wraps the
//!   whole section; both honor variables and wildcards
//! - Comma merging: consecutive plain strings join into one compact line
//!
//! # Architecture
//!
//! The engine is **independent of any parser**. It consumes its own
//! [`Node`] tree; conversion from a concrete format (e.g. YAML) happens in
//! a bridge crate. All random draws route through one source private to the
//! engine instance, so a seeded engine is fully reproducible.
//!
//! # Example
//!
//! ```no_run
//! use promptweave_engine::{Engine, EngineOptions, MemorySource, Node};
//!
//! let source = MemorySource::with_entries([("color", "red\nblue")]);
//! let options = EngineOptions {
//!     seed: Some(42),
//!     ..EngineOptions::default()
//! };
//! let mut engine = Engine::with_options(source, options);
//!
//! let document = Node::mapping([
//!     ("vars", Node::mapping([("mood", Node::from("serene"))])),
//!     ("meta", Node::sequence([Node::from("a $mood __color__ scene")])),
//! ]);
//!
//! let blocks = engine.flatten_document(&document).unwrap();
//! println!("{}", promptweave_engine::render_blocks(&blocks));
//! ```

pub mod engine;
pub mod error;
pub mod node;
pub mod wildcards;

mod choice;
mod expand;
mod expr;
mod rng;
mod scanner;
mod scope;
mod section;

// Re-export main types at crate root
pub use engine::{Engine, EngineOptions, render_blocks};
pub use error::{EngineError, EngineResult};
pub use node::Node;
pub use wildcards::{FileSystemSource, MemorySource, WildcardSource};
