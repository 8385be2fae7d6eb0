//! # promptweave-yaml
//!
//! YAML parsing bridge for promptweave.
//!
//! This crate turns YAML text into the parser-independent
//! [`Node`](promptweave_engine::Node) tree the engine consumes. Mapping
//! entry order is preserved (document order is part of the engine's
//! contract) and every scalar keeps its textual form, so `0.5` and `"0.5"`
//! flatten identically.
//!
//! ## Example
//!
//! ```rust
//! let document = promptweave_yaml::parse("meta:\n  values: [a, b]\n").unwrap();
//! assert!(document.get("meta").is_some());
//! ```

mod error;
mod parser;

pub use error::{Error, Result};
pub use parser::{parse, to_node};
