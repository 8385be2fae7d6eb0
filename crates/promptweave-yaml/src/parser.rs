//! YAML parsing that builds engine `Node` trees.

use promptweave_engine::Node;
use yaml_rust2::{Yaml, YamlLoader};

use crate::{Error, Result};

/// Parse YAML from a string, producing a [`Node`] tree.
///
/// This parses a single YAML document. If the input contains multiple
/// documents, only the first one is used; empty input yields
/// [`Node::Null`].
///
/// # Errors
///
/// Returns an error if the YAML is invalid.
pub fn parse(content: &str) -> Result<Node> {
    let documents = YamlLoader::load_from_str(content).map_err(Error::from)?;
    Ok(documents.into_iter().next().map_or(Node::Null, to_node))
}

/// Convert a parsed YAML value into a [`Node`].
///
/// Scalars keep their textual form: integers and reals stay as the lexeme
/// the author wrote, booleans become `true`/`false`. Mapping entry order is
/// preserved; non-string keys are stringified.
pub fn to_node(yaml: Yaml) -> Node {
    match yaml {
        Yaml::Null | Yaml::BadValue => Node::Null,
        Yaml::String(text) => Node::Scalar(text),
        Yaml::Real(text) => Node::Scalar(text),
        Yaml::Integer(value) => Node::Scalar(value.to_string()),
        Yaml::Boolean(value) => Node::Scalar(value.to_string()),
        Yaml::Array(items) => Node::Sequence(items.into_iter().map(to_node).collect()),
        Yaml::Hash(entries) => Node::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key_text(key), to_node(value)))
                .collect(),
        ),
        // Aliases are resolved by the loader; an unresolved one has no value
        Yaml::Alias(_) => Node::Null,
    }
}

fn key_text(key: Yaml) -> String {
    match to_node(key) {
        Node::Scalar(text) => text,
        other => other.to_string(),
    }
}
