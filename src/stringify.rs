//! Text-encoding delegation
//!
//! The walker produces an acyclic `serde_json::Value`; rendering it to
//! text is entirely `serde_json`'s job. These helpers just chain the two
//! steps for callers that want a string in one call.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::decycler::{decycle, decycle_with, PathEntry, Segment};
use crate::node::Node;

/// Decycle `root` and render it as a JSON string, cutting cyclic edges
/// with the default `"[Circular]"` marker.
pub fn stringify(root: &Node) -> Result<String> {
    serde_json::to_string(&decycle(root)).context("failed to encode decycled value as JSON")
}

/// Decycle `root` with a caller-supplied resolver and render the result
/// as a JSON string.
pub fn stringify_with<F>(root: &Node, resolver: F) -> Result<String>
where
    F: Fn(&Node, Option<&Segment>, &[PathEntry], Option<&Node>) -> Value,
{
    serde_json::to_string(&decycle_with(root, resolver))
        .context("failed to encode decycled value as JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_cuts_root_cycle() {
        let fixture = Node::object();
        fixture.set("name", "root");
        fixture.set("circle", fixture.clone());

        assert_eq!(
            stringify(&fixture).unwrap(),
            r#"{"name":"root","circle":"[Circular]"}"#
        );
    }

    #[test]
    fn test_stringify_preserves_key_order_of_repeats() {
        let shared = Node::object();
        shared.set("name", "shared");
        let fixture = Node::object();
        fixture.set("first", shared.clone());
        fixture.set("second", shared);

        assert_eq!(
            stringify(&fixture).unwrap(),
            r#"{"first":{"name":"shared"},"second":{"name":"shared"}}"#
        );
    }

    #[test]
    fn test_stringify_null_root_and_null_property() {
        assert_eq!(stringify(&Node::Null).unwrap(), "null");

        let fixture = Node::object();
        fixture.set("f", Node::Null);
        assert_eq!(stringify(&fixture).unwrap(), r#"{"f":null}"#);
    }

    #[test]
    fn test_stringify_with_custom_resolver() {
        let fixture = Node::array();
        fixture.push(fixture.clone());

        let rendered = stringify_with(&fixture, |_, _, _, _| {
            Value::String("<loop>".to_string())
        })
        .unwrap();
        assert_eq!(rendered, r#"["<loop>"]"#);
    }
}
