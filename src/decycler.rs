//! Cycle-cutting graph walker
//!
//! Rewrites a possibly self-referential [`Node`] graph into an acyclic
//! [`serde_json::Value`] that any ordinary recursive text encoder can
//! render without risk of non-termination. A reference back to an ancestor
//! on the current root-to-node path is replaced by a sentinel (or by a
//! caller-supplied resolver's output); repeated references that are not
//! ancestors are serialized independently and in full.

use serde_json::{Map, Value};

use crate::node::Node;

/// Default substitute for a cyclic edge.
pub const CIRCULAR_MARKER: &str = "[Circular]";

/// The edge through which a parent container reached a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// An object key.
    Key(String),
    /// An array index.
    Index(usize),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// One frame of the ancestor stack: a container on the current
/// root-to-node path and the edge through which it was reached.
///
/// The root frame has `label: None`. Frames are pushed when the walker
/// descends into a container and popped when it returns, so at any moment
/// the stack is exactly the chain of identity-distinct containers from the
/// root down to the position being visited.
#[derive(Debug, Clone)]
pub struct PathEntry {
    /// The container (or hooked node standing in for one) on the path.
    pub node: Node,
    /// The key or index through which its parent reached it.
    pub label: Option<Segment>,
}

/// Rewrite `root` into an acyclic value, substituting `"[Circular]"` for
/// every reference back to an ancestor.
///
/// Terminates for every finite graph, cyclic or not: each container is
/// visited once per distinct root-to-it path and every cyclic edge is cut
/// on the first re-encounter of an ancestor. The input graph is never
/// mutated by the walker itself (a [`crate::ToJson`] hook may mutate
/// shared state as a side effect of producing its representation; that is
/// observed, not prevented).
#[must_use]
pub fn decycle(root: &Node) -> Value {
    decycle_with(root, |_, _, _, _| Value::String(CIRCULAR_MARKER.to_string()))
}

/// Rewrite `root` into an acyclic value, substituting the resolver's
/// output for every cyclic edge.
///
/// The resolver is called exactly once per detected cyclic edge with the
/// cycle target, the edge label through which it was reached, the ancestor
/// stack from the root down to the current parent, and the parent itself.
/// It must return a value that is itself acyclic; its output is not
/// re-validated. A panicking resolver unwinds through this call unchanged
/// and the partial output is discarded.
#[must_use]
pub fn decycle_with<F>(root: &Node, resolver: F) -> Value
where
    F: Fn(&Node, Option<&Segment>, &[PathEntry], Option<&Node>) -> Value,
{
    let mut stack = Vec::new();
    visit(root, root, None, None, &mut stack, &resolver)
}

/// Depth-first, pre-order visit of one position in the graph.
///
/// `value` is what is being serialized at this position; `identity` is the
/// node whose identity goes on the ancestor stack if we descend. The two
/// differ only after a custom hook fires: the hook's returned value is
/// processed under the original hooked node's stack position, so a
/// representation that reaches back to the hooked node is still cut.
fn visit<F>(
    value: &Node,
    identity: &Node,
    label: Option<&Segment>,
    parent: Option<&Node>,
    stack: &mut Vec<PathEntry>,
    resolver: &F,
) -> Value
where
    F: Fn(&Node, Option<&Segment>, &[PathEntry], Option<&Node>) -> Value,
{
    // Cycle check strictly precedes the hook: an ancestor occurrence is
    // resolved without ever invoking its hook. Scalars have no identity
    // and never match.
    if stack.iter().any(|entry| entry.node.ptr_eq(value)) {
        return resolver(value, label, stack.as_slice(), parent);
    }

    match value {
        Node::Null => Value::Null,
        Node::Bool(b) => Value::Bool(*b),
        Node::Number(n) => Value::Number(n.clone()),
        Node::String(s) => Value::String(s.clone()),
        Node::Custom(hook) => {
            // Computed fresh on every visit, then re-processed from the
            // top under the pre-hook node's stack position.
            let representation = hook.to_json();
            visit(&representation, identity, label, parent, stack, resolver)
        }
        Node::Array(items) => {
            // Snapshot the children before descending so a hook that
            // mutates this container mid-walk cannot double-borrow it.
            // The mutation stays visible to later visits of the container.
            let snapshot: Vec<Node> = items.borrow().clone();
            stack.push(PathEntry {
                node: identity.clone(),
                label: label.cloned(),
            });
            let mut output = Vec::with_capacity(snapshot.len());
            for (index, child) in snapshot.iter().enumerate() {
                let segment = Segment::Index(index);
                output.push(visit(child, child, Some(&segment), Some(value), stack, resolver));
            }
            stack.pop();
            Value::Array(output)
        }
        Node::Object(entries) => {
            let snapshot: Vec<(String, Node)> = entries.borrow().clone();
            stack.push(PathEntry {
                node: identity.clone(),
                label: label.cloned(),
            });
            let mut output = Map::with_capacity(snapshot.len());
            for (key, child) in &snapshot {
                let segment = Segment::Key(key.clone());
                output.insert(
                    key.clone(),
                    visit(child, child, Some(&segment), Some(value), stack, resolver),
                );
            }
            stack.pop();
            Value::Object(output)
        }
    }
}
