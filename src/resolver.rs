//! Ready-made cycle resolvers
//!
//! A resolver chooses the replacement value for a detected cyclic edge. It
//! is a pure function of the cycle target, the edge label, the ancestor
//! stack and the parent container; anything it synthesizes (such as a
//! path string) must be derivable from those four inputs alone.

use serde_json::{json, Value};

use crate::decycler::{PathEntry, Segment};
use crate::node::Node;

/// Resolver that replaces a cyclic edge with a JSON-pointer-style
/// reference to the cycle target.
///
/// The pointer is assembled from the edge labels on the ancestor stack,
/// starting at `"#"` and stopping once the stack frame holding the cycle
/// target has contributed its label. A two-node mutual cycle first reached
/// under `definitions.A` therefore cuts with `{"$ref": "#/definitions/A"}`,
/// naming the first-visited node — the only one on the ancestor stack at
/// the point of the cut.
///
/// Labels are appended verbatim: keys containing `/` or `~` are not
/// escaped per RFC 6901, so pointers built from such keys are ambiguous.
#[must_use]
pub fn json_pointer_resolver(
) -> impl Fn(&Node, Option<&Segment>, &[PathEntry], Option<&Node>) -> Value {
    |node, _label, stack, _parent| {
        let mut pointer = String::from("#");
        for entry in stack {
            if let Some(label) = &entry.label {
                pointer.push('/');
                pointer.push_str(&label.to_string());
            }
            if entry.node.ptr_eq(node) {
                break;
            }
        }
        json!({ "$ref": pointer })
    }
}
