//! Decycle - safe serialization pre-pass for cyclic object graphs
//!
//! Decycle rewrites a shared, possibly self-referential object graph into
//! an equivalent acyclic `serde_json::Value`, replacing every reference
//! back to an ancestor with a sentinel marker (or a caller-supplied
//! replacement), so a standard recursive text encoder can render it
//! without risk of non-termination. Repeated references that are not
//! ancestors are serialized independently and in full.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod decycler;
pub mod node;
pub mod resolver;
pub mod stringify;

// Re-export commonly used types
pub use decycler::{decycle, decycle_with, PathEntry, Segment, CIRCULAR_MARKER};
pub use node::{ArrayRef, Node, ObjectRef, ToJson};
pub use resolver::json_pointer_resolver;
pub use stringify::{stringify, stringify_with};
