//! Shared value domain for cycle-safe serialization
//!
//! Plain Rust data cannot form reference cycles, so graphs that need
//! decycling are built from `Node`s: scalars plus `Rc`-shared containers
//! with interior mutability. Two handles to the same container compare
//! identical by pointer, which is the identity the walker uses to tell a
//! genuine cycle from a harmless repeated reference.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::{Number, Value};

/// A shared, insertion-ordered sequence of child nodes.
pub type ArrayRef = Rc<RefCell<Vec<Node>>>;

/// A shared, insertion-ordered mapping with unique keys.
pub type ObjectRef = Rc<RefCell<Vec<(String, Node)>>>;

/// Capability for a node to produce its own serializable representation.
///
/// When the walker reaches a [`Node::Custom`] it calls [`ToJson::to_json`]
/// with no arguments and continues with the returned value instead of the
/// node itself. The hook is invoked once per visit, after the cycle check
/// for that position, and its result is computed fresh on every visit.
///
/// Hooks may mutate shared state (through `RefCell` handles they hold);
/// the walker observes such mutations on later visits but does not prevent
/// them.
pub trait ToJson {
    /// Produce the representation to serialize in place of this node.
    fn to_json(&self) -> Node;
}

/// One value in a possibly self-referential object graph.
///
/// Scalars are owned copies; `Array` and `Object` are `Rc`-shared so the
/// same container can appear in several positions, including inside
/// itself. `Custom` wraps a [`ToJson`] hook. Cloning a `Node` clones the
/// handle, not the container.
#[derive(Clone)]
pub enum Node {
    /// The JSON null value.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// A numeric scalar.
    Number(Number),
    /// A string scalar.
    String(String),
    /// A shared ordered sequence.
    Array(ArrayRef),
    /// A shared key-ordered mapping with unique keys.
    Object(ObjectRef),
    /// A node that produces its own representation via [`ToJson`].
    Custom(Rc<dyn ToJson>),
}

impl Node {
    /// Create a new, empty shared array.
    #[must_use]
    pub fn array() -> Self {
        Self::Array(Rc::new(RefCell::new(Vec::new())))
    }

    /// Create a new, empty shared object.
    #[must_use]
    pub fn object() -> Self {
        Self::Object(Rc::new(RefCell::new(Vec::new())))
    }

    /// Wrap a custom serialization hook as a node.
    #[must_use]
    pub fn custom<H: ToJson + 'static>(hook: H) -> Self {
        Self::Custom(Rc::new(hook))
    }

    /// Append a value to an array node.
    ///
    /// Panics if `self` is not an array; pushing into a scalar or object
    /// is a construction bug, not a runtime condition.
    pub fn push(&self, value: impl Into<Self>) {
        match self {
            Self::Array(items) => items.borrow_mut().push(value.into()),
            other => panic!("push on non-array node {other:?}"),
        }
    }

    /// Insert or replace a key in an object node.
    ///
    /// An existing key keeps its position and gets the new value, so keys
    /// stay unique and insertion order is preserved. Panics if `self` is
    /// not an object.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Self>) {
        match self {
            Self::Object(entries) => {
                let key = key.into();
                let value = value.into();
                let mut entries = entries.borrow_mut();
                if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
                    entry.1 = value;
                } else {
                    entries.push((key, value));
                }
            }
            other => panic!("set on non-object node {other:?}"),
        }
    }

    /// Look up a key in an object node, returning a clone of the handle.
    ///
    /// Returns `None` for missing keys and for non-object nodes.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Self> {
        match self {
            Self::Object(entries) => entries
                .borrow()
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone()),
            _ => None,
        }
    }

    /// Whether this node is a container (array or object).
    #[must_use]
    pub const fn is_container(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Object(_))
    }

    /// Identity comparison: do both handles refer to the same allocation?
    ///
    /// This is reference identity, never value equality — two deeply equal
    /// but separately allocated containers are distinct, and scalars have
    /// no identity at all (always `false`).
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Array(a), Self::Array(b)) => Rc::ptr_eq(a, b),
            (Self::Object(a), Self::Object(b)) => Rc::ptr_eq(a, b),
            // Compare data pointers only; the vtable part of the fat
            // pointer is not part of a hook's identity.
            (Self::Custom(a), Self::Custom(b)) => {
                Rc::as_ptr(a).cast::<u8>() == Rc::as_ptr(b).cast::<u8>()
            }
            _ => false,
        }
    }
}

// Shallow by design: a cyclic node graph must still be printable.
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(b) => write!(f, "Bool({b})"),
            Self::Number(n) => write!(f, "Number({n})"),
            Self::String(s) => write!(f, "String({s:?})"),
            Self::Array(items) => {
                write!(f, "Array(len={}, at={:p})", items.borrow().len(), Rc::as_ptr(items))
            }
            Self::Object(entries) => write!(
                f,
                "Object(len={}, at={:p})",
                entries.borrow().len(),
                Rc::as_ptr(entries)
            ),
            Self::Custom(hook) => write!(f, "Custom(at={:p})", Rc::as_ptr(hook).cast::<u8>()),
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<f64> for Node {
    /// Non-finite values become `Null`, matching what the downstream JSON
    /// encoder produces for them.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<Number> for Node {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Value> for Node {
    /// Deep conversion from an (always acyclic) `serde_json` tree into a
    /// freshly allocated node graph.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => {
                let array = Self::array();
                for item in items {
                    array.push(Self::from(item));
                }
                array
            }
            Value::Object(map) => {
                let object = Self::object();
                for (key, item) in map {
                    object.set(key, Self::from(item));
                }
                object
            }
        }
    }
}
