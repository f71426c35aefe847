//! Field descriptors and per-document schemas.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Kind of a JSON value, as recorded in a field descriptor.
///
/// Rendered with the names downstream report readers already know:
/// `dict`, `list` and `NoneType` for containers and null.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JsonKind {
    Null,
    Bool,
    Object,
    Float,
    Int,
    Array,
    Str,
}

impl JsonKind {
    /// Kind of a parsed JSON value.
    ///
    /// Numbers that fit `i64` or `u64` are `Int`, everything else is `Float`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Int,
            Value::Number(_) => Self::Float,
            Value::String(_) => Self::Str,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "NoneType",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Str => "str",
            Self::Object => "dict",
            Self::Array => "list",
        }
    }
}

impl fmt::Display for JsonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed schema element: a field path and the kind found there.
///
/// Two descriptors are equal only if both path and kind match, so a path
/// that changes type between documents shows up as two descriptors.
///
/// Descriptors order by their rendered label, byte for byte. Kind names
/// contain no parentheses, so distinct descriptors never share a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    path: String,
    kind: JsonKind,
}

impl FieldDescriptor {
    pub fn new(path: impl Into<String>, kind: JsonKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> JsonKind {
        self.kind
    }

    fn label_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.path
            .bytes()
            .chain(*b" (")
            .chain(self.kind.as_str().bytes())
            .chain(*b")")
    }
}

impl Ord for FieldDescriptor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.label_bytes().cmp(other.label_bytes())
    }
}

impl PartialOrd for FieldDescriptor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.kind)
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// The set of field descriptors extracted from a single document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DocumentSchema {
    fields: BTreeSet<FieldDescriptor>,
}

impl DocumentSchema {
    /// Extract the schema of a whole document.
    pub fn from_value(value: &Value) -> Self {
        Self {
            fields: crate::extract::extract(value, ""),
        }
    }

    pub fn contains(&self, field: &FieldDescriptor) -> bool {
        self.fields.contains(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Rendered descriptors in sorted order.
    pub fn labels(&self) -> Vec<String> {
        self.fields.iter().map(ToString::to_string).collect()
    }
}

/// Whether a fetched document carries nothing worth analyzing: `null`,
/// `false`, zero, an empty string, an empty array or an empty object.
pub fn is_blank_document(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

impl From<BTreeSet<FieldDescriptor>> for DocumentSchema {
    fn from(fields: BTreeSet<FieldDescriptor>) -> Self {
        Self { fields }
    }
}

impl FromIterator<FieldDescriptor> for DocumentSchema {
    fn from_iter<I: IntoIterator<Item = FieldDescriptor>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
