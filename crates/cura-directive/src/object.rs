//! Object references and their identity rule

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Where an object's geometry comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// OpenSCAD source rendered from the file itself (`'cube(10);'`).
    Inline,
    /// An external mesh file (`FILE 'bracket.stl'`).
    File,
}

impl ObjectKind {
    /// Short label used when an unnamed reference is displayed.
    pub fn label(self) -> &'static str {
        match self {
            Self::Inline => "scad",
            Self::File => "stl",
        }
    }
}

/// One mesh named by a directive.
///
/// Identity is not structural equality:
/// - two references with non-empty names are the same object iff the names
///   are equal, whatever their kind or source;
/// - two unnamed references are the same object iff kind and source match;
/// - a named and an unnamed reference are never the same object.
///
/// `Hash` follows the same rule (name when present, else kind and source).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectReference {
    kind: ObjectKind,
    source: String,
    #[serde(default)]
    name: String,
}

impl ObjectReference {
    pub fn new(kind: ObjectKind, source: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
            name: name.into(),
        }
    }

    /// Unnamed inline reference.
    pub fn inline(source: impl Into<String>) -> Self {
        Self::new(ObjectKind::Inline, source, "")
    }

    /// Unnamed file-linked reference.
    pub fn file(source: impl Into<String>) -> Self {
        Self::new(ObjectKind::File, source, "")
    }

    /// The same reference with an alias.
    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The alias, empty when the reference is unnamed.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

impl PartialEq for ObjectReference {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_named(), other.is_named()) {
            (true, true) => self.name == other.name,
            (false, false) => self.kind == other.kind && self.source == other.source,
            _ => false,
        }
    }
}

impl Eq for ObjectReference {}

impl Hash for ObjectReference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_named() {
            self.name.hash(state);
        } else {
            self.kind.hash(state);
            self.source.hash(state);
        }
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_named() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}:'{}'", self.kind.label(), self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(object: &ObjectReference) -> u64 {
        let mut hasher = DefaultHasher::new();
        object.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn named_references_hash_by_name() {
        let a = ObjectReference::inline("cube(1);").named("part");
        let b = ObjectReference::file("part.stl").named("part");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn display_uses_name_or_kind_and_source() {
        assert_eq!(ObjectReference::inline("gear();").to_string(), "scad:'gear();'");
        assert_eq!(ObjectReference::file("b.stl").to_string(), "stl:'b.stl'");
        assert_eq!(ObjectReference::file("b.stl").named("base").to_string(), "base");
    }
}
