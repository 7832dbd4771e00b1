//! Parsed object to settings mapping

use crate::error::{Error, Result};
use crate::object::ObjectReference;
use crate::settings::SettingsMap;
use indexmap::IndexMap;

/// Objects named by one or more directives, each with its settings, in the
/// order they were written.
///
/// An object may appear only once: inserting or merging an object that is
/// already present (by [`ObjectReference`] identity) is a
/// [`Error::DuplicateKey`].
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    objects: IndexMap<ObjectReference, SettingsMap>,
}

impl ParsedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: ObjectReference, settings: SettingsMap) -> Result<()> {
        if self.objects.contains_key(&object) {
            return Err(Error::DuplicateKey {
                key: object.to_string(),
            });
        }
        self.objects.insert(object, settings);
        Ok(())
    }

    /// Merge another document into this one. An object present in both is
    /// a [`Error::DuplicateKey`] and leaves this document unchanged.
    pub fn merge(&mut self, other: ParsedDocument) -> Result<()> {
        if let Some(object) = other.objects().find(|object| self.contains(object)) {
            return Err(Error::DuplicateKey {
                key: object.to_string(),
            });
        }
        self.objects.extend(other.objects);
        Ok(())
    }

    pub fn get(&self, object: &ObjectReference) -> Option<&SettingsMap> {
        self.objects.get(object)
    }

    pub fn contains(&self, object: &ObjectReference) -> bool {
        self.objects.contains_key(object)
    }

    pub fn objects(&self) -> impl Iterator<Item = &ObjectReference> {
        self.objects.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectReference, &SettingsMap)> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl PartialEq for ParsedDocument {
    fn eq(&self, other: &Self) -> bool {
        self.objects.iter().eq(other.objects.iter())
    }
}

impl IntoIterator for ParsedDocument {
    type Item = (ObjectReference, SettingsMap);
    type IntoIter = indexmap::map::IntoIter<ObjectReference, SettingsMap>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_merge_leaves_document_unchanged() {
        let mut target = ParsedDocument::new();
        target
            .insert(ObjectReference::inline("b();").named("b"), SettingsMap::new())
            .unwrap();
        let mut other = ParsedDocument::new();
        other
            .insert(ObjectReference::inline("a();").named("a"), SettingsMap::new())
            .unwrap();
        other
            .insert(ObjectReference::inline("other();").named("b"), SettingsMap::new())
            .unwrap();

        assert!(matches!(target.merge(other), Err(Error::DuplicateKey { .. })));
        assert_eq!(target.len(), 1);
        assert!(!target.contains(&ObjectReference::inline("a();").named("a")));
    }
}
