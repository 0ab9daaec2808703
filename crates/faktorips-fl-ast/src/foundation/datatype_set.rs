//! Sorted datatype collection that keeps distinct same-named instances.
//!
//! An ordered set keyed by [`compare_datatypes`](super::compare_datatypes)
//! would collapse two datatypes with equal names into one entry. When
//! datatypes are collected from several sources (e.g. two projects each
//! defining a `Gender` enum) both must survive, so membership here is decided
//! by instance identity while iteration order follows the qualified name.
//! Entries with the same name keep their insertion order.

use super::datatype::Datatype;

/// Ordered collection of datatypes with identity-based membership.
#[derive(Debug, Clone, Default)]
pub struct DatatypeSet {
    entries: Vec<Datatype>,
}

impl DatatypeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of entries whose name equals `datatype`'s.
    fn equal_range(&self, datatype: &Datatype) -> std::ops::Range<usize> {
        let start = self.entries.partition_point(|e| e < datatype);
        let end = self.entries.partition_point(|e| e <= datatype);
        start..end
    }

    /// Insert a datatype.
    ///
    /// Returns `false` if this very instance is already present. A distinct
    /// instance with an equal name is kept alongside the existing one.
    pub fn insert(&mut self, datatype: Datatype) -> bool {
        let range = self.equal_range(&datatype);
        if self.entries[range.clone()]
            .iter()
            .any(|e| e.same_instance(&datatype))
        {
            return false;
        }
        self.entries.insert(range.end, datatype);
        true
    }

    /// Whether this instance is present.
    pub fn contains(&self, datatype: &Datatype) -> bool {
        self.entries[self.equal_range(datatype)]
            .iter()
            .any(|e| e.same_instance(datatype))
    }

    /// Whether any instance with this qualified name is present.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.qualified_name() == name)
    }

    /// Remove this instance; returns whether it was present.
    pub fn remove(&mut self, datatype: &Datatype) -> bool {
        let range = self.equal_range(datatype);
        let found = self.entries[range.clone()]
            .iter()
            .position(|e| e.same_instance(datatype));
        match found {
            Some(offset) => {
                self.entries.remove(range.start + offset);
                true
            }
            None => false,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate in qualified-name order.
    pub fn iter(&self) -> std::slice::Iter<'_, Datatype> {
        self.entries.iter()
    }
}

impl Extend<Datatype> for DatatypeSet {
    fn extend<I: IntoIterator<Item = Datatype>>(&mut self, iter: I) {
        for datatype in iter {
            self.insert(datatype);
        }
    }
}

impl FromIterator<Datatype> for DatatypeSet {
    fn from_iter<I: IntoIterator<Item = Datatype>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for DatatypeSet {
    type Item = Datatype;
    type IntoIter = std::vec::IntoIter<Datatype>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a DatatypeSet {
    type Item = &'a Datatype;
    type IntoIter = std::slice::Iter<'a, Datatype>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
