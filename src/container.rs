//! Stable-id entity registry
//!
//! glTF refers to entities by their position in top-level arrays, while the
//! document model refers to them by string ids that survive edits.
//! [`IndexedContainer`] keeps both views consistent: elements are stored in
//! insertion order (the positional index used on the wire) and an id map
//! gives O(1) lookup in the other direction. Elements are never reordered or
//! renumbered once inserted.

use std::collections::HashMap;

use crate::error::{Error, Result};

/// An entity that carries a stable string id
pub trait Identified {
    /// The entity id
    fn id(&self) -> &str;

    /// Replace the entity id
    ///
    /// Only called by the container while appending an entity, before it is
    /// indexed.
    fn set_id(&mut self, id: String);
}

/// What to do when an entity with an empty id is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendIdPolicy {
    /// Reject the entity with [`Error::EmptyId`]
    #[default]
    ThrowOnEmpty,
    /// Assign the next unused decimal ordinal, starting at the current size
    GenerateOnEmpty,
}

/// Ordered registry of entities addressable both by id and by position
#[derive(Debug, Clone)]
pub struct IndexedContainer<T> {
    elements: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for IndexedContainer<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Identified> IndexedContainer<T> {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity and return a reference to the stored element
    ///
    /// # Errors
    ///
    /// * [`Error::DuplicateId`] if an element with the same id exists
    /// * [`Error::EmptyId`] if the id is empty and `policy` is
    ///   [`AppendIdPolicy::ThrowOnEmpty`]
    pub fn append(&mut self, mut element: T, policy: AppendIdPolicy) -> Result<&T> {
        if element.id().is_empty() {
            match policy {
                AppendIdPolicy::ThrowOnEmpty => return Err(Error::EmptyId),
                AppendIdPolicy::GenerateOnEmpty => {
                    let id = self.next_free_id();
                    element.set_id(id);
                }
            }
        }

        if self.index.contains_key(element.id()) {
            return Err(Error::DuplicateId(element.id().to_string()));
        }

        let position = self.elements.len();
        self.index.insert(element.id().to_string(), position);
        self.elements.push(element);
        Ok(&self.elements[position])
    }

    fn next_free_id(&self) -> String {
        let mut ordinal = self.elements.len();
        loop {
            let candidate = ordinal.to_string();
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
            ordinal += 1;
        }
    }

    /// Look up an element by id
    pub fn get(&self, id: &str) -> Result<&T> {
        let position = self.index_of(id)?;
        Ok(&self.elements[position])
    }

    /// Look up an element by id for modification
    ///
    /// The id itself must not be changed through the returned reference.
    pub fn get_mut(&mut self, id: &str) -> Result<&mut T> {
        let position = self.index_of(id)?;
        Ok(&mut self.elements[position])
    }

    /// Positional index of the element with the given id
    pub fn index_of(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Whether an element with the given id exists
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }
}

impl<T> IndexedContainer<T> {
    /// Element at a positional index
    pub fn get_at(&self, position: usize) -> Option<&T> {
        self.elements.get(position)
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the container holds no elements
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements in positional order
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Iterate over elements in positional order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    // Ids stay fixed, so exposing elements mutably keeps the index valid as
    // long as callers leave `id` alone.
    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for IndexedContainer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<'a, T> IntoIterator for &'a IndexedContainer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
