// SPDX-License-Identifier: GPL-3.0-only

//! Capacity-bounded lists

use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Owned sequence holding at most `N` entries.
///
/// Replaces the `count + T[N]` pairs of the C layouts: the length is the
/// count, and it can never exceed the array it is paired with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<T>",
    into = "Vec<T>",
    bound(serialize = "T: Serialize + Clone", deserialize = "T: Deserialize<'de>")
)]
pub struct BoundedVec<T, const N: usize>(Vec<T>);

impl<T, const N: usize> BoundedVec<T, N> {
    pub const CAPACITY: usize = N;

    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append `item`, failing without modification when the list is full.
    pub fn push(&mut self, item: T) -> Result<(), ModelError> {
        if self.0.len() >= N {
            return Err(ModelError::CapacityExceeded {
                what: "list",
                len: self.0.len() + 1,
                capacity: N,
            });
        }
        self.0.push(item);
        Ok(())
    }

    pub fn is_full(&self) -> bool {
        self.0.len() >= N
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<T> {
        self.0
    }
}

impl<T, const N: usize> Default for BoundedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Deref for BoundedVec<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.0
    }
}

impl<T, const N: usize> TryFrom<Vec<T>> for BoundedVec<T, N> {
    type Error = ModelError;

    fn try_from(items: Vec<T>) -> Result<Self, Self::Error> {
        if items.len() > N {
            return Err(ModelError::CapacityExceeded {
                what: "list",
                len: items.len(),
                capacity: N,
            });
        }
        Ok(Self(items))
    }
}

impl<T, const N: usize> From<BoundedVec<T, N>> for Vec<T> {
    fn from(list: BoundedVec<T, N>) -> Self {
        list.0
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedVec<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<T, const N: usize> IntoIterator for BoundedVec<T, N> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
