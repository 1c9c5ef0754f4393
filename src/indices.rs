//! Data structures to hold dataset positions that may be either `u16` or `u32` to save space.

use std::cmp::Ordering;

/// Datasets below this many points store their positions as `u16`.
const U16_MAX_ITEMS: usize = 65536;

/// An owned buffer of dataset positions that may be either `u16` or `u32`.
///
/// Inside a tree this buffer is the permutation that places every node's index subset in one
/// contiguous run.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedIndices {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl OwnedIndices {
    /// The identity permutation `0..num_items`.
    ///
    /// The caller guarantees `num_items <= u32::MAX + 1`.
    pub fn identity(num_items: usize) -> Self {
        if num_items < U16_MAX_ITEMS {
            Self::U16((0..num_items as u32).map(|i| i as u16).collect())
        } else {
            Self::U32((0..num_items as u64).map(|i| i as u32).collect())
        }
    }

    pub fn as_ref(&self) -> Indices<'_> {
        match self {
            Self::U16(arr) => Indices::U16(arr),
            Self::U32(arr) => Indices::U32(arr),
        }
    }

    pub fn as_mut(&mut self) -> MutableIndices<'_> {
        match self {
            Self::U16(arr) => MutableIndices::U16(arr),
            Self::U32(arr) => MutableIndices::U32(arr),
        }
    }
}

/// A mutable slice of indices that may be either `u16` or `u32`.
#[derive(Debug)]
pub enum MutableIndices<'a> {
    U16(&'a mut [u16]),
    U32(&'a mut [u32]),
}

impl MutableIndices<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::U16(arr) => arr.len(),
            Self::U32(arr) => arr.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> usize {
        match self {
            Self::U16(arr) => arr[index] as usize,
            Self::U32(arr) => arr[index] as usize,
        }
    }

    /// Reborrow the positions `start..end`.
    pub fn slice_mut(&mut self, start: usize, end: usize) -> MutableIndices<'_> {
        match self {
            Self::U16(arr) => MutableIndices::U16(&mut arr[start..end]),
            Self::U32(arr) => MutableIndices::U32(&mut arr[start..end]),
        }
    }

    /// Sort the stored dataset positions with a comparator over those positions.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(usize, usize) -> Ordering,
    {
        match self {
            Self::U16(arr) => arr.sort_unstable_by(|&a, &b| compare(a as usize, b as usize)),
            Self::U32(arr) => arr.sort_unstable_by(|&a, &b| compare(a as usize, b as usize)),
        }
    }
}

/// A slice of indices that may be either `u16` or `u32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Indices<'a> {
    U16(&'a [u16]),
    U32(&'a [u32]),
}

impl<'a> Indices<'a> {
    pub fn len(&self) -> usize {
        match self {
            Self::U16(arr) => arr.len(),
            Self::U32(arr) => arr.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn get(&self, index: usize) -> usize {
        match self {
            Self::U16(arr) => arr[index] as usize,
            Self::U32(arr) => arr[index] as usize,
        }
    }

    /// The positions `start..end` of this slice.
    pub fn slice(&self, start: usize, end: usize) -> Indices<'a> {
        match *self {
            Self::U16(arr) => Indices::U16(&arr[start..end]),
            Self::U32(arr) => Indices::U32(&arr[start..end]),
        }
    }

    /// Iterate over the stored dataset positions.
    pub fn iter(&self) -> impl Iterator<Item = usize> + 'a {
        let this = *self;
        (0..this.len()).map(move |i| this.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_datasets_use_u16() {
        let indices = OwnedIndices::identity(10);
        assert!(matches!(indices, OwnedIndices::U16(_)));
        let order: Vec<usize> = indices.as_ref().iter().collect();
        assert_eq!(order, (0..10).collect::<Vec<usize>>());
    }

    #[test]
    fn large_datasets_use_u32() {
        let indices = OwnedIndices::identity(U16_MAX_ITEMS);
        assert!(matches!(indices, OwnedIndices::U32(_)));
        assert_eq!(indices.as_ref().get(U16_MAX_ITEMS - 1), U16_MAX_ITEMS - 1);
    }

    #[test]
    fn sorts_a_sub_slice_only() {
        let mut indices = OwnedIndices::identity(6);
        let keys = [5, 4, 3, 2, 1, 0];
        indices
            .as_mut()
            .slice_mut(2, 5)
            .sort_by(|a, b| keys[a].cmp(&keys[b]));
        let order: Vec<usize> = indices.as_ref().iter().collect();
        assert_eq!(order, vec![0, 1, 4, 3, 2, 5]);
        assert_eq!(indices.as_ref().slice(2, 5).len(), 3);
    }
}
