// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Static augmented interval array for overlap and nearest-neighbor
//! queries.
//!
//! Elements are kept in a `Vec` sorted by `(begin, end)`. The array is
//! viewed as an implicit balanced search tree: the node of a slice
//! `[lo, hi)` is the element at `(lo + hi) / 2`, and for every node the
//! largest `end` of its slice is stored. Queries descend this tree and
//! prune slices whose largest end lies at or before the query start, or
//! whose first begin lies at or after the query end.
//!
//! ```
//! use bio_varanno::interval_array::IntervalArray;
//! let array = IntervalArray::new(vec![(1, 5), (3, 8), (10, 12)], |&iv| iv);
//! let res = array.query_point(4);
//! assert_eq!(res.overlapping, vec![&(1, 5), &(3, 8)]);
//! assert_eq!(res.left, None);
//! assert_eq!(res.right, Some(&(10, 12)));
//! let res = array.query_interval(8, 10);
//! assert!(res.overlapping.is_empty());
//! assert_eq!(res.left, Some(&(3, 8)));
//! ```

use std::cmp::max;

#[derive(Debug, Clone)]
struct Entry<T> {
    begin: isize,
    end: isize,
    value: T,
}

/// Result of a query: all overlapping elements in `(begin, end)` order and
/// the closest non-overlapping element on either side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult<'a, T> {
    pub overlapping: Vec<&'a T>,
    /// Among elements ending at or before the query start, the one with the
    /// greatest `(end, begin)`.
    pub left: Option<&'a T>,
    /// Among elements starting at or after the query end, the one with the
    /// smallest `(begin, end)`.
    pub right: Option<&'a T>,
}

/// Immutable collection of half-open intervals `[begin, end)` with payload.
#[derive(Debug, Clone)]
pub struct IntervalArray<T> {
    entries: Vec<Entry<T>>,
    // largest end in the slice whose implicit node sits at this index
    max_end: Vec<isize>,
    // entry indices sorted by (end, begin)
    by_end: Vec<usize>,
}

impl<T> IntervalArray<T> {
    /// Build the array; `extractor` returns the `(begin, end)` of an element.
    pub fn new<I, F>(items: I, extractor: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> (isize, isize),
    {
        let mut entries: Vec<Entry<T>> = items
            .into_iter()
            .map(|value| {
                let (begin, end) = extractor(&value);
                Entry { begin, end, value }
            })
            .collect();
        entries.sort_by_key(|e| (e.begin, e.end));

        let mut max_end = vec![isize::MIN; entries.len()];
        augment_max_end(&entries, &mut max_end, 0, entries.len());

        let mut by_end: Vec<usize> = (0..entries.len()).collect();
        by_end.sort_by_key(|&i| (entries[i].end, entries[i].begin));

        IntervalArray {
            entries,
            max_end,
            by_end,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All elements in `(begin, end)` order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|e| &e.value)
    }

    /// Elements containing the point `pos`, i.e. `begin <= pos < end`.
    pub fn query_point(&self, pos: isize) -> QueryResult<'_, T> {
        self.query_interval(pos, pos + 1)
    }

    /// Elements overlapping `[begin, end)`, i.e. `b < end && begin < e`.
    pub fn query_interval(&self, begin: isize, end: isize) -> QueryResult<'_, T> {
        let mut overlapping = Vec::new();
        self.collect_overlapping(0, self.entries.len(), begin, end, &mut overlapping);
        QueryResult {
            overlapping,
            left: self.left_neighbor(begin),
            right: self.right_neighbor(end),
        }
    }

    fn collect_overlapping<'a>(
        &'a self,
        lo: usize,
        hi: usize,
        begin: isize,
        end: isize,
        res: &mut Vec<&'a T>,
    ) {
        if lo >= hi {
            return;
        }
        let mid = (lo + hi) / 2;
        if self.max_end[mid] <= begin {
            return;
        }
        self.collect_overlapping(lo, mid, begin, end, res);
        let entry = &self.entries[mid];
        if entry.begin < end && begin < entry.end {
            res.push(&entry.value);
        }
        if entry.begin < end {
            self.collect_overlapping(mid + 1, hi, begin, end, res);
        }
    }

    fn left_neighbor(&self, begin: isize) -> Option<&T> {
        let n = self.by_end.partition_point(|&i| self.entries[i].end <= begin);
        n.checked_sub(1)
            .map(|k| &self.entries[self.by_end[k]].value)
    }

    fn right_neighbor(&self, end: isize) -> Option<&T> {
        let n = self.entries.partition_point(|e| e.begin < end);
        self.entries.get(n).map(|e| &e.value)
    }
}

fn augment_max_end<T>(entries: &[Entry<T>], max_end: &mut [isize], lo: usize, hi: usize) -> isize {
    if lo >= hi {
        return isize::MIN;
    }
    let mid = (lo + hi) / 2;
    let left = augment_max_end(entries, max_end, lo, mid);
    let right = augment_max_end(entries, max_end, mid + 1, hi);
    max_end[mid] = max(entries[mid].end, max(left, right));
    max_end[mid]
}
