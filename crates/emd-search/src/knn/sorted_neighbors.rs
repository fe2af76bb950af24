//! A bounded, sorted collection of the nearest neighbors seen so far.

use core::cmp::Ordering;

/// The `k` nearest neighbors seen so far, sorted by increasing distance.
///
/// Candidates are offered in corpus order. While fewer than `k` neighbors are
/// held, every candidate is inserted. Once `k` are held, a candidate replaces
/// the current worst neighbor only if it is strictly closer. A candidate is
/// always inserted after any neighbors at the same distance, so among equal
/// distances the neighbor offered first stays first.
#[derive(Debug, Clone)]
pub struct SortedNeighbors {
    /// The `(distance, index)` records, sorted by distance.
    items: Vec<(f64, usize)>,
    /// The maximum number of records.
    k: usize,
}

impl SortedNeighbors {
    /// Creates an empty collection that holds at most `k` neighbors.
    #[must_use]
    pub fn new(k: usize) -> Self {
        Self {
            items: Vec::with_capacity(k + 1),
            k,
        }
    }

    /// The maximum number of neighbors held.
    #[must_use]
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Offers a candidate and returns whether it was kept.
    pub fn push(&mut self, distance: f64, index: usize) -> bool {
        if self.items.len() < self.k {
            self.insert(distance, index);
            true
        } else if self.worst().is_some_and(|worst| distance < worst) {
            self.items.pop();
            self.insert(distance, index);
            true
        } else {
            false
        }
    }

    /// Inserts a record after every record with a distance that is not
    /// greater than `distance`.
    fn insert(&mut self, distance: f64, index: usize) {
        let position = self
            .items
            .partition_point(|(d, _)| d.total_cmp(&distance) != Ordering::Greater);
        self.items.insert(position, (distance, index));
    }

    /// The distance of the farthest neighbor held.
    #[must_use]
    pub fn worst(&self) -> Option<f64> {
        self.items.last().map(|&(d, _)| d)
    }

    /// The number of neighbors held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no neighbors are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `k` neighbors are held.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() == self.k
    }

    /// The `(distance, index)` records in increasing order of distance.
    #[must_use]
    pub fn items(&self) -> &[(f64, usize)] {
        &self.items
    }

    /// The indices of the neighbors in increasing order of distance.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        self.items.iter().map(|&(_, i)| i).collect()
    }

    /// Consumes the collection and returns `(index, distance)` pairs in
    /// increasing order of distance.
    #[must_use]
    pub fn into_hits(self) -> Vec<(usize, f64)> {
        self.items.into_iter().map(|(d, i)| (i, d)).collect()
    }
}
