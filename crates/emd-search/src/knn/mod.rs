//! k-NN search using a linear scan of the corpus.

mod sorted_neighbors;

use rayon::prelude::*;

pub use sorted_neighbors::SortedNeighbors;

use crate::{Error, Metric, ParMetric};

/// Checks that `k` is between 1 and the size of the corpus.
fn check_k(k: usize, corpus_len: usize) -> Result<(), Error> {
    if k == 0 || k > corpus_len {
        Err(Error::Configuration(format!(
            "k = {k} must be between 1 and the corpus size {corpus_len}"
        )))
    } else {
        Ok(())
    }
}

/// Returns the `(index, distance)` pairs of the `k` nearest neighbors of
/// `query` in `corpus`, in increasing order of distance.
///
/// Among neighbors at equal distance, the one with the smaller index comes
/// first and is the one retained when the list is full.
///
/// # Errors
///
/// * If `k` is zero or larger than the corpus.
/// * If any distance computation fails.
pub fn knn_with_distances<I, C, M>(query: &I, corpus: &[C], k: usize, metric: &M) -> Result<Vec<(usize, f64)>, Error>
where
    I: ?Sized,
    C: AsRef<I>,
    M: Metric<I>,
{
    check_k(k, corpus.len())?;
    let mut hits = SortedNeighbors::new(k);
    for (i, item) in corpus.iter().enumerate() {
        hits.push(metric.distance(query, item.as_ref())?, i);
    }
    Ok(hits.into_hits())
}

/// Returns the indices of the `k` nearest neighbors of `query` in `corpus`,
/// in increasing order of distance.
///
/// # Errors
///
/// See [`knn_with_distances`].
pub fn knn<I, C, M>(query: &I, corpus: &[C], k: usize, metric: &M) -> Result<Vec<usize>, Error>
where
    I: ?Sized,
    C: AsRef<I>,
    M: Metric<I>,
{
    knn_with_distances(query, corpus, k, metric).map(|hits| hits.into_iter().map(|(i, _)| i).collect())
}

/// Parallel version of [`knn_with_distances`].
///
/// The distances from the query are computed in parallel and then offered to
/// the neighbor list in corpus order, so the result is identical to the
/// sequential search.
///
/// # Errors
///
/// See [`knn_with_distances`].
pub fn par_knn_with_distances<I, C, M>(
    query: &I,
    corpus: &[C],
    k: usize,
    metric: &M,
) -> Result<Vec<(usize, f64)>, Error>
where
    I: ?Sized + Sync,
    C: AsRef<I> + Sync,
    M: ParMetric<I>,
{
    check_k(k, corpus.len())?;
    let distances = corpus
        .par_iter()
        .map(|item| metric.par_distance(query, item.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(distances
        .into_iter()
        .enumerate()
        .fold(SortedNeighbors::new(k), |mut hits, (i, d)| {
            hits.push(d, i);
            hits
        })
        .into_hits())
}

/// Parallel version of [`knn`].
///
/// # Errors
///
/// See [`knn_with_distances`].
pub fn par_knn<I, C, M>(query: &I, corpus: &[C], k: usize, metric: &M) -> Result<Vec<usize>, Error>
where
    I: ?Sized + Sync,
    C: AsRef<I> + Sync,
    M: ParMetric<I>,
{
    par_knn_with_distances(query, corpus, k, metric).map(|hits| hits.into_iter().map(|(i, _)| i).collect())
}
