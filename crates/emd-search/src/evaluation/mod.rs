//! Scoring Earth-Mover's and Manhattan retrieval against class labels.

mod sweep;

use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;

pub use sweep::{sweep, write_csv, SweepRow};

use crate::{
    knn::{knn, par_knn},
    EarthMovers, Error, EvaluationConfig, LabeledImages, Manhattan, ParMetric,
};

/// The outcome of running every query against the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// The `(width, height)` of the EMD windows, or `None` if only the
    /// Manhattan metric was run.
    pub window: Option<(usize, usize)>,
    /// The number of neighbors retrieved per query.
    pub k: usize,
    /// The number of queries.
    pub queries: usize,
    /// The sum over queries of the fraction of EMD neighbors in the query's
    /// class, if EMD was run.
    pub emd_total: Option<f64>,
    /// The sum over queries of the fraction of Manhattan neighbors in the
    /// query's class.
    pub manhattan_total: f64,
}

impl Evaluation {
    /// The mean fraction of correct EMD neighbors per query, if EMD was run.
    #[must_use]
    pub fn emd_score(&self) -> Option<f64> {
        self.emd_total.map(|total| mean(total, self.queries))
    }

    /// The mean fraction of correct Manhattan neighbors per query.
    #[must_use]
    pub fn manhattan_score(&self) -> f64 {
        mean(self.manhattan_total, self.queries)
    }

    /// The EMD score divided by the Manhattan score, or `None` if EMD was not
    /// run or Manhattan scored zero.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        let manhattan = self.manhattan_score();
        self.emd_score()
            .filter(|_| manhattan > 0.0)
            .map(|emd| emd / manhattan)
    }

    /// Writes the accuracy report, one line per metric that was run.
    ///
    /// # Errors
    ///
    /// If the file cannot be written.
    pub fn write_report<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let mut report = String::new();
        if let Some(emd) = self.emd_score() {
            report.push_str(&format!("Average Correct Search Results EMD: {emd}\n"));
        }
        report.push_str(&format!(
            "Average Correct Search Results Manhattan: {}\n",
            self.manhattan_score()
        ));
        std::fs::write(path, report).map_err(Error::from)
    }
}

/// Divides `total` by `count`, with an empty count giving zero.
#[allow(clippy::cast_precision_loss)]
fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// The fraction of `neighbors` whose label in `labels` is `class`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn correct_fraction(neighbors: &[usize], labels: &[u8], class: u8) -> f64 {
    if neighbors.is_empty() {
        return 0.0;
    }
    let correct = neighbors
        .iter()
        .filter(|&&i| labels.get(i).is_some_and(|&label| label == class))
        .count();
    correct as f64 / neighbors.len() as f64
}

/// Retrieves the neighbors of one query, in parallel over the corpus when the
/// metric is expensive and `parallel` is set.
fn neighbors<M: ParMetric<[u8]>>(
    metric: &M,
    query: &[u8],
    corpus: &[Vec<u8>],
    k: usize,
    parallel: bool,
) -> Result<Vec<usize>, Error> {
    if parallel && metric.is_expensive() {
        par_knn(query, corpus, k, metric)
    } else {
        knn(query, corpus, k, metric)
    }
}

/// Checks that the queries have the same image shape as the corpus.
fn check_shapes(corpus: &LabeledImages, queries: &LabeledImages) -> Result<(), Error> {
    if queries.is_empty() || queries.shape() == corpus.shape() {
        Ok(())
    } else {
        Err(Error::Shape {
            expected: corpus.images().num_pixels(),
            actual: queries.images().num_pixels(),
        })
    }
}

/// Runs every query against the corpus with the Manhattan metric, and with
/// `emd` if given, and returns the summed per-query scores of each.
fn score_queries(
    emd: Option<&EarthMovers>,
    config: &EvaluationConfig,
    corpus: &LabeledImages,
    queries: &LabeledImages,
) -> Result<(Option<f64>, f64), Error> {
    let data = corpus.images().images();
    let labels = corpus.labels();

    let score = |(q, (query, &class)): (usize, (&[u8], &u8))| -> Result<(Option<f64>, f64), Error> {
        let emd_score = emd
            .map(|emd| neighbors(emd, query, data, config.k, config.parallel))
            .transpose()?
            .map(|hits| correct_fraction(&hits, labels, class));
        let manhattan_hits = neighbors(&Manhattan, query, data, config.k, config.parallel)?;
        let manhattan_score = correct_fraction(&manhattan_hits, labels, class);
        match emd_score {
            Some(e) => {
                ftlog::debug!("Query {q} (class {class}): EMD {e:.3}, Manhattan {manhattan_score:.3}");
            }
            None => {
                ftlog::debug!("Query {q} (class {class}): Manhattan {manhattan_score:.3}");
            }
        }
        Ok((emd_score, manhattan_score))
    };

    let scores = if config.parallel {
        queries
            .images()
            .images()
            .par_iter()
            .map(Vec::as_slice)
            .zip(queries.labels().par_iter())
            .enumerate()
            .map(score)
            .collect::<Result<Vec<_>, _>>()?
    } else {
        queries
            .images()
            .iter()
            .zip(queries.labels())
            .enumerate()
            .map(score)
            .collect::<Result<Vec<_>, _>>()?
    };

    let initial = (emd.map(|_| 0.0), 0.0);
    Ok(scores.into_iter().fold(initial, |(e, m), (qe, qm)| {
        (e.zip(qe).map(|(e, qe)| e + qe), m + qm)
    }))
}

/// Runs every query against the corpus with both the Earth-Mover's and the
/// Manhattan metric, and scores each retrieved neighbor list by the fraction
/// of neighbors that share the query's label.
///
/// Configuration errors are raised before any distance is computed. The
/// first failing distance computation aborts the whole run.
///
/// # Errors
///
/// * If the corpus images are not square.
/// * If the configuration is invalid for the corpus.
/// * If the queries and the corpus have different image shapes.
/// * If any distance computation fails.
pub fn evaluate(
    config: &EvaluationConfig,
    corpus: &LabeledImages,
    queries: &LabeledImages,
) -> Result<Evaluation, Error> {
    let (rows, columns) = corpus.shape();
    let side = corpus.side().ok_or_else(|| {
        Error::Configuration(format!(
            "EMD windows need square images but the corpus is {rows}x{columns}; use `evaluate_manhattan`"
        ))
    })?;
    let shape = config.validate(corpus.len(), side)?;
    check_shapes(corpus, queries)?;

    ftlog::info!(
        "Evaluating {} queries against {} images with k = {} and {}x{} windows ...",
        queries.len(),
        corpus.len(),
        config.k,
        shape.width(),
        shape.height()
    );

    let emd = EarthMovers::new(shape).with_goal_mass(config.goal_mass);
    let (emd_total, manhattan_total) = score_queries(Some(&emd), config, corpus, queries)?;

    let evaluation = Evaluation {
        window: Some((shape.width(), shape.height())),
        k: config.k,
        queries: queries.len(),
        emd_total,
        manhattan_total,
    };
    ftlog::info!(
        "Scores with {}x{} windows: EMD {:.4}, Manhattan {:.4}",
        shape.width(),
        shape.height(),
        evaluation.emd_score().unwrap_or_default(),
        evaluation.manhattan_score()
    );

    Ok(evaluation)
}

/// Runs every query against the corpus with the Manhattan metric alone.
///
/// Unlike [`evaluate`], this works for images of any shape, such as rows of
/// values written back from a reduced space. The window fields of `config`
/// are ignored.
///
/// # Errors
///
/// * If `k` is zero or larger than the corpus.
/// * If the queries and the corpus have different image shapes.
/// * If any distance computation fails.
pub fn evaluate_manhattan(
    config: &EvaluationConfig,
    corpus: &LabeledImages,
    queries: &LabeledImages,
) -> Result<Evaluation, Error> {
    config.validate_k(corpus.len())?;
    check_shapes(corpus, queries)?;

    let (rows, columns) = corpus.shape();
    ftlog::info!(
        "Evaluating {} queries against {} images of {rows}x{columns} pixels with k = {} ...",
        queries.len(),
        corpus.len(),
        config.k
    );

    let (_, manhattan_total) = score_queries(None, config, corpus, queries)?;
    let evaluation = Evaluation {
        window: None,
        k: config.k,
        queries: queries.len(),
        emd_total: None,
        manhattan_total,
    };
    ftlog::info!("Manhattan score: {:.4}", evaluation.manhattan_score());

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;

    use super::{correct_fraction, Evaluation};

    #[test]
    fn fraction_of_matching_labels() {
        let labels = [0, 1, 1, 2, 1];
        assert!(approx_eq!(f64, correct_fraction(&[1, 2, 4], &labels, 1), 1.0));
        assert!(approx_eq!(f64, correct_fraction(&[0, 1, 3, 4], &labels, 1), 0.5));
        assert!(approx_eq!(f64, correct_fraction(&[0, 3], &labels, 1), 0.0));
    }

    #[test]
    fn scores_are_means_over_queries() {
        let evaluation = Evaluation {
            window: Some((7, 7)),
            k: 10,
            queries: 4,
            emd_total: Some(3.0),
            manhattan_total: 2.0,
        };
        assert!(approx_eq!(f64, evaluation.emd_score().unwrap_or_default(), 0.75));
        assert!(approx_eq!(f64, evaluation.manhattan_score(), 0.5));
        assert!(approx_eq!(f64, evaluation.ratio().unwrap_or_default(), 1.5));

        let evaluation = Evaluation {
            manhattan_total: 0.0,
            ..evaluation
        };
        assert_eq!(evaluation.ratio(), None);
    }

    #[test]
    fn manhattan_only_has_no_emd_score() {
        let evaluation = Evaluation {
            window: None,
            k: 3,
            queries: 2,
            emd_total: None,
            manhattan_total: 1.0,
        };
        assert_eq!(evaluation.emd_score(), None);
        assert_eq!(evaluation.ratio(), None);
        assert!(approx_eq!(f64, evaluation.manhattan_score(), 0.5));
    }
}
