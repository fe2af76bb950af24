//! Evaluating over a grid of window shapes.

use std::{path::Path, time::Instant};

use emd_distances::emd::WindowShape;
use serde::Serialize;

use super::evaluate;
use crate::{Error, EvaluationConfig, LabeledImages};

/// One row of a window-size sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepRow {
    /// The width of the EMD windows.
    pub width: usize,
    /// The height of the EMD windows.
    pub height: usize,
    /// The mean fraction of correct EMD neighbors.
    pub emd_score: f64,
    /// The mean fraction of correct Manhattan neighbors.
    pub manhattan_score: f64,
    /// The EMD score over the Manhattan score, when Manhattan scored above 0.
    pub ratio: Option<f64>,
    /// The wall time of the evaluation, in seconds.
    pub seconds: f64,
}

/// Runs the evaluation for every `(width, height)` pair in the cross product
/// of `widths` and `heights`, in that order.
///
/// Shapes that do not evenly divide the image side are skipped with a
/// warning. Every other field of `base` is kept as is.
///
/// # Errors
///
/// * If the corpus images are not square.
/// * See [`evaluate`].
pub fn sweep(
    widths: &[usize],
    heights: &[usize],
    base: &EvaluationConfig,
    corpus: &LabeledImages,
    queries: &LabeledImages,
) -> Result<Vec<SweepRow>, Error> {
    let (image_rows, image_columns) = corpus.shape();
    let side = corpus.side().ok_or_else(|| {
        Error::Configuration(format!(
            "a window sweep needs square images but the corpus is {image_rows}x{image_columns}"
        ))
    })?;

    let mut rows = Vec::with_capacity(widths.len() * heights.len());

    for &width in widths {
        for &height in heights {
            if let Err(e) = WindowShape::new(width, height, side) {
                ftlog::warn!("Skipping {width}x{height} windows: {e}");
                continue;
            }

            let config = base.with_window(width, height);
            let start = Instant::now();
            let evaluation = evaluate(&config, corpus, queries)?;
            let seconds = start.elapsed().as_secs_f64();

            ftlog::info!("Evaluated {width}x{height} windows in {seconds:.2e} seconds.");

            rows.push(SweepRow {
                width,
                height,
                emd_score: evaluation.emd_score().unwrap_or_default(),
                manhattan_score: evaluation.manhattan_score(),
                ratio: evaluation.ratio(),
                seconds,
            });
        }
    }

    Ok(rows)
}

/// Writes the rows of a sweep to a CSV file with a header line.
///
/// # Errors
///
/// If the file cannot be created or written.
pub fn write_csv<P: AsRef<Path>>(path: P, rows: &[SweepRow]) -> Result<(), Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush().map_err(Error::from)
}
