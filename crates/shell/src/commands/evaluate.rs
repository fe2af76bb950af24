//! Score one window shape, or Manhattan alone, and write the report.

use std::path::Path;

use emd_search::EvaluationConfig;

use super::{Inputs, Window};

/// Runs the evaluation and writes the report to `out_path`.
///
/// With `manhattan_only`, EMD is skipped and the images may have any shape.
pub fn run(
    inputs: &Inputs,
    window: &Window,
    k: usize,
    parallel: bool,
    manhattan_only: bool,
    out_path: &Path,
) -> Result<(), String> {
    let (corpus, queries) = inputs.read()?;

    let config = EvaluationConfig::default()
        .with_window(window.width, window.height)
        .with_k(k)
        .with_parallel(parallel);

    let evaluation = if manhattan_only {
        emd_search::evaluate_manhattan(&config, &corpus, &queries)
    } else {
        emd_search::evaluate(&config, &corpus, &queries)
    }
    .map_err(|e| e.to_string())?;

    match evaluation.emd_score() {
        Some(emd) => println!("EMD: {emd:.4}, Manhattan: {:.4}", evaluation.manhattan_score()),
        None => println!("Manhattan: {:.4}", evaluation.manhattan_score()),
    }

    evaluation.write_report(out_path).map_err(|e| e.to_string())?;
    ftlog::info!("Wrote report to {out_path:?}");

    Ok(())
}
