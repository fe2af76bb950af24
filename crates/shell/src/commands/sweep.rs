//! Score every window shape in a grid and write the results as CSV.

use std::path::Path;

use emd_search::{evaluation, EvaluationConfig};

use super::Inputs;

/// Runs the sweep and writes one CSV row per window shape to `out_path`.
pub fn run(
    inputs: &Inputs,
    widths: &[usize],
    heights: &[usize],
    k: usize,
    parallel: bool,
    out_path: &Path,
) -> Result<(), String> {
    let (corpus, queries) = inputs.read()?;

    let base = EvaluationConfig::default().with_k(k).with_parallel(parallel);
    let rows = evaluation::sweep(widths, heights, &base, &corpus, &queries).map_err(|e| e.to_string())?;

    for row in &rows {
        println!(
            "{}x{}: EMD {:.4}, Manhattan {:.4}, {:.2e} s",
            row.width, row.height, row.emd_score, row.manhattan_score, row.seconds
        );
    }

    evaluation::write_csv(out_path, &rows).map_err(|e| e.to_string())?;
    ftlog::info!("Wrote {} rows to {out_path:?}", rows.len());

    Ok(())
}
