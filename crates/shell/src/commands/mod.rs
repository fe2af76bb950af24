//! The commands under the `emd` CLI.

pub mod evaluate;
pub mod sweep;

use std::path::PathBuf;

use clap::Subcommand;

/// The image and label files of the corpus and the queries.
#[derive(clap::Args, Debug)]
pub struct Inputs {
    /// The path to the IDX file of corpus images.
    #[arg(short('d'), long)]
    pub data: PathBuf,

    /// The path to the IDX file of query images.
    #[arg(short('q'), long)]
    pub queries: PathBuf,

    /// The path to the IDX file of corpus labels.
    #[arg(long, visible_alias("l1"))]
    pub data_labels: PathBuf,

    /// The path to the IDX file of query labels.
    #[arg(long, visible_alias("l2"))]
    pub query_labels: PathBuf,
}

/// The shape of the EMD windows.
#[derive(clap::Args, Debug)]
pub struct Window {
    /// The width of each window, in pixels.
    #[arg(long, default_value_t = 7)]
    pub width: usize,

    /// The height of each window, in pixels.
    #[arg(long, default_value_t = 7)]
    pub height: usize,
}

/// The subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score k-NN retrieval under EMD and Manhattan for one window shape.
    Evaluate {
        #[command(flatten)]
        inputs: Inputs,

        #[command(flatten)]
        window: Window,

        /// The number of neighbors to retrieve for each query.
        #[arg(short('k'), long, default_value_t = 10)]
        k: usize,

        /// The path to the output report.
        #[arg(short('o'), long)]
        out_path: PathBuf,

        /// Whether to search in parallel.
        #[arg(short('p'), long, default_value_t = false)]
        parallel: bool,

        /// Score only the Manhattan metric. Images need not be square.
        #[arg(long, default_value_t = false)]
        manhattan_only: bool,
    },
    /// Score k-NN retrieval over a grid of window shapes.
    Sweep {
        #[command(flatten)]
        inputs: Inputs,

        /// The window widths to try.
        #[arg(long, value_delimiter = ',', default_value = "28,14,7")]
        widths: Vec<usize>,

        /// The window heights to try.
        #[arg(long, value_delimiter = ',', default_value = "28,14,7")]
        heights: Vec<usize>,

        /// The number of neighbors to retrieve for each query.
        #[arg(short('k'), long, default_value_t = 10)]
        k: usize,

        /// The path to the output CSV file.
        #[arg(short('o'), long)]
        out_path: PathBuf,

        /// Whether to search in parallel.
        #[arg(short('p'), long, default_value_t = false)]
        parallel: bool,
    },
}

impl Commands {
    /// The name of the log file for the command.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Evaluate { .. } => "emd-evaluate",
            Self::Sweep { .. } => "emd-sweep",
        }
    }
}

impl Inputs {
    /// Reads the corpus and the queries.
    pub fn read(&self) -> Result<(emd_search::LabeledImages, emd_search::LabeledImages), String> {
        let corpus = emd_search::LabeledImages::read(&self.data, &self.data_labels).map_err(|e| e.to_string())?;
        let (rows, columns) = corpus.shape();
        ftlog::info!("Read {} corpus images of {rows}x{columns} pixels.", corpus.len());

        let queries =
            emd_search::LabeledImages::read(&self.queries, &self.query_labels).map_err(|e| e.to_string())?;
        let (rows, columns) = queries.shape();
        ftlog::info!("Read {} query images of {rows}x{columns} pixels.", queries.len());

        Ok((corpus, queries))
    }
}
