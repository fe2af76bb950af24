//! CLI for comparing Earth-Mover's and Manhattan image retrieval.

mod commands;
mod utils;

use clap::Parser;

use commands::Commands;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The number of threads to use for `--parallel` runs. Defaults to all.
    #[arg(short('t'), long)]
    num_threads: Option<usize>,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = utils::configure_logger(args.command.name())?;
    println!("Log file: {log_path:?}");

    ftlog::info!("{args:?}");

    if let Some(num_threads) = args.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| e.to_string())?;
    }

    match args.command {
        Commands::Evaluate {
            inputs,
            window,
            k,
            out_path,
            parallel,
            manhattan_only,
        } => {
            commands::evaluate::run(&inputs, &window, k, parallel, manhattan_only, &out_path)?;
        }
        Commands::Sweep {
            inputs,
            widths,
            heights,
            k,
            out_path,
            parallel,
        } => commands::sweep::run(&inputs, &widths, &heights, k, parallel, &out_path)?,
    }

    ftlog::info!("Done.");

    Ok(())
}
