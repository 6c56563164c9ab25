//! Demo binary: walks a loader over `0..n` and prints k-fold splits.

use clap::Parser;
use log::info;

use rustyloader::data::{DataLoader, Dataset, KFold, SamplerConfig, VecDataset};

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "rustyloader: dataset sampling and k-fold demo", long_about = None)]
struct Args {
    /// Number of samples in the demo dataset
    #[arg(short, long, default_value_t = 10)]
    n: usize,

    /// Number of folds for the k-fold split
    #[arg(short, long, default_value_t = 3)]
    folds: usize,

    /// Keep the k-fold indices in permuted order
    #[arg(short, long)]
    shuffle: bool,

    /// Fixed seed for the k-fold split
    #[arg(long)]
    seed: Option<u64>,

    /// Sampler as JSON, e.g. '{"kind": "batch", "batch_size": 3}'
    #[arg(long, default_value = r#"{"kind": "sequential"}"#)]
    sampler: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let dataset: VecDataset<usize> = (0..args.n).collect();
    let sampler = SamplerConfig::from_json(&args.sampler)?.build(dataset.len())?;

    let mut loader = DataLoader::with_sampler(&dataset, sampler.as_ref());
    info!(
        "iterating {} steps with batch size {}",
        loader.num_batches(),
        loader.batch_size()
    );
    while loader.has_next() {
        let step = loader.try_next()?;
        println!("[LOADER] {:?}", step.into_vec());
    }

    let mut kfold = KFold::new(dataset.len(), args.folds, args.shuffle)?;
    if let Some(seed) = args.seed {
        kfold = kfold.seed(seed);
    }
    for (i, fold) in kfold.split().iter().enumerate() {
        println!("[KFOLD {i}] train={:?} test={:?}", fold.train, fold.test);
    }
    Ok(())
}
