use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod train;

#[derive(Parser, Debug)]
#[command(
    name = "iris-trainer",
    about = "Train the Iris random forest and write model.pkl"
)]
struct Args {
    /// Directory the artifact is written to
    #[arg(long, default_value = "../model", env = "MODEL_DIR")]
    model_dir: PathBuf,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    n_estimators: usize,

    /// Maximum depth of each tree (0 for unlimited)
    #[arg(long, default_value_t = 10)]
    max_depth: usize,

    /// Fraction of samples held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,

    /// Seed for the split and the bootstrap resampling
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let options = train::TrainOptions {
        n_estimators: args.n_estimators,
        max_depth: (args.max_depth > 0).then_some(args.max_depth),
        test_ratio: args.test_ratio,
        seed: args.seed,
    };

    let report = train::run(&args.model_dir, &options).inspect_err(|e| {
        tracing::error!("Training failed: {}", e);
    })?;

    tracing::info!(
        "Wrote {} ({} train / {} test samples)",
        report.path.display(),
        report.n_train,
        report.n_test
    );
    Ok(())
}
