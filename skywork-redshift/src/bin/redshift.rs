use anyhow::Context;
use clap::Parser;
use log::{info, LevelFilter};
use skywork_redshift::{
    create_model, get_features_targets, load_colors, mean_squared_error, median_diff,
    train_test_split, DecisionTreeRegressor, Regressor, SplitParams, FEATURE_NAMES,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "redshift")]
#[command(about = "Fit photometric redshift models to SDSS galaxy colours")]
struct Cli {
    /// CSV with u, g, r, i, z and redshift columns
    #[arg(long)]
    data: PathBuf,

    /// Share of rows held out for testing
    #[arg(long, default_value = "0.25")]
    test_fraction: f64,

    /// Shuffle seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum decision-tree depth; unbounded when omitted
    #[arg(long)]
    max_depth: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let records =
        load_colors(&cli.data).with_context(|| format!("loading {}", cli.data.display()))?;
    let (features, targets) = get_features_targets(&records);

    let params = SplitParams {
        test_fraction: cli.test_fraction,
        seed: cli.seed,
    };
    let split = train_test_split(&features, &targets, &params)?;
    info!(
        "{} training rows, {} test rows",
        split.targets_train.len(),
        split.targets_test.len()
    );

    println!("Features: {}", FEATURE_NAMES.join(", "));
    for (row, target) in split.features_train.iter().zip(&split.targets_train).take(2) {
        println!(
            "  [{:.5}, {:.5}, {:.5}, {:.5}] -> {:.5}",
            row[0], row[1], row[2], row[3], target
        );
    }

    let models: Vec<Box<dyn Regressor>> = vec![
        Box::new(DecisionTreeRegressor::new().with_max_depth(cli.max_depth)),
        create_model("linear")?,
    ];

    for mut model in models {
        model.fit(&split.features_train, &split.targets_train)?;
        let predictions = model.predict(&split.features_test)?;
        println!(
            "{:<14} MSE = {:.6}  median |diff| = {:.6}",
            model.name(),
            mean_squared_error(&split.targets_test, &predictions)?,
            median_diff(&split.targets_test, &predictions)?
        );
    }

    Ok(())
}
