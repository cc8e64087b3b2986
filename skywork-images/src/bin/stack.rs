use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use skywork_images::signal::SIGNAL_TAIL;
use skywork_images::{
    brightest_pixel, describe, gaussian_signal, mean_stack_1d, noisy_copies, rms_error,
    write_primary_image, StackMethod, StackParams,
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Mean,
    Median,
}

impl From<Method> for StackMethod {
    fn from(method: Method) -> Self {
        match method {
            Method::Mean => StackMethod::Mean,
            Method::Median => StackMethod::Median,
        }
    }
}

#[derive(Parser)]
#[command(name = "stack")]
#[command(about = "Inspect FITS files and stack images or signals")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the primary HDU summary of a FITS file
    Info { file: PathBuf },
    /// Stack NNNN.fits images from a directory
    Images {
        /// Directory holding 0000.fits, 0001.fits, ...
        #[arg(long)]
        dir: PathBuf,
        /// Number of images to stack
        #[arg(long)]
        count: usize,
        #[arg(long, value_enum, default_value = "mean")]
        method: Method,
        /// Write the stacked image here
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Recover a Gaussian pulse from noisy copies
    Signal {
        #[arg(long, default_value = "500")]
        points: usize,
        #[arg(long, default_value = "100")]
        copies: usize,
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
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

    match cli.command {
        Commands::Info { file } => {
            let summary =
                describe(&file).with_context(|| format!("reading {}", file.display()))?;
            println!("Filename: {}", file.display());
            println!("{}", summary);
        }
        Commands::Images {
            dir,
            count,
            method,
            output,
        } => {
            let params = StackParams::new(dir, count).with_method(method.into());
            let start = Instant::now();
            let stacked = params.run()?;
            info!(
                "Stacked {} images in {:.2} s",
                count,
                start.elapsed().as_secs_f64()
            );

            match brightest_pixel(&stacked) {
                Some((row, col, value)) => {
                    println!("Brightest pixel: row {}, col {}, value {:.6}", row, col, value)
                }
                None => println!("Stacked image has no finite pixels."),
            }

            if let Some(path) = output {
                write_primary_image(&path, &stacked)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("Wrote {}", path.display());
            }
        }
        Commands::Signal {
            points,
            copies,
            seed,
        } => {
            if copies == 0 {
                anyhow::bail!("--copies must be at least 1");
            }
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let (x, clean) = gaussian_signal(points);
            let noisy = noisy_copies(&clean, copies, &mut rng);
            let stacked = mean_stack_1d(&noisy)?;

            if let (Some(first), Some(last)) = (x.first(), x.last()) {
                println!(
                    "{} points from {:.4} to {:.4} (tails {})",
                    points, first, last, SIGNAL_TAIL
                );
            }
            println!("RMS error, single copy:   {:.4}", rms_error(&noisy[0], &clean)?);
            println!(
                "RMS error, mean of {:>4}: {:.4}",
                copies,
                rms_error(&stacked, &clean)?
            );
            println!("Expected ratio 1/sqrt(N): {:.4}", 1.0 / (copies as f64).sqrt());
        }
    }

    Ok(())
}
