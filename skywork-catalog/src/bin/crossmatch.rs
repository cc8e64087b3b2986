use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use skywork_catalog::loader::BSS_FIRST_COLUMN;
use skywork_catalog::{
    find_closest, load_degree_catalog, load_sexagesimal_catalog, run_crossmatch,
    write_matches_csv, CrossmatchParams, CrossmatchResult, CrossmatchStrategy, Match, Position,
    SexagesimalEntry,
};
use skywork_core::angle::ParseAngle;
use skywork_core::{angular_dist, dms2dec, format_dms, format_hms, hms2dec};
use std::path::PathBuf;
use std::time::Instant;

/// Unmatched ids printed before the count.
const UNMATCHED_PREVIEW: usize = 3;

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Parser)]
#[command(name = "crossmatch")]
#[command(about = "Coordinate conversion and catalogue cross-matching")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert sexagesimal coordinates to decimal degrees
    Convert {
        #[command(subcommand)]
        what: Convert,
    },
    /// Angular distance between two positions, in degrees
    Distance {
        #[arg(allow_hyphen_values = true)]
        ra1: String,
        #[arg(allow_hyphen_values = true)]
        dec1: String,
        #[arg(allow_hyphen_values = true)]
        ra2: String,
        #[arg(allow_hyphen_values = true)]
        dec2: String,
    },
    /// Find the catalogue entry nearest to a position
    Closest {
        /// Whitespace catalogue in the BSS layout
        #[arg(long)]
        catalog: PathBuf,
        /// Right ascension (degrees, or HMS e.g. 18h36m56s, 18:36:56)
        #[arg(allow_hyphen_values = true)]
        ra: String,
        /// Declination (degrees, or DMS e.g. +38d47m01s, -5:22:30)
        #[arg(allow_hyphen_values = true)]
        dec: String,
    },
    /// Cross-match a sexagesimal catalogue against a degree catalogue
    Match {
        /// Whitespace catalogue in the BSS layout
        #[arg(long)]
        cat1: PathBuf,
        /// CSV catalogue with RA and Dec in degrees
        #[arg(long)]
        cat2: PathBuf,
        /// Match radius in arcseconds
        #[arg(long, default_value = "40.0")]
        radius_arcsec: f64,
        /// Use the declination-band index instead of a full scan
        #[arg(long)]
        indexed: bool,
        /// Maximum number of matches to print
        #[arg(long)]
        limit: Option<usize>,
        /// Print timing
        #[arg(long)]
        timing: bool,
        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Subcommand)]
enum Convert {
    /// Hours, minutes, seconds of right ascension
    Hms {
        #[arg(allow_negative_numbers = true)]
        hours: f64,
        minutes: f64,
        seconds: f64,
    },
    /// Degrees, arc-minutes, arc-seconds of declination
    Dms {
        #[arg(allow_negative_numbers = true)]
        degrees: f64,
        minutes: f64,
        seconds: f64,
    },
    /// Parse a right ascension string
    ParseRa {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Parse a declination string
    ParseDec {
        #[arg(allow_hyphen_values = true)]
        value: String,
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
        Commands::Convert { what } => match what {
            Convert::Hms {
                hours,
                minutes,
                seconds,
            } => println!("{}", hms2dec(hours, minutes, seconds)),
            Convert::Dms {
                degrees,
                minutes,
                seconds,
            } => println!("{}", dms2dec(degrees, minutes, seconds)),
            Convert::ParseRa { value } => println!("{}", parse_ra(&value)?),
            Convert::ParseDec { value } => println!("{}", parse_dec(&value)?),
        },
        Commands::Distance {
            ra1,
            dec1,
            ra2,
            dec2,
        } => {
            let d = angular_dist(
                parse_ra(&ra1)?,
                parse_dec(&dec1)?,
                parse_ra(&ra2)?,
                parse_dec(&dec2)?,
            );
            println!("{}", d);
        }
        Commands::Closest { catalog, ra, dec } => {
            let entries = load_sexagesimal_catalog(&catalog, BSS_FIRST_COLUMN)
                .with_context(|| format!("loading {}", catalog.display()))?;
            let (id, distance) = find_closest(&entries, parse_ra(&ra)?, parse_dec(&dec)?)?;
            println!("({}, {})", id, distance);
        }
        Commands::Match {
            cat1,
            cat2,
            radius_arcsec,
            indexed,
            limit,
            timing,
            format,
        } => {
            let bss = load_sexagesimal_catalog(&cat1, BSS_FIRST_COLUMN)
                .with_context(|| format!("loading {}", cat1.display()))?;
            let sc = load_degree_catalog(&cat2)
                .with_context(|| format!("loading {}", cat2.display()))?;

            let mut params = CrossmatchParams::with_radius_arcsec(radius_arcsec);
            if indexed {
                params.strategy = CrossmatchStrategy::Indexed {
                    band_height_deg: None,
                };
            }

            let start = timing.then(Instant::now);
            let result = run_crossmatch(&bss, &sc, &params)?;
            if let Some(start) = start {
                eprintln!(
                    "Cross-match completed in {:.2} ms",
                    start.elapsed().as_secs_f64() * 1000.0
                );
            }

            let shown = limit.unwrap_or(result.matches.len()).min(result.matches.len());
            match format {
                OutputFormat::Table => print_table(&result, &bss, shown),
                OutputFormat::Json => print_json(&result, shown)?,
                OutputFormat::Csv => {
                    write_matches_csv(std::io::stdout().lock(), &result.matches[..shown])
                        .context("Failed to write CSV to stdout")?
                }
            }
        }
    }

    Ok(())
}

fn print_table(result: &CrossmatchResult, bss: &[SexagesimalEntry], shown: usize) {
    for m in &result.matches[..shown] {
        let (ra, dec) = bss[m.id1 - 1].position();
        println!(
            "{:6} -> {:6}  RA={} Dec={}  Dist={:.3}\"",
            m.id1,
            m.id2,
            format_hms(ra, 2),
            format_dms(dec, 2),
            m.distance_deg * 3600.0
        );
    }

    if result.matches.is_empty() {
        println!("No matches within the radius.");
    } else {
        println!("\nMatches: {}", result.matches.len());
    }

    let preview: Vec<usize> = result.no_matches.iter().take(UNMATCHED_PREVIEW).copied().collect();
    println!("First unmatched ids: {:?}", preview);
    println!("Unmatched: {}", result.no_matches.len());
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    matches: &'a [Match],
    no_matches: &'a [usize],
    matched: usize,
    unmatched: usize,
}

fn print_json(result: &CrossmatchResult, shown: usize) -> anyhow::Result<()> {
    let report = JsonReport {
        matches: &result.matches[..shown],
        no_matches: &result.no_matches,
        matched: result.matches.len(),
        unmatched: result.no_matches.len(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn parse_ra(s: &str) -> anyhow::Result<f64> {
    s.to_ra_degrees()
        .map_err(|e| anyhow::anyhow!("Cannot parse RA '{}': {}", s, e))
}

fn parse_dec(s: &str) -> anyhow::Result<f64> {
    s.to_dec_degrees()
        .map_err(|e| anyhow::anyhow!("Cannot parse Dec '{}': {}", s, e))
}
