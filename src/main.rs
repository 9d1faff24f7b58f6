//! # cspace-gen Entry Point
//!
//! Generates a cubic c-space and writes it as a JSON record (stdout by default)
//! and optionally as an ASCII STL solid. Out-of-range dimension or fullness
//! values are replaced by their defaults with a diagnostic.
//!
//! ## License
//! Licensed under the MIT License.

use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use log::info;

use cspace_gen::space::{DEFAULT_SIZE, MAX_FULLNESS};
use cspace_gen::{generate, to_solid_mesh, to_structured_record};

#[derive(Parser)]
#[command(name = "cspace-gen")]
#[command(about = "Generate 3D configuration spaces with obstacles for path planning")]
#[command(version)]
struct Cli {
    /// Edge length of the cubic c-space
    #[arg(short, long, default_value_t = DEFAULT_SIZE, allow_negative_numbers = true)]
    dimension: f64,

    /// Fullness from 0 (empty) to 9
    #[arg(short, long, default_value_t = MAX_FULLNESS / 2, allow_negative_numbers = true)]
    fullness: i32,

    /// Seed for the random generator, zero to use the system time
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    seed: i64,

    /// File to write the JSON record to (stdout when absent)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// File to write the ASCII STL solid to
    #[arg(long)]
    stl: Option<PathBuf>,
}

fn write_text(path: &Path, text: &str) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()
}

fn time_seed() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i64)
        .unwrap_or(1)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut size = cli.dimension;
    if !(size > 0.0) {
        size = DEFAULT_SIZE;
        eprintln!("> incorrect size, used default value ({:.1})", DEFAULT_SIZE);
    }
    let mut fullness = cli.fullness;
    if !(0..=MAX_FULLNESS).contains(&fullness) {
        fullness = MAX_FULLNESS / 2;
        eprintln!("> incorrect fullness, used value {}", fullness);
    }
    let seed = if cli.seed == 0 { time_seed() } else { cli.seed };

    info!(
        "Starting c-space generation with size {:.2} x {:.2} x {:.2}, fullness {}, seed {}",
        size, size, size, fullness, seed
    );
    let space = generate(size, size, size, fullness, seed)?;

    let json = to_structured_record(&space)?;
    match &cli.output {
        Some(path) => {
            write_text(path, &json)?;
            info!("JSON record written to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(json.as_bytes())?;
            handle.write_all(b"\n")?;
        }
    }

    if let Some(path) = &cli.stl {
        write_text(path, &to_solid_mesh(&space))?;
        info!("STL solid written to {}", path.display());
    }

    Ok(())
}
