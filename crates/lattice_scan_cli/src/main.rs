//! Command-line front end for the lattice point enumerator.

mod input;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::time::Instant;

use lattice_scan_core::{random_basis, Enumerator, Rational, Vector};

#[derive(Parser)]
#[command(name = "lattice-scan", version, about = "Exact lattice point enumeration")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Enumerate every lattice point whose shifted image lies in the cube
    /// [lower, upper]^d
    Enumerate {
        /// Problem file: dimension, basis columns, shift vector
        input: PathBuf,
        /// Lower bound applied to every coordinate (integer or n/d)
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        lower: Rational,
        /// Upper bound applied to every coordinate (integer or n/d)
        #[arg(long, default_value = "1", allow_hyphen_values = true)]
        upper: Rational,
        /// Report the scanned range at every recursion depth on stderr
        #[arg(long)]
        verbose: bool,
    },
    /// Validate a problem file and report basis invertibility
    Check {
        input: PathBuf,
    },
    /// Write a random invertible problem file
    Generate {
        output: PathBuf,
        #[arg(long, default_value_t = 3)]
        dimensions: usize,
        /// Basis entries are drawn from [-bound, bound]
        #[arg(long, default_value_t = 5)]
        bound: i64,
        /// Seed for reproducible output; defaults to entropy
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Enumerate {
            input,
            lower,
            upper,
            verbose,
        } => run_enumerate(&input, &lower, &upper, verbose),
        Command::Check { input } => run_check(&input),
        Command::Generate {
            output,
            dimensions,
            bound,
            seed,
        } => run_generate(&output, dimensions, bound, seed),
    }
}

fn run_enumerate(input: &Path, lower: &Rational, upper: &Rational, verbose: bool) -> Result<()> {
    if lower > upper {
        bail!("lower bound {lower} exceeds upper bound {upper}");
    }
    let problem = input::parse_file(input)?;

    let mut scan = Enumerator::new();
    if verbose {
        scan = scan.on_range(|depth, min, max| {
            eprintln!("depth {depth}: scanning {min}..={max}");
        });
    }

    let started = Instant::now();
    let points = scan
        .enumerate_shifted(&problem.basis, lower, upper, &problem.shift)
        .context("enumeration failed")?;
    let elapsed = started.elapsed();

    for point in &points {
        println!("{point}");
    }
    println!("total: {}", points.len());
    println!("elapsed: {elapsed:?}");
    Ok(())
}

fn run_check(input: &Path) -> Result<()> {
    let problem = input::parse_file(input)?;
    let d = problem.basis.rows();
    if problem.basis.inverse().is_err() {
        bail!("basis is singular");
    }
    println!("ok: {d} dimensions, basis invertible");
    Ok(())
}

fn run_generate(output: &Path, dimensions: usize, bound: i64, seed: Option<u64>) -> Result<()> {
    if dimensions == 0 {
        bail!("dimension must be at least 1");
    }
    if bound <= 0 {
        bail!("bound must be positive");
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let basis = random_basis(dimensions, bound, &mut rng);
    let text = input::render(&basis, &Vector::zeros(dimensions));
    std::fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;
    println!("wrote {dimensions}-dimensional problem to {}", output.display());
    Ok(())
}
