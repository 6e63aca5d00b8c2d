//! `lowrank <input.png> <rank> [output.png]`
//!
//! Decodes an image, reconstructs it from its `rank` largest singular
//! triples, reports the Frobenius error and writes the result as an 8-bit
//! grayscale PNG.

mod args;
mod report;

use std::process::ExitCode;

use anyhow::{Context, Result};
use lowrank_png::{read_png, write_png};
use lowrank_svd::svd;

use crate::args::{Args, parse_args};
use crate::report::{per_pixel, truncated_error};

fn run(args: &Args) -> Result<()> {
    let image = read_png(&args.input)
        .with_context(|| format!("Failed to read PNG file {}", args.input.display()))?;
    let (height, width) = (image.height(), image.width());

    let decomposition = svd(&image.pixels)
        .with_context(|| format!("SVD of {}x{} image failed", width, height))?;
    if decomposition.has_fallback() {
        log::warn!("Decomposition used non-orthogonal fallback vectors; error bounds may not hold");
    }
    if args.rank > height.min(width) {
        log::info!(
            "Rank {} exceeds min(width, height) = {}; using full reconstruction",
            args.rank,
            height.min(width)
        );
    }

    let a_k = decomposition
        .low_rank(args.rank)
        .with_context(|| format!("Rank-{} reconstruction failed", args.rank))?;

    let norm = truncated_error(&image.pixels, &a_k)?;
    println!(
        "Frobenius norm of the difference between original and A_k: {:.5}",
        norm
    );
    println!(
        "Frobenius norm error per pixel: {:.5}",
        per_pixel(norm, width, height)
    );

    write_png(&args.output, &a_k, &image.header)
        .with_context(|| format!("Failed to write PNG file {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
