// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inlinehashes CLI
//!
//! Prints the CSP hash of every inline script and style found in a local
//! file or a remote page.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use inlinehashes::{
    extract, render, Algorithm, FetchConfig, OutputConfig, OutputFormat, Source, Target,
};

#[derive(Debug, Parser)]
#[command(
    name = "inlinehashes",
    version,
    about = "Find inline scripts and styles in an HTML document and compute their CSP hashes"
)]
struct Args {
    /// URL or local HTML file to check
    source: String,

    /// Hash algorithm to use: sha256, sha384, sha512
    #[arg(short, long, default_value = "sha256")]
    alg: Algorithm,

    /// Include full content in the output
    #[arg(short, long, default_value_t = false)]
    full: bool,

    /// Target inline content to look for: all, script-src, style-src
    #[arg(short, long, default_value = "all")]
    target: Target,

    /// Output format: json, table, plain
    #[arg(short, long, default_value = "json")]
    output: OutputFormat,

    /// Log progress to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose {
        "inlinehashes=debug"
    } else {
        "inlinehashes=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<String> {
    let source = Source::parse(&args.source)
        .with_context(|| format!("Failed to get source: {}", args.source))?;

    let html = source
        .load(&FetchConfig::default())
        .await
        .with_context(|| format!("Failed to get source: {}", source))?;

    let inlines = extract(&html, args.target)
        .with_context(|| format!("Failed to parse document: {}", source))?;
    tracing::info!(count = inlines.len(), target = %args.target, "inline content found");

    let config = OutputConfig::new()
        .format(args.output)
        .algorithm(args.alg)
        .full(args.full);

    Ok(render(&inlines, &config)?)
}
