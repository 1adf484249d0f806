mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{build_request, Args};
use std::process;
use tpatch_core::{apply_patch, PatchOutcome};

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(outcome) => report(&outcome, args.dry_run),
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<PatchOutcome> {
    let req = build_request(args).with_context(|| format!("patching {:?}", args.path))?;
    Ok(apply_patch(&req)?)
}

fn report(outcome: &PatchOutcome, dry_run: bool) {
    let path = outcome.target.display();
    let n = outcome.match_count;

    if dry_run {
        println!("[DRY RUN] {}: {} replacement(s) would be made", path, n);
    } else if outcome.written {
        println!("[SUCCESS] {}: {} replacement(s)", path, n);
    } else {
        println!("[UNCHANGED] {}: {} replacement(s)", path, n);
    }
}
