//! Custom cargo commands for the searchlight crate.
//!
//! Usage:
//!   cargo xtask verify      - Run full verification suite
//!   cargo xtask test        - Run all native tests
//!   cargo xtask check       - Quick check of both targets
//!   cargo xtask build-wasm  - Build the browser bundle with wasm-pack
//!   cargo xtask bench       - Run benchmarks

use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::process::Command;

/// Flags selecting the browser runtime instead of the native one.
const WASM_FLAGS: &[&str] = &["--no-default-features", "--features", "wasm"];

fn main() -> Result<()> {
    let task = env::args().nth(1);
    match task.as_deref() {
        Some("verify") => verify()?,
        Some("test") => test()?,
        Some("check") => check()?,
        Some("build-wasm") => build_wasm()?,
        Some("bench") => bench()?,
        _ => print_help(),
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"
cargo xtask <COMMAND>

Commands:
  verify      Run full verification suite (both targets, tests, clippy, fixture)
  test        Run all native tests
  check       Quick check (native + wasm32 cargo check)
  build-wasm  Build pkg/ with wasm-pack
  bench       Run benchmarks
"#
    );
}

/// Full verification suite
fn verify() -> Result<()> {
    println!("==========================================");
    println!("searchlight Verification Suite");
    println!("==========================================\n");

    println!("[1/4] Checking both targets...");
    check()?;
    println!("✓ Native and wasm32 builds check\n");

    println!("[2/4] Running Rust tests...");
    run_cargo(&["test", "--quiet"])?;
    println!("✓ All Rust tests passed\n");

    println!("[3/4] Running clippy...");
    run_cargo(&["clippy", "--quiet", "--all-targets", "--", "-D", "warnings"])?;
    println!("✓ Clippy passed\n");

    println!("[4/4] Validating test corpus...");
    run_cargo(&["run", "--quiet", "--", "check", "tests/fixtures/blog.json"])?;
    println!("✓ Corpus valid\n");

    println!("==========================================");
    println!("✓ ALL VERIFICATION CHECKS PASSED");
    println!("==========================================");

    Ok(())
}

/// Run all tests
fn test() -> Result<()> {
    run_cargo(&["test"])
}

/// Quick check of the native build and the browser build
fn check() -> Result<()> {
    println!("[1/2] cargo check (native)...");
    run_cargo(&["check", "--all-targets"])?;

    println!("[2/2] cargo check (wasm32)...");
    let mut args = vec!["check", "--lib", "--target", "wasm32-unknown-unknown"];
    args.extend_from_slice(WASM_FLAGS);
    run_cargo(&args)?;

    Ok(())
}

/// Build the browser bundle
fn build_wasm() -> Result<()> {
    let root = project_root()?;

    let status = Command::new("wasm-pack")
        .args(["build", "--target", "web", "--release", "--"])
        .args(WASM_FLAGS)
        .current_dir(&root)
        .status()
        .context("Failed to run wasm-pack (is it installed?)")?;

    if !status.success() {
        bail!("wasm-pack build failed");
    }

    println!("✓ Bundle written to {}", root.join("pkg").display());
    Ok(())
}

/// Run benchmarks
fn bench() -> Result<()> {
    run_cargo(&["bench"])
}

// ============================================================================
// Helper functions
// ============================================================================

fn project_root() -> Result<PathBuf> {
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_dir().context("Failed to read current directory")?,
    };

    // xtask is in project_root/xtask, so go up one level
    let root = manifest_dir.parent().unwrap_or(&manifest_dir);
    Ok(root.to_path_buf())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    let root = project_root()?;

    let status = Command::new("cargo")
        .args(args)
        .current_dir(&root)
        .status()
        .with_context(|| format!("Failed to run cargo {:?}", args))?;

    if !status.success() {
        bail!("cargo {:?} failed", args);
    }

    Ok(())
}
