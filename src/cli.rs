// Idiomatic Rust CLI for ips-patcher.
//
// Applies one IPS patch to one target image and reports the size and
// SHA-256 of the patch, the target, and the written output.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueHint};

use crate::io::{self, FileRole, FileSummary, PatchStats};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DEFAULT_OUTPUT: &str = "patched.bin";

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Apply IPS patch to binary image.
#[derive(Parser, Debug)]
#[command(
    name = "ips-patcher",
    about = "Apply IPS patch to binary image",
    disable_version_flag = true
)]
struct Cli {
    /// Target image file to be patched.
    #[arg(long, short = 't', value_hint = ValueHint::FilePath, conflicts_with = "target_pos")]
    target: Option<PathBuf>,

    /// IPS patch file to use.
    #[arg(long, short = 'p', value_hint = ValueHint::FilePath)]
    patch: Option<PathBuf>,

    /// Output file.
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Show version.
    #[arg(long, short = 'v')]
    version: bool,

    /// Suppress the per-file checksum lines.
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Output stats as JSON to stderr.
    #[arg(long = "json")]
    json_output: bool,

    /// Target image file (positional form).
    #[arg(value_name = "IMAGE", value_hint = ValueHint::FilePath)]
    target_pos: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Apply,
    Version,
}

#[derive(Debug)]
struct Options {
    command: Command,
    quiet: bool,
    json_output: bool,
    patch_file: Option<PathBuf>,
    target_file: Option<PathBuf>,
    output_file: PathBuf,
}

fn resolve_options(cli: Cli) -> Options {
    let command = if cli.version {
        Command::Version
    } else {
        Command::Apply
    };
    Options {
        command,
        quiet: cli.quiet,
        json_output: cli.json_output,
        patch_file: cli.patch,
        target_file: cli.target.or(cli.target_pos),
        output_file: cli.output,
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("ips-patcher".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Version command
// ---------------------------------------------------------------------------

fn cmd_version() -> i32 {
    println!("{}", env!("CARGO_PKG_VERSION"));
    0
}

// ---------------------------------------------------------------------------
// Apply command
// ---------------------------------------------------------------------------

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn summary_line(name: &str, summary: &FileSummary) -> String {
    let digest = summary.sha256_hex().unwrap_or_else(|| "-".to_string());
    format!("{name}\t{digest}\t{} bytes", summary.size)
}

fn stats_json(stats: &PatchStats) -> serde_json::Value {
    let file = |s: &FileSummary| {
        serde_json::json!({
            "path": s.path.display().to_string(),
            "size": s.size,
            "sha256": s.sha256_hex(),
        })
    };
    serde_json::json!({
        "command": "apply",
        "clusters": stats.clusters,
        "patch": file(&stats.patch),
        "target": file(&stats.target),
        "output": file(&stats.output),
    })
}

fn cmd_apply(opts: &Options) -> i32 {
    let Some(patch_path) = &opts.patch_file else {
        eprintln!("ips-patcher: IPS patch file is not specified. Use --help option to show help.");
        return 1;
    };
    let Some(target_path) = &opts.target_file else {
        eprintln!(
            "ips-patcher: target image file is not specified. Use --help option to show help."
        );
        return 1;
    };

    log::info!(
        "applying {} to {} -> {}",
        patch_path.display(),
        target_path.display(),
        opts.output_file.display()
    );

    // Each line goes out as soon as its file has been read, so a failure
    // further down still leaves the earlier checksums on stdout.
    let report = |role: FileRole, summary: &FileSummary| {
        if opts.quiet {
            return;
        }
        let name = match role {
            FileRole::Patch | FileRole::Target => display_name(&summary.path),
            FileRole::Output => summary.path.display().to_string(),
        };
        println!("{}", summary_line(&name, summary));
    };

    let stats = match io::patch_file_with(patch_path, target_path, &opts.output_file, report) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("ips-patcher: {e}");
            return 1;
        }
    };

    if opts.json_output {
        match serde_json::to_string_pretty(&stats_json(&stats)) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => log::warn!("failed to serialize stats: {e}"),
        }
    }

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
///
/// Exits 0 on success and for `--help`/`--version`, 1 on any error.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };
    let opts = resolve_options(cli);

    let exit_code = match opts.command {
        Command::Version => cmd_version(),
        Command::Apply => cmd_apply(&opts),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
