//! fortdoc: insert documentation comments into Fortran sources.
//!
//! Every module, program, function, subroutine and derived type without a
//! documentation block gets one, written by the configured engine. Everything
//! else in the file is reproduced byte for byte.
//!
//! - **stdin mode**: `fortdoc < file.f90 > documented.f90`
//! - **file mode**: `fortdoc -r src/` rewrites changed files in place
//! - **check mode**: `fortdoc --check src/*.f90` lists what is missing

mod config;
mod document;
mod engine;
mod files;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser};
use config::Config;
use files::SourceFile;
use fortdoc_syntax::Tree;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser)]
#[command(
    name = "fortdoc",
    version,
    about = "Insert documentation comments into Fortran source files"
)]
struct Cli {
    /// Input files, directories or glob patterns. If omitted, reads from stdin.
    paths: Vec<String>,

    /// Write results into this directory instead of rewriting files in place
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// List undocumented constructs and exit with status 1 if there are any
    #[arg(long)]
    check: bool,

    /// Documentation engine: dummy or command
    #[arg(long)]
    engine: Option<String>,

    /// Program run by the command engine. Implies --engine command.
    #[arg(long, value_name = "PROGRAM")]
    command: Option<String>,

    /// Argument passed to --command. Can be specified multiple times.
    #[arg(long = "arg", value_name = "ARG", allow_hyphen_values = true)]
    command_args: Vec<String>,

    /// Text written by the dummy engine
    #[arg(long)]
    dummy_text: Option<String>,

    /// Replace existing documentation blocks too
    #[arg(long)]
    overwrite: bool,

    /// File extension scanned in directories. Can be specified multiple times.
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Descend into subdirectories
    #[arg(short = 'r', long)]
    recursive: bool,

    /// Config file (default: ./fortdoc.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = apply_overrides(Config::load(cli.config.as_deref())?, &cli);

    if cli.paths.is_empty() {
        return stdin_mode(&cli, &config);
    }

    file_mode(&cli, &config)
}

/// Initialize tracing on stderr. `RUST_LOG` wins over the command line.
fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Command-line flags take precedence over the config file.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(program) = &cli.command {
        config.command = std::iter::once(program.clone())
            .chain(cli.command_args.iter().cloned())
            .collect();
        config.engine = "command".to_string();
    }
    if let Some(engine) = &cli.engine {
        config.engine = engine.clone();
    }
    if let Some(text) = &cli.dummy_text {
        config.dummy_text = text.clone();
    }
    if cli.overwrite {
        config.overwrite = true;
    }
    if !cli.extensions.is_empty() {
        config.extensions = cli
            .extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
    }
    config
}

/// stdin mode: read one source from stdin, write the documented source to stdout.
fn stdin_mode(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let mut tree = Tree::parse(&input).context("failed to parse stdin")?;

    if cli.check {
        return Ok(check_exit_code(print_undocumented("<stdin>", &tree)));
    }

    let mut engine = engine::create_engine(config)?;
    let report = document::insert_docs(&mut tree, engine.as_mut(), config.overwrite)?;
    info!(
        documented = report.documented,
        skipped = report.skipped,
        "processed stdin"
    );
    print!("{}", tree);
    Ok(ExitCode::SUCCESS)
}

/// file mode: document every input file, or list what is missing with --check.
fn file_mode(cli: &Cli, config: &Config) -> Result<ExitCode> {
    let input_files = files::expand_paths(&cli.paths, &config.extensions, cli.recursive)?;
    if input_files.is_empty() {
        bail!("no input files found");
    }

    if let Some(dir) = cli.output.as_ref().filter(|_| !cli.check) {
        files::check_distinct_targets(&input_files)?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let mut engine = if cli.check {
        None
    } else {
        Some(engine::create_engine(config)?)
    };

    let mut failed = 0usize;
    let mut missing = false;
    for source in &input_files {
        let path = &source.path;
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut tree = match Tree::parse(&content) {
            Ok(tree) => tree,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                failed += 1;
                continue;
            }
        };

        match engine.as_deref_mut() {
            None => missing |= print_undocumented(&path.display().to_string(), &tree),
            Some(engine) => {
                let report = document::insert_docs(&mut tree, engine, config.overwrite)
                    .with_context(|| format!("failed to document {}", path.display()))?;
                info!(
                    path = %path.display(),
                    documented = report.documented,
                    skipped = report.skipped,
                    "processed"
                );
                write_output(source, &tree, report.changed(), cli.output.as_deref())?;
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files could not be parsed", failed, input_files.len());
    }
    Ok(check_exit_code(missing))
}

/// Write `tree` into `output_dir` at the source's relative path, or else back
/// over the source if it changed.
fn write_output(
    source: &SourceFile,
    tree: &Tree,
    changed: bool,
    output_dir: Option<&Path>,
) -> Result<()> {
    let target = match output_dir {
        Some(dir) => {
            let target = dir.join(&source.relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            target
        }
        None if changed => source.path.clone(),
        None => return Ok(()),
    };
    fs::write(&target, tree.to_source())
        .with_context(|| format!("failed to write {}", target.display()))
}

/// Print `path:line: kind: header` for each undocumented construct.
/// Returns whether anything was printed.
fn print_undocumented(path: &str, tree: &Tree) -> bool {
    let missing = document::undocumented(tree);
    for item in &missing {
        println!("{}:{}: {}: {}", path, item.line, item.kind, item.signature);
    }
    !missing.is_empty()
}

fn check_exit_code(missing: bool) -> ExitCode {
    if missing {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
