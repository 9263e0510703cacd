//! girdoc: render API reference pages from introspected library models.
//!
//! Two modes:
//!
//! - **stdin mode**: `girdoc < Regress.json` prints every page to stdout
//! - **file mode**: `girdoc -o docs -l python models/*.json`

use anyhow::{bail, Context, Result};
use clap::Parser;
use girdoc::engine::render_page;
use girdoc::format::{create_formatter, DocOptions, Formatter};
use girdoc::model::Namespace;
use girdoc::output::{create_emitter, Emitter};
use girdoc::{logging, walker};
use rayon::prelude::*;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "girdoc",
    about = "Render cross-linked API reference pages from introspected library models"
)]
struct Cli {
    /// Model files (JSON; globs and directories supported). If omitted,
    /// reads one model from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Binding the pages describe: c (default), python, gjs
    #[arg(short = 'l', long, default_value = "c")]
    language: String,

    /// Directory searched for `{{ file }}` includes in documentation
    /// (repeatable)
    #[arg(short = 'M', long = "markdown-include-path", value_name = "DIR")]
    include_paths: Vec<PathBuf>,

    /// Link bare type and function names in documentation text
    #[arg(short = 'R', long)]
    resolve_implicit_links: bool,

    /// Output format: mallard (default), json
    #[arg(short = 'f', long, default_value = "mallard")]
    format: String,

    /// Log every rendered page
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    fn doc_options(&self) -> DocOptions {
        DocOptions {
            include_paths: self.include_paths.clone(),
            resolve_implicit_links: self.resolve_implicit_links,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet, cli.no_color);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// stdin mode: one model in, every page out on stdout in walk order.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    let ns = Namespace::from_json(&input).context("failed to load model from stdin")?;

    let formatter = create_formatter(&cli.language, &ns, cli.doc_options())?;
    let emitter = create_emitter(&cli.format)?;

    let mut failed = 0;
    for entry in walker::walk(&ns, |e| formatter.should_render(e)) {
        match render_page(&entry, formatter.as_ref()) {
            Ok(page) => print!("{}", emitter.emit(&page)?),
            Err(e) => {
                tracing::error!(page = %e.entity(), "{}", e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{} page(s) failed to render", failed);
    }
    Ok(())
}

/// file mode: every model in, one file per page in the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let emitter = create_emitter(&cli.format)?;
    let input_files = expand_globs(&cli.files)?;

    let mut written = 0;
    let mut failed = 0;
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let ns = match Namespace::from_json(&content) {
            Ok(ns) => ns,
            Err(e) => {
                tracing::warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };
        let formatter = create_formatter(&cli.language, &ns, cli.doc_options())?;
        let (ok, errors) = render_namespace(&ns, formatter.as_ref(), emitter.as_ref(), output_dir)?;
        tracing::info!(
            namespace = %ns.name,
            pages = ok,
            failed = errors,
            "rendered {}",
            path.display()
        );
        written += ok;
        failed += errors;
    }

    if failed > 0 {
        bail!("{} page(s) failed to render ({} written)", failed, written);
    }
    Ok(())
}

/// Render and write every page of one namespace in parallel. Returns the
/// number of pages written and failed; write errors abort.
fn render_namespace(
    ns: &Namespace,
    formatter: &dyn Formatter,
    emitter: &dyn Emitter,
    output_dir: &Path,
) -> Result<(usize, usize)> {
    let entries = walker::walk(ns, |e| formatter.should_render(e));
    let ext = emitter.file_extension();

    let results: Vec<Result<bool>> = entries
        .par_iter()
        .map(|entry| match render_page(entry, formatter) {
            Ok(page) => {
                let out_path = output_dir.join(format!("{}.{}", page.id, ext));
                fs::write(&out_path, emitter.emit(&page)?)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
                Ok(true)
            }
            Err(e) => {
                tracing::error!(page = %e.entity(), "{}", e);
                Ok(false)
            }
        })
        .collect();

    let mut ok = 0;
    let mut failed = 0;
    for result in results {
        if result? {
            ok += 1;
        } else {
            failed += 1;
        }
    }
    Ok((ok, failed))
}

/// File extensions recognized as model files.
const SUPPORTED_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for model files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && has_supported_extension(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext))
}
