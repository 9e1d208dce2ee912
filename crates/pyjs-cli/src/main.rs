//! `pyjs`: translate a Python file to JavaScript.

mod config;
mod runtime;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use pyjs::KeywordArguments;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prepended to every file written with `--output`.
const HEADER: &str = "/* Generated by pyjs. Edits will be lost on the next translation. */\n";

#[derive(Parser, Debug)]
#[command(name = "pyjs", version, about = "Translate Python source to JavaScript")]
struct Cli {
    /// Python source file, use - for stdin
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output file, - for stdout
    #[arg(short, long, value_name = "FILE", default_value = "-")]
    output: PathBuf,

    /// Log less; repeat up to three times
    #[arg(short, long, visible_alias = "stfu", action = ArgAction::Count)]
    quiet: u8,

    /// Skip validating handler output shapes
    #[arg(long)]
    no_contract_checks: bool,

    /// Drop keyword arguments at call sites instead of failing
    #[arg(long)]
    drop_keyword_args: bool,

    /// Config file (default: ./pyjs.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write the runtime adapter module into DIR
    #[arg(long, value_name = "DIR")]
    emit_runtime: Option<PathBuf>,

    /// Print the parsed syntax tree as JSON instead of translating
    #[arg(long)]
    emit_ast: bool,
}

impl Cli {
    fn writes_stdout(&self) -> bool {
        self.output == Path::new("-")
    }
}

/// `RUST_LOG` wins over `-q`.
fn init_logging(quiet: u8) {
    let level = match quiet {
        0 => "debug",
        1 => "info",
        2 => "warn",
        _ => "error",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Source text and the name used for it in diagnostics.
fn read_input(file: &Path) -> Result<(String, String)> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok((buf, "<stdin>".to_string()));
    }
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    Ok((source, file.display().to_string()))
}

fn run(cli: &Cli) -> Result<()> {
    let mut options = config::PyjsConfig::load(cli.config.as_deref(), Path::new("."))?.transpile;
    if cli.no_contract_checks {
        options.contract_checks = false;
    }
    if cli.drop_keyword_args {
        options.keyword_arguments = KeywordArguments::Drop;
    }

    let (source, filename) = read_input(&cli.file)?;

    if cli.emit_ast {
        let module = pyjs_syntax::read_python(&source)
            .with_context(|| format!("failed to parse {filename}"))?;
        let json = serde_json::to_string_pretty(&module).context("failed to serialize syntax tree")?;
        return write_stdout(&format!("{json}\n"));
    }

    // rendered in full before anything is written
    let js = pyjs::jsify(&source, &filename, &options)?;

    if let Some(dir) = &cli.emit_runtime {
        let path = runtime::emit(dir)?;
        info!(path = %path.display(), "wrote runtime adapter");
    }

    if cli.writes_stdout() {
        return write_stdout(&js);
    }
    std::fs::write(&cli.output, format!("{HEADER}{js}"))
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    if cli.quiet < 2 {
        println!("Written result to {}", cli.output.display());
    }
    Ok(())
}

fn write_stdout(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write stdout")
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    if let Err(err) = run(&cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
