use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use intramark_config::Config;
use intramark_engine::{OperationSet, io, process};
use log::LevelFilter;
use std::env;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

mod args;

use args::{Cli, normalize_args};

fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(env::args()));
    let mut ops = match cli.operations() {
        Ok(ops) => ops,
        Err(e) => Cli::command().error(e.kind(), e).exit(),
    };

    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.verbose, config.as_ref());
    if let Some(config) = &config {
        apply_config(&mut ops, config);
    }
    log::debug!("requested operations: {ops:?}");

    let path = resolve_input_path(&cli.filename)?;
    let doc = io::read_document(&path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    let processed = process(&doc, &ops);

    if cli.write_in_place {
        if processed.is_modified() {
            io::write_document(&path, processed.text(&doc))
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            log::debug!("wrote {}", path.display());
        } else {
            log::info!("nothing to modify in {}", path.display());
        }
    } else if !cli.diagnostic {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(processed.text(&doc).as_bytes())?;
        stdout.flush()?;
    }

    if cli.diagnostic {
        println!("{}", processed.diagnostic().to_json()?);
    }

    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<Option<Config>> {
    let loaded = match explicit {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    loaded.context("Failed to load config file")
}

fn init_logging(verbose: bool, config: Option<&Config>) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        config
            .and_then(|c| c.log_level)
            .map(LevelFilter::from)
            .unwrap_or(LevelFilter::Warn)
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Config values only refine options that were already requested.
fn apply_config(ops: &mut OperationSet, config: &Config) {
    if ops.make_links_inline && config.preserve_reference_definitions {
        ops.preserve_reference_definitions = true;
    }
    if ops.modifies_headings() && config.equalize_trailing_hashes {
        ops.equalize_trailing_hashes = true;
    }
}

/// Works out which file to read. `-` reads the name from the first line of
/// stdin. When stdin is a terminal and the file does not exist, the user is
/// asked for another name until one exists.
fn resolve_input_path(filename: &str) -> Result<PathBuf> {
    let stdin = std::io::stdin();

    let name = if filename.trim() == "-" {
        let mut line = String::new();
        stdin.lock().read_line(&mut line)?;
        line.trim_end_matches(['\r', '\n']).trim_matches(' ').to_string()
    } else {
        filename.trim_matches(' ').to_string()
    };
    let mut path = PathBuf::from(name);

    if stdin.is_terminal() {
        while !path.is_file() {
            eprint!("The specified file does not exist. Enter a filename: ");
            std::io::stderr().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                bail!("No file name given");
            }
            path = PathBuf::from(line.trim());
        }
    } else if !path.is_file() {
        bail!("File does not exist: {}", path.display());
    }

    Ok(path)
}
