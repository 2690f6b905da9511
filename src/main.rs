//! `food-checkr` — look up food products by barcode, rate their additives, keep a scan history.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and initialize logging.
//! 2. Load config ([`config::load_config`]) and build the [`reference::ReferenceTables`] once.
//! 3. `scan`: validate barcodes ([`barcode`]), fetch and normalize them ([`registry`],
//!    [`normalizer`]), save to history ([`history`]) and render ([`report`]).
//! 4. `history` / `additive`: read or edit the history, or look up additive details.
//! 5. Exit `0` (all found), `2` (some not found) or `1` (invalid input or fetch failure).

mod additive;
mod barcode;
mod cli;
mod config;
mod error;
mod history;
mod models;
mod normalizer;
mod nutrient;
mod rating;
mod reference;
mod registry;
mod report;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, HistoryAction};
use config::{load_config, Config};
use error::ScanError;
use history::{FileStore, HistoryCache};
use models::Product;
use reference::ReferenceTables;

const EXIT_FAILED: i32 = 1;
const EXIT_NOT_FOUND: i32 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;
    let tables = ReferenceTables::with_overrides(&config.reference);

    match cli.command {
        Command::Scan {
            barcodes,
            json,
            no_save,
        } => {
            let code = scan(&config, &tables, &barcodes, json, no_save, cli.quiet).await?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Command::History { action } => run_history(&config, action, cli.quiet)?,
        Command::Additive { code, json } => match code {
            Some(code) => {
                let details = additive::classifier::details(&tables, &code);
                if json {
                    println!("{}", serde_json::to_string_pretty(&details)?);
                } else {
                    report::terminal::render_additive(&details);
                }
            }
            None => {
                if json {
                    let entries: Vec<_> = tables
                        .additives()
                        .into_iter()
                        .map(|(code, _)| additive::classifier::details(&tables, code))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&entries)?);
                } else {
                    report::terminal::render_reference_table(&tables);
                }
            }
        },
    }

    Ok(())
}

fn open_history(config: &Config) -> HistoryCache<FileStore> {
    let dir = config.history.dir();
    let history = HistoryCache::open(FileStore::new(&dir), config.history.capacity);
    tracing::debug!(
        path = %dir.display(),
        entries = history.len(),
        capacity = history.capacity(),
        "opened history"
    );
    history
}

/// Look up every barcode, save hits to history and report. Returns the exit code.
async fn scan(
    config: &Config,
    tables: &ReferenceTables,
    barcodes: &[String],
    json: bool,
    no_save: bool,
    quiet: bool,
) -> Result<i32> {
    let mut failed = 0usize;
    let mut not_found = 0usize;

    let mut valid = Vec::new();
    for raw in barcodes {
        match barcode::validate(raw) {
            Ok(code) => valid.push(code),
            Err(e) => {
                eprintln!("{} {}", "✗".red(), e);
                failed += 1;
            }
        }
    }

    let results = lookup_all(config, tables, &valid, quiet || json).await?;

    let history = if no_save { None } else { Some(open_history(config)) };
    let mut found: Vec<Product> = Vec::new();

    for (code, result) in valid.iter().zip(results) {
        match result {
            Ok(product) => {
                if let Some(history) = &history {
                    if let Err(e) = history.upsert(product.clone()) {
                        eprintln!("{} {}", "⚠".yellow(), e);
                    }
                }
                found.push(product);
            }
            Err(e) if e.is_not_found() => {
                not_found += 1;
                eprintln!(
                    "{} Product {} was not found in the database.",
                    "?".yellow(),
                    code
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("{} {}: {} Please try again.", "✗".red(), code, e);
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    } else {
        for product in &found {
            report::terminal::render_product(product, quiet);
        }
    }

    Ok(if failed > 0 {
        EXIT_FAILED
    } else if not_found > 0 {
        EXIT_NOT_FOUND
    } else {
        0
    })
}

async fn lookup_all(
    config: &Config,
    tables: &ReferenceTables,
    barcodes: &[String],
    quiet: bool,
) -> Result<Vec<Result<Product, ScanError>>> {
    use futures::future::join_all;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.upstream.timeout_secs))
        .build()?;
    let base_url = config.upstream.base_url.as_str();

    let pb = if !quiet && barcodes.len() > 1 {
        let pb = ProgressBar::new(barcodes.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut results = Vec::with_capacity(barcodes.len());
    for batch in barcodes.chunks(config.upstream.batch_size.max(1)) {
        let futures: Vec<_> = batch
            .iter()
            .map(|code| {
                let client = client.clone();
                async move { registry::lookup(&client, base_url, code, tables).await }
            })
            .collect();

        for result in join_all(futures).await {
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            results.push(result);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
    }

    Ok(results)
}

fn run_history(config: &Config, action: HistoryAction, quiet: bool) -> Result<()> {
    let history = open_history(config);

    match action {
        HistoryAction::List { json } => {
            let products = history.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&products)?);
            } else {
                let now = chrono::Utc::now().timestamp_millis();
                report::terminal::render_history(&products, now, quiet);
            }
        }
        HistoryAction::Show { code } => match history.get(&code) {
            Some(product) => report::terminal::render_product(&product, quiet),
            None => {
                eprintln!("{} {} is not in history", "?".yellow(), code);
                std::process::exit(EXIT_NOT_FOUND);
            }
        },
        HistoryAction::Remove { code } => {
            history.remove(&code)?;
            if !quiet {
                println!("Removed {} from history", code);
            }
        }
        HistoryAction::Clear => {
            // Always hit the store so an unreadable blob is removed too.
            let was_empty = history.is_empty();
            history.clear()?;
            if !quiet {
                if was_empty {
                    println!("History is already empty");
                } else {
                    println!("History cleared");
                }
            }
        }
    }

    Ok(())
}
