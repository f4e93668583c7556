/*
 * Copyright (C) 2025  Chianti GALLY
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use env_logger::Env;
use std::process::ExitCode;
use std::time::Instant;

use pdf_pages::cli::Cli;
use pdf_pages::{ DocumentOutcome, HayroRenderer, PageExtractor, RunSummary };

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let (config, sources) = match cli.resolve().context("cannot load configuration") {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("{}", format!("Error: {e:#}").red());
            return ExitCode::from(2);
        }
    };

    let start_time = Instant::now();
    let extractor = PageExtractor::new(config, HayroRenderer::new());

    println!("{}", "--- Extracting PDF pages as images ---".blue());
    println!(
        "{}",
        format!(
            "Queued {} document(s), up to {} page(s) each at {} DPI",
            sources.len(),
            extractor.config().max_pages,
            extractor.config().dpi
        ).blue()
    );

    let summary = extractor.run(&sources);

    print_summary(&summary);
    println!(
        "{}",
        format!("Processing completed in {:.2} seconds", start_time.elapsed().as_secs_f32()).green()
    );

    // Per-document failures are reported above, never through the exit status.
    ExitCode::SUCCESS
}

fn print_summary(summary: &RunSummary) {
    for report in &summary.documents {
        let name = report.source.display();
        match &report.outcome {
            DocumentOutcome::Extracted { pages, already_present: 0 } => {
                println!("{}", format!("  OK      {name}: {pages} page(s)").green());
            }
            DocumentOutcome::Extracted { pages, already_present } => {
                println!(
                    "{}",
                    format!("  OK      {name}: {pages} page(s), {already_present} already present").green()
                );
            }
            DocumentOutcome::Skipped { reason } => {
                println!("{}", format!("  SKIPPED {name}: {reason}").yellow());
            }
            DocumentOutcome::Failed { cause, pages_written } => {
                println!(
                    "{}",
                    format!("  FAILED  {name}: {cause} ({pages_written} page(s) written)").red()
                );
            }
        }
    }

    println!("{}", "--- Extraction finished ---".green());
    println!(
        "{}",
        format!(
            "{} page(s) saved to '{}'.",
            summary.total_extracted,
            summary.output_dir.display()
        ).green()
    );
    for source in &summary.name_collisions {
        println!(
            "{}",
            format!("  Pages from '{}' replaced those of an earlier file with the same name.", source.display()).yellow()
        );
    }
    if summary.skipped() > 0 || summary.failed() > 0 {
        println!(
            "{}",
            format!(
                "{} document(s) skipped, {} failed.",
                summary.skipped(),
                summary.failed()
            ).yellow()
        );
    }
}
