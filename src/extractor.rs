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
//! The extraction run: documents in, numbered page images out.

use indicatif::{ ProgressBar, ProgressStyle };
use log::{ debug, error, info, warn };
use std::collections::HashMap;
use std::fmt;
use std::path::{ Path, PathBuf };

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::naming::{ base_identifier, page_file_name };
use crate::output::{ ensure_output_dir, save_jpeg };
use crate::renderer::{ DocumentRenderer, OpenDocument };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing exists at the configured path.
    MissingSourceFile,
    /// Something exists, but it is not a regular file.
    NotAFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingSourceFile => f.write_str("file not found"),
            SkipReason::NotAFile => f.write_str("not a regular file"),
        }
    }
}

/// What happened to one source document.
#[derive(Debug)]
pub enum DocumentOutcome {
    Extracted {
        pages: usize,
        /// Pages left in place because `skip_existing` found them on disk.
        already_present: usize,
    },
    Skipped {
        reason: SkipReason,
    },
    /// Processing stopped early; `pages_written` pages made it to disk first.
    Failed {
        cause: ExtractError,
        pages_written: usize,
    },
}

impl DocumentOutcome {
    pub fn pages_written(&self) -> usize {
        match self {
            DocumentOutcome::Extracted { pages, .. } => *pages,
            DocumentOutcome::Failed { pages_written, .. } => *pages_written,
            DocumentOutcome::Skipped { .. } => 0,
        }
    }
}

#[derive(Debug)]
pub struct DocumentReport {
    pub source: PathBuf,
    pub outcome: DocumentOutcome,
}

/// Totals for one run, in source order.
#[derive(Debug)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub documents: Vec<DocumentReport>,
    pub total_extracted: usize,
    /// Sources whose base name repeats an earlier source in the same run.
    pub name_collisions: Vec<PathBuf>,
}

impl RunSummary {
    fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            documents: Vec::new(),
            total_extracted: 0,
            name_collisions: Vec::new(),
        }
    }

    fn record(&mut self, source: &Path, outcome: DocumentOutcome) {
        self.total_extracted += outcome.pages_written();
        self.documents.push(DocumentReport {
            source: source.to_path_buf(),
            outcome,
        });
    }

    pub fn skipped(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.outcome, DocumentOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.documents
            .iter()
            .filter(|d| matches!(d.outcome, DocumentOutcome::Failed { .. }))
            .count()
    }

    pub fn already_present(&self) -> usize {
        self.documents
            .iter()
            .map(|d| match d.outcome {
                DocumentOutcome::Extracted { already_present, .. } => already_present,
                _ => 0,
            })
            .sum()
    }
}

/// Warns about and returns the reason `source` cannot be processed, if any.
fn check_source(source: &Path) -> Option<SkipReason> {
    if !source.exists() {
        warn!("'{}' not found, skipping", source.display());
        return Some(SkipReason::MissingSourceFile);
    }
    if !source.is_file() {
        warn!("'{}' is not a regular file, skipping", source.display());
        return Some(SkipReason::NotAFile);
    }
    None
}

/// Rasterizes the leading pages of each source document into JPEG files.
pub struct PageExtractor<R> {
    config: ExtractionConfig,
    renderer: R,
}

impl<R: DocumentRenderer> PageExtractor<R> {
    pub fn new(config: ExtractionConfig, renderer: R) -> Self {
        Self { config, renderer }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Processes every source in order. Never fails: per-document problems
    /// are logged and recorded in the summary.
    pub fn run(&self, sources: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::new(&self.config.output_dir);

        let output_unavailable = ensure_output_dir(&self.config.output_dir).err().map(|e| {
            error!("{e}");
            match e {
                ExtractError::OutputDir { reason, .. } => reason,
                other => other.to_string(),
            }
        });

        let mut seen: HashMap<String, &Path> = HashMap::new();
        for source in sources {
            if let Some(reason) = check_source(source) {
                summary.record(source, DocumentOutcome::Skipped { reason });
                continue;
            }

            let base = base_identifier(source);
            if let Some(first) = seen.get(&base).copied() {
                warn!(
                    "'{}' and '{}' both write {base}_page_*.jpg; the later pages replace the earlier ones",
                    first.display(),
                    source.display()
                );
                summary.name_collisions.push(source.clone());
            } else {
                seen.insert(base, source.as_path());
            }

            let outcome = match &output_unavailable {
                Some(reason) =>
                    DocumentOutcome::Failed {
                        cause: ExtractError::OutputDir {
                            path: self.config.output_dir.clone(),
                            reason: reason.clone(),
                        },
                        pages_written: 0,
                    },
                None => self.extract_file(source),
            };
            summary.record(source, outcome);
        }

        info!(
            "{} page(s) saved to '{}'",
            summary.total_extracted,
            summary.output_dir.display()
        );
        summary
    }

    /// Extracts one document into the output directory, which must exist.
    pub fn extract_document(&self, source: &Path) -> DocumentOutcome {
        match check_source(source) {
            Some(reason) => DocumentOutcome::Skipped { reason },
            None => self.extract_file(source),
        }
    }

    fn extract_file(&self, source: &Path) -> DocumentOutcome {
        let base = base_identifier(source);
        info!("Processing book: {base}");

        let doc = match self.renderer.open(source) {
            Ok(doc) => doc,
            Err(e) => {
                error!("error processing '{}': {e}", source.display());
                return DocumentOutcome::Failed { cause: e, pages_written: 0 };
            }
        };

        let total = doc.page_count();
        let count = total.min(self.config.max_pages);
        info!("{total} page(s) in total, extracting the first {count}");

        let pb = self.progress_bar(count, &base);
        let mut written = 0;
        let mut already_present = 0;

        for index in 0..count {
            let output_path = self.config.output_dir.join(page_file_name(&base, index));

            if self.config.skip_existing && output_path.is_file() {
                debug!("keeping existing {}", output_path.display());
                already_present += 1;
                pb.inc(1);
                continue;
            }

            let saved = doc
                .render_page(index, self.config.dpi)
                .and_then(|img| save_jpeg(&output_path, &img, self.config.quality));
            if let Err(e) = saved {
                pb.abandon();
                error!("error processing '{}': {e}", source.display());
                return DocumentOutcome::Failed { cause: e, pages_written: written };
            }

            debug!("wrote {}", output_path.display());
            written += 1;
            pb.inc(1);
        }

        pb.finish_and_clear();
        DocumentOutcome::Extracted { pages: written, already_present }
    }

    fn progress_bar(&self, len: usize, base: &str) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}"
            )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ")
        );
        pb.set_message(base.to_string());
        pb
    }
}
