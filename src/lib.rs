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
//! Rasterizes the leading pages of PDF documents into numbered JPEG images.
//!
//! ```no_run
//! use pdf_pages::{ ExtractionConfig, HayroRenderer, PageExtractor };
//! use std::path::PathBuf;
//!
//! let config = ExtractionConfig::new("v2_data/pages").with_max_pages(100).with_dpi(200);
//! let extractor = PageExtractor::new(config, HayroRenderer::new());
//! let summary = extractor.run(&[PathBuf::from("bookChess1.pdf")]);
//! println!("{} pages extracted", summary.total_extracted);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod naming;
pub mod output;
pub mod pdf;
pub mod renderer;

pub use config::ExtractionConfig;
pub use error::{ ExtractError, Result };
pub use extractor::{ DocumentOutcome, DocumentReport, PageExtractor, RunSummary, SkipReason };
pub use pdf::HayroRenderer;
pub use renderer::{ DocumentRenderer, OpenDocument };
