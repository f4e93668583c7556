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
//! Error types for page extraction.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

#[derive(Error, Debug)]
pub enum ExtractError {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The renderer could not open the document (unreadable, corrupt, unsupported).
    #[error("cannot open '{}': {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    /// A page could not be rasterized.
    #[error("cannot render page {page}: {reason}")]
    Render { page: usize, reason: String },

    /// Page index past the end of the document.
    #[error("page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// The raster could not be encoded or written.
    #[error("cannot write '{}': {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    /// The output directory could not be created.
    #[error("output directory '{}' is unavailable: {reason}", path.display())]
    OutputDir { path: PathBuf, reason: String },

    /// The configuration file could not be read or parsed.
    #[error("invalid config file '{}': {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
