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
//! Extraction settings and the optional TOML config file.

use serde::Deserialize;
use std::fs;
use std::path::{ Path, PathBuf };

use crate::error::{ ExtractError, Result };

pub const DEFAULT_SOURCES: [&str; 4] = [
    "bookChess1.pdf",
    "bookChess2.pdf",
    "bookChess3.pdf",
    "bookChess4.pdf",
];
pub const DEFAULT_OUTPUT_DIR: &str = "v2_data/pages";
pub const DEFAULT_MAX_PAGES: usize = 100;
/// 200 DPI keeps text legible without bloating files.
pub const DEFAULT_DPI: u32 = 200;
pub const DEFAULT_QUALITY: u8 = 95;

/// Immutable settings for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionConfig {
    pub output_dir: PathBuf,
    /// Upper bound on pages taken from the start of each document.
    pub max_pages: usize,
    pub dpi: u32,
    /// JPEG quality 1–100
    pub quality: u8,
    /// Leave already-extracted pages untouched instead of overwriting them.
    pub skip_existing: bool,
    pub progress: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            max_pages: DEFAULT_MAX_PAGES,
            dpi: DEFAULT_DPI,
            quality: DEFAULT_QUALITY,
            skip_existing: false,
            progress: true,
        }
    }
}

impl ExtractionConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_skip_existing(mut self, skip_existing: bool) -> Self {
        self.skip_existing = skip_existing;
        self
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(ExtractError::InvalidConfig("max_pages must be at least 1".into()));
        }
        if self.dpi == 0 {
            return Err(ExtractError::InvalidConfig("dpi must be at least 1".into()));
        }
        if !(1..=100).contains(&self.quality) {
            return Err(
                ExtractError::InvalidConfig(
                    format!("quality must be between 1 and 100, got {}", self.quality)
                )
            );
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ExtractError::InvalidConfig("output_dir must not be empty".into()));
        }
        Ok(())
    }
}

/// On-disk config. Every key is optional; missing keys keep the built-in default.
///
/// ```toml
/// sources = ["bookChess1.pdf", "bookChess2.pdf"]
/// output_dir = "v2_data/pages"
/// max_pages = 100
/// dpi = 200
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub sources: Option<Vec<PathBuf>>,
    pub output_dir: Option<PathBuf>,
    pub max_pages: Option<usize>,
    pub dpi: Option<u32>,
    pub quality: Option<u8>,
    pub skip_existing: Option<bool>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ExtractError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&text).map_err(|reason| ExtractError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        toml::from_str(text).map_err(|e| e.message().to_string())
    }

    /// Overlays the keys present in the file onto `base`.
    pub fn apply(&self, base: ExtractionConfig) -> ExtractionConfig {
        ExtractionConfig {
            output_dir: self.output_dir.clone().unwrap_or(base.output_dir),
            max_pages: self.max_pages.unwrap_or(base.max_pages),
            dpi: self.dpi.unwrap_or(base.dpi),
            quality: self.quality.unwrap_or(base.quality),
            skip_existing: self.skip_existing.unwrap_or(base.skip_existing),
            progress: base.progress,
        }
    }
}

pub fn default_sources() -> Vec<PathBuf> {
    DEFAULT_SOURCES.iter().map(PathBuf::from).collect()
}
