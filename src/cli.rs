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
use clap::Parser;
use std::path::PathBuf;

use crate::config::{ default_sources, ConfigFile, ExtractionConfig };
use crate::error::Result;

const LONG_ABOUT: &str =
    "\
Rasterizes the first pages of each PDF document into numbered JPEG images,
ready for annotation. Pages are written as <book>_page_001.jpg, <book>_page_002.jpg, ...
Missing or unreadable documents are reported and skipped; the run always completes.

Settings are layered: built-in defaults, then the --config file, then flags.


Copyright (C) 2025 Chianti GALLY

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

#[derive(Parser, Debug)]
#[command(
    name = "pdf-pages",
    version,
    about = "Rasterizes the first pages of PDF documents into numbered JPEG images.",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    /// TOML config file (sources, output_dir, max_pages, dpi, quality, skip_existing)
    #[arg(short = 'c', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output directory [default: v2_data/pages]
    #[arg(short = 'o', long, value_hint = clap::ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,

    /// Maximum pages extracted per document [default: 100]
    #[arg(short = 'm', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Rendering resolution in dots per inch [default: 200]
    #[arg(short = 'd', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub dpi: Option<u32>,

    /// JPEG quality 1-100 [default: 95]
    #[arg(short = 'q', long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Keep pages that already exist in the output directory instead of overwriting them
    #[arg(long, action)]
    pub skip_existing: bool,

    /// Hide the per-document progress bar
    #[arg(long, action)]
    pub no_progress: bool,

    /// Log every written page
    #[arg(short = 'v', long, action)]
    pub verbose: bool,

    /// PDF files to process, in order [default: bookChess1.pdf .. bookChess4.pdf]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub sources: Vec<PathBuf>,
}

impl Cli {
    /// Layers defaults, the config file and the flags into the run settings.
    pub fn resolve(&self) -> Result<(ExtractionConfig, Vec<PathBuf>)> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)?,
            None => ConfigFile::default(),
        };

        let mut config = file.apply(ExtractionConfig::default());
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages as usize;
        }
        if let Some(dpi) = self.dpi {
            config.dpi = dpi;
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        config.skip_existing |= self.skip_existing;
        config.progress = !self.no_progress;
        config.validate()?;

        let sources = if !self.sources.is_empty() {
            self.sources.clone()
        } else {
            file.sources.unwrap_or_else(default_sources)
        };

        Ok((config, sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn no_arguments_gives_defaults() {
        let cli = Cli::try_parse_from(["pdf-pages"]).unwrap();
        let (config, sources) = cli.resolve().unwrap();
        assert_eq!(config, ExtractionConfig::default());
        assert_eq!(sources, default_sources());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "pdf-pages",
            "-o",
            "out",
            "-m",
            "10",
            "--dpi",
            "300",
            "--skip-existing",
            "--no-progress",
            "x.pdf",
            "y.pdf",
        ]).unwrap();
        let (config, sources) = cli.resolve().unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_pages, 10);
        assert_eq!(config.dpi, 300);
        assert!(config.skip_existing);
        assert!(!config.progress);
        assert_eq!(sources, vec![PathBuf::from("x.pdf"), PathBuf::from("y.pdf")]);
    }

    #[test]
    fn zero_values_are_refused_by_the_parser() {
        assert!(Cli::try_parse_from(["pdf-pages", "--max-pages", "0"]).is_err());
        assert!(Cli::try_parse_from(["pdf-pages", "--dpi", "0"]).is_err());
        assert!(Cli::try_parse_from(["pdf-pages", "--quality", "101"]).is_err());
    }

    #[test]
    fn flags_win_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.toml");
        fs::write(
            &path,
            "sources = [\"one.pdf\"]\noutput_dir = \"from-file\"\ndpi = 150\nmax_pages = 5\n"
        ).unwrap();

        let cli = Cli::try_parse_from([
            "pdf-pages",
            "--config",
            path.to_str().unwrap(),
            "--dpi",
            "72",
        ]).unwrap();
        let (config, sources) = cli.resolve().unwrap();

        assert_eq!(config.dpi, 72);
        assert_eq!(config.max_pages, 5);
        assert_eq!(config.output_dir, PathBuf::from("from-file"));
        assert_eq!(sources, vec![PathBuf::from("one.pdf")]);
    }

    #[test]
    fn invalid_config_file_values_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.toml");
        fs::write(&path, "max_pages = 0\n").unwrap();

        let cli = Cli::try_parse_from(["pdf-pages", "-c", path.to_str().unwrap()]).unwrap();
        assert!(cli.resolve().is_err());
    }
}
