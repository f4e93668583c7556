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
//! Output file naming.
//!
//! Every extracted page is written as `{base}_page_{NNN}.jpg`, where `base` is
//! the source file name without directory or extension and `NNN` is the
//! 1-based page number zero-padded to three digits.

use std::path::Path;

/// Extension of every page image.
pub const PAGE_EXTENSION: &str = "jpg";

/// Fallback identifier for paths without a file name (e.g. `..`).
const FALLBACK_BASE: &str = "document";

/// Strips the directory and the last extension from `path`.
pub fn base_identifier(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_BASE.to_string())
}

/// File name for the page at zero-based `page_index`.
pub fn page_file_name(base: &str, page_index: usize) -> String {
    format!("{}_page_{:03}.{}", base, page_index + 1, PAGE_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_strips_directory_and_extension() {
        assert_eq!(base_identifier(Path::new("books/bookChess1.pdf")), "bookChess1");
        assert_eq!(base_identifier(Path::new("bookChess2.pdf")), "bookChess2");
    }

    #[test]
    fn base_keeps_inner_dots() {
        assert_eq!(base_identifier(Path::new("/tmp/vol.2.final.pdf")), "vol.2.final");
    }

    #[test]
    fn base_without_extension() {
        assert_eq!(base_identifier(Path::new("scans/README")), "README");
    }

    #[test]
    fn base_falls_back_when_no_file_name() {
        assert_eq!(base_identifier(Path::new("..")), "document");
    }

    #[test]
    fn page_numbers_are_one_based_and_padded() {
        assert_eq!(page_file_name("a", 0), "a_page_001.jpg");
        assert_eq!(page_file_name("a", 41), "a_page_042.jpg");
        assert_eq!(page_file_name("a", 99), "a_page_100.jpg");
    }

    #[test]
    fn wide_page_numbers_are_not_truncated() {
        assert_eq!(page_file_name("big", 999), "big_page_1000.jpg");
    }
}
