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
//! Rendering seam between the extractor and the PDF backend.

use image::DynamicImage;
use std::path::Path;

use crate::error::Result;

/// Opens source documents for rasterization.
pub trait DocumentRenderer {
    type Document: OpenDocument;

    /// Fails with [`ExtractError::Open`](crate::error::ExtractError::Open) on
    /// unreadable, corrupt or unsupported input.
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// A successfully opened document. Dropping it releases its resources.
pub trait OpenDocument {
    fn page_count(&self) -> usize;

    /// Rasterizes the page at zero-based `index` at `dpi` dots per inch.
    fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage>;
}
