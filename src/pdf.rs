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
use hayro::{ render, InterpreterSettings, Pdf, RenderSettings };
use image::{ DynamicImage, ImageFormat };
use std::path::Path;
use std::sync::Arc;

use crate::error::{ ExtractError, Result };
use crate::renderer::{ DocumentRenderer, OpenDocument };

/// PDF user space has 72 units per inch.
const POINTS_PER_INCH: f32 = 72.0;

/// hayro pixmaps are addressed with `u16` coordinates.
const MAX_PIXMAP_SIDE: f32 = u16::MAX as f32;

/// Pixel size of a `width` x `height` point page at `scale`, or the reason
/// hayro cannot render it.
fn pixel_size(width: f32, height: f32, scale: f32) -> std::result::Result<(f32, f32), String> {
    let (w, h) = (width * scale, height * scale);
    if !(w >= 1.0 && h >= 1.0) {
        return Err(format!("page is smaller than one pixel at this resolution ({w:.2}x{h:.2} px)"));
    }
    if w > MAX_PIXMAP_SIDE || h > MAX_PIXMAP_SIDE {
        return Err(
            format!("page exceeds {} px per side at this resolution ({w:.0}x{h:.0} px)", u16::MAX)
        );
    }
    Ok((w, h))
}

/// [`DocumentRenderer`] backed by hayro.
#[derive(Debug, Default, Clone, Copy)]
pub struct HayroRenderer;

impl HayroRenderer {
    pub fn new() -> Self {
        Self
    }
}

pub struct HayroDocument {
    pdf: Pdf,
}

impl DocumentRenderer for HayroRenderer {
    type Document = HayroDocument;

    fn open(&self, path: &Path) -> Result<HayroDocument> {
        let file = std::fs::read(path).map_err(|e| ExtractError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let data = Arc::new(file);
        let pdf = Pdf::new(data).map_err(|e| ExtractError::Open {
            path: path.to_path_buf(),
            reason: format!("{e:?}"),
        })?;

        Ok(HayroDocument { pdf })
    }
}

impl OpenDocument for HayroDocument {
    fn page_count(&self) -> usize {
        self.pdf.pages().len()
    }

    fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage> {
        let pages = self.pdf.pages();
        let page = pages.get(index).ok_or(ExtractError::PageOutOfRange(index, pages.len()))?;

        let scale = (dpi as f32) / POINTS_PER_INCH;
        let (width, height) = page.render_dimensions();
        pixel_size(width, height, scale).map_err(|reason| ExtractError::Render {
            page: index,
            reason,
        })?;

        let interpreter_settings = InterpreterSettings::default();
        let render_settings = RenderSettings {
            x_scale: scale,
            y_scale: scale,
            ..Default::default()
        };

        let pixmap = render(page, &interpreter_settings, &render_settings);
        // Round-trip through PNG to get an owned RGBA buffer.
        image::load_from_memory_with_format(&pixmap.take_png(), ImageFormat::Png).map_err(|e| {
            ExtractError::Render {
                page: index,
                reason: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use std::io::Write;

    fn blank_pdf(pages: usize, size: u32) -> Vec<u8> {
        sized_pdf(&vec![(size, size); pages])
    }

    /// Builds a PDF with one blank page per `(width, height)` entry, in points,
    /// and a correct cross-reference table.
    fn sized_pdf(sizes: &[(u32, u32)]) -> Vec<u8> {
        let pages = sizes.len();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                (0..pages)
                    .map(|i| format!("{} 0 R", i + 3))
                    .collect::<Vec<_>>()
                    .join(" "),
                pages
            )
        ];
        for (w, h) in sizes {
            objects.push(format!("<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {w} {h}] >>"));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref
            ).as_bytes()
        );
        out
    }

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn opens_and_counts_pages() {
        let file = write_temp(&blank_pdf(3, 72));
        let doc = HayroRenderer::new().open(file.path()).unwrap();
        assert_eq!(doc.page_count(), 3);
    }

    #[test]
    fn render_scales_with_dpi() {
        let file = write_temp(&blank_pdf(1, 72));
        let doc = HayroRenderer::new().open(file.path()).unwrap();

        let (w, h) = doc.render_page(0, 144).unwrap().dimensions();
        assert!((142..=146).contains(&w), "width {w}");
        assert!((142..=146).contains(&h), "height {h}");
    }

    #[test]
    fn render_past_last_page_fails() {
        let file = write_temp(&blank_pdf(1, 72));
        let doc = HayroRenderer::new().open(file.path()).unwrap();
        assert!(matches!(doc.render_page(1, 72), Err(ExtractError::PageOutOfRange(1, 1))));
    }

    #[test]
    fn page_below_one_pixel_is_a_render_error() {
        let file = write_temp(&blank_pdf(1, 36));
        let doc = HayroRenderer::new().open(file.path()).unwrap();
        assert!(matches!(doc.render_page(0, 1), Err(ExtractError::Render { page: 0, .. })));
    }

    #[test]
    fn page_beyond_pixmap_limit_is_a_render_error() {
        let file = write_temp(&sized_pdf(&[(14400, 2)]));
        let doc = HayroRenderer::new().open(file.path()).unwrap();
        assert!(matches!(doc.render_page(0, 400), Err(ExtractError::Render { page: 0, .. })));
    }

    #[test]
    fn one_pixel_page_still_renders() {
        let file = write_temp(&blank_pdf(1, 72));
        let doc = HayroRenderer::new().open(file.path()).unwrap();
        let (w, h) = doc.render_page(0, 1).unwrap().dimensions();
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn pixel_size_bounds() {
        assert!(pixel_size(36.0, 36.0, 1.0 / 72.0).is_err());
        assert!(pixel_size(14400.0, 2.0, 400.0 / 72.0).is_err());
        assert!(pixel_size(0.0, 100.0, 1.0).is_err());
        assert_eq!(pixel_size(72.0, 144.0, 2.0), Ok((144.0, 288.0)));
    }

    #[test]
    fn garbage_is_an_open_error() {
        let file = write_temp(b"this is not a pdf at all");
        let err = HayroRenderer::new().open(file.path()).err().unwrap();
        assert!(matches!(err, ExtractError::Open { .. }));
    }

    #[test]
    fn unreadable_path_is_an_open_error() {
        let err = HayroRenderer::new().open(Path::new("/nonexistent/book.pdf")).err().unwrap();
        assert!(matches!(err, ExtractError::Open { .. }));
    }
}
