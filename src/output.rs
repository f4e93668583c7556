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
use image::codecs::jpeg::JpegEncoder;
use image::{ DynamicImage, GenericImageView, ImageEncoder };
use std::fs::{ self, OpenOptions };
use std::io::{ BufWriter, Write };
use std::path::{ Path, PathBuf };

use crate::error::{ ExtractError, Result };

/// Creates `dir` and any missing ancestors. Existing contents are left alone.
pub fn ensure_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| ExtractError::OutputDir {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

fn part_path(output_path: &Path) -> PathBuf {
    output_path.with_extension(
        output_path
            .extension()
            .and_then(|s| s.to_str())
            .map(|e| format!("{}.part", e))
            .unwrap_or_else(|| "part".into())
    )
}

// Removes the .part file unless the rename went through.
struct TempGuard {
    path: PathBuf,
    keep: bool,
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        if !self.keep {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Encodes `img` as JPEG and atomically replaces `output_path` with it.
pub fn save_jpeg(output_path: &Path, img: &DynamicImage, quality: u8) -> Result<()> {
    let tmp_path = part_path(output_path);
    let mut guard = TempGuard {
        path: tmp_path.clone(),
        keep: false,
    };

    write_jpeg(&tmp_path, img, quality).map_err(|e| ExtractError::Encode {
        path: output_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    fs::rename(&tmp_path, output_path)?;
    guard.keep = true;
    Ok(())
}

fn write_jpeg(
    path: &Path,
    img: &DynamicImage,
    quality: u8
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let f = OpenOptions::new().create(true).write(true).truncate(true).open(path)?;
    let mut writer = BufWriter::new(f);

    // JPEG has no alpha channel.
    let (w, h) = img.dimensions();
    let buf = img.to_rgb8();
    let enc = JpegEncoder::new_with_quality(&mut writer, quality);
    enc.write_image(&buf, w, h, image::ExtendedColorType::Rgb8)?;

    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}
