//! Thin owned-buffer layer over the `image` crate.
//!
//! Every function hands back a fresh buffer; inputs are borrowed or moved,
//! never changed behind the caller's back.

use crate::error::{SolveResult, SolverError};
use crate::geometry::Tile;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use strum::{Display, EnumString};

/// Output encoding requested by the content bundle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum ImageExtension {
    #[serde(alias = "jpg")]
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
    #[default]
    #[strum(to_string = "png")]
    Png,
}

impl ImageExtension {
    pub fn format(self) -> ImageFormat {
        match self {
            ImageExtension::Jpeg => ImageFormat::Jpeg,
            ImageExtension::Png => ImageFormat::Png,
        }
    }

    pub fn file_suffix(self) -> &'static str {
        match self {
            ImageExtension::Jpeg => "jpg",
            ImageExtension::Png => "png",
        }
    }
}

fn ensure_dimensions(width: u32, height: u32) -> SolveResult<()> {
    if width == 0 || height == 0 {
        return Err(SolverError::InvalidImage(format!(
            "dimensions {}x{} are unusable",
            width, height
        )));
    }
    Ok(())
}

/// Decodes any supported raster and flattens it to 8-bit RGB.
pub fn decode_bytes(bytes: &[u8]) -> SolveResult<RgbImage> {
    let img = image::load_from_memory(bytes)?.to_rgb8();
    ensure_dimensions(img.width(), img.height())?;
    Ok(img)
}

pub fn decode_base64(data: &str) -> SolveResult<RgbImage> {
    let bytes = STANDARD.decode(data.trim())?;
    decode_bytes(&bytes)
}

/// Wraps raw interleaved RGB samples; the length must be exactly `width * height * 3`.
pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> SolveResult<RgbImage> {
    ensure_dimensions(width, height)?;
    let expected = width as u64 * height as u64 * 3;
    if samples.len() as u64 != expected {
        return Err(SolverError::InvalidImage(format!(
            "{} samples do not match {}x{} RGB ({} expected)",
            samples.len(),
            width,
            height,
            expected
        )));
    }
    RgbImage::from_raw(width, height, samples).ok_or_else(|| {
        SolverError::InvalidImage(format!("{}x{} RGB buffer rejected", width, height))
    })
}

pub fn blank_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::new(width, height)
}

/// Copies the region covered by `tile` out of `img`.
pub fn extract(img: &RgbImage, tile: &Tile) -> SolveResult<RgbImage> {
    if tile.is_empty() {
        return Err(SolverError::Render(format!(
            "cannot extract empty region {:?}",
            tile
        )));
    }
    if tile.x + tile.width > img.width() || tile.y + tile.height > img.height() {
        return Err(SolverError::Render(format!(
            "region {:?} exceeds {}x{} source",
            tile,
            img.width(),
            img.height()
        )));
    }
    Ok(imageops::crop_imm(img, tile.x, tile.y, tile.width, tile.height).to_image())
}

/// Nearest-neighbour resize. Same-size requests are a plain copy so that
/// pixel provenance is exact.
pub fn resize_nearest(img: &RgbImage, width: u32, height: u32) -> SolveResult<RgbImage> {
    if width == 0 || height == 0 || img.width() == 0 || img.height() == 0 {
        return Err(SolverError::Render(format!(
            "cannot resize {}x{} to {}x{}",
            img.width(),
            img.height(),
            width,
            height
        )));
    }
    if img.dimensions() == (width, height) {
        return Ok(img.clone());
    }
    Ok(imageops::resize(img, width, height, FilterType::Nearest))
}

/// Places `tile` with its top-left corner at (`x`, `y`) and returns the canvas.
pub fn composite(mut canvas: RgbImage, tile: &RgbImage, x: u32, y: u32) -> SolveResult<RgbImage> {
    if x + tile.width() > canvas.width() || y + tile.height() > canvas.height() {
        return Err(SolverError::Render(format!(
            "{}x{} tile at ({}, {}) overflows {}x{} canvas",
            tile.width(),
            tile.height(),
            x,
            y,
            canvas.width(),
            canvas.height()
        )));
    }
    imageops::replace(&mut canvas, tile, x as i64, y as i64);
    Ok(canvas)
}

pub fn encode(img: &RgbImage, ext: ImageExtension) -> SolveResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ext.format())
        .map_err(|e| SolverError::Encode(format!("{} encode failed: {}", ext, e)))?;
    Ok(out.into_inner())
}

pub fn encode_base64(img: &RgbImage, ext: ImageExtension) -> SolveResult<String> {
    Ok(STANDARD.encode(encode(img, ext)?))
}
