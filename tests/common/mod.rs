#![allow(dead_code)]

use image::{Rgb, RgbImage};
use tileswap::api::CaptchaContent;
use tileswap::geometry::{compute_tile_layout, TileLayout};
use tileswap::raster::{self, ImageExtension};

pub const A: [u8; 3] = [10, 20, 30];
pub const B: [u8; 3] = [110, 20, 30];

/// Paints every cell of `layout` with a flat colour.
pub fn paint_layout(layout: &TileLayout, colors: &[[u8; 3]]) -> RgbImage {
    assert_eq!(colors.len(), layout.tiles.len());
    let mut img = RgbImage::new(layout.width, layout.height);
    for (tile, color) in layout.tiles.iter().zip(colors) {
        for y in tile.y..tile.y + tile.height {
            for x in tile.x..tile.x + tile.width {
                img.put_pixel(x, y, Rgb(*color));
            }
        }
    }
    img
}

/// `n`×`n` grid of flat blocks, each `tile_px` square.
pub fn block_image(tile_px: u32, n: usize, colors: &[[u8; 3]]) -> RgbImage {
    let side = tile_px * n as u32;
    paint_layout(&compute_tile_layout(side, side, n), colors)
}

/// Smooth ramp: red follows x, green follows y, blue follows both.
pub fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 4) as u8, (y * 4) as u8, ((x + y) * 2) as u8])
    })
}

pub fn content_for(img: &RgbImage, steps: Vec<i64>, ext: ImageExtension) -> CaptchaContent {
    CaptchaContent {
        status: None,
        extension: ext,
        image: Some(raster::encode_base64(img, ext).expect("encode fixture")),
        steps,
        track: None,
    }
}
