//! # 社交预览图模块
//!
//! 1200×630 的不透明画布，从左到右橙→红线性渐变，logo 缩放到画布高度 30% 的框内，
//! 水平居中、垂直中心落在上半部分的中线上。

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::IconError;

/// 渐变起点颜色（#f97316）。
pub const GRADIENT_START: Rgb<u8> = Rgb([249, 115, 22]);
/// 渐变终点颜色（#ef4444）。
pub const GRADIENT_END: Rgb<u8> = Rgb([239, 68, 68]);

/// logo 高度占画布高度的比例。
const LOGO_HEIGHT_RATIO: f64 = 0.3;

/// 第 `x` 列的渐变颜色，按 `x / width` 线性插值后截断为整数。
pub fn gradient_color(x: u32, width: u32, start: Rgb<u8>, end: Rgb<u8>) -> Rgb<u8> {
    let ratio = if width == 0 {
        0.0
    } else {
        x as f64 / width as f64
    };
    let blend = |a: u8, b: u8| (a as f64 * (1.0 - ratio) + b as f64 * ratio) as u8;
    Rgb([
        blend(start[0], end[0]),
        blend(start[1], end[1]),
        blend(start[2], end[2]),
    ])
}

/// 生成水平线性渐变，每一列是一条纯色竖线。
pub fn linear_gradient(size: (u32, u32), start: Rgb<u8>, end: Rgb<u8>) -> RgbImage {
    let (width, height) = size;
    let mut gradient = RgbImage::new(width, height);
    for x in 0..width {
        let color = gradient_color(x, width, start, end);
        for y in 0..height {
            gradient.put_pixel(x, y, color);
        }
    }
    gradient
}

/// logo 允许占用的框：画布宽 × 画布高的 30%。
pub fn logo_box(banner: (u32, u32)) -> (u32, u32) {
    (banner.0, (banner.1 as f64 * LOGO_HEIGHT_RATIO) as u32)
}

/// logo 左上角坐标：水平居中，垂直中心位于 `H / 4`。
pub fn logo_position(banner: (u32, u32), logo: (u32, u32)) -> (i64, i64) {
    let x = (banner.0 as i64 - logo.0 as i64).div_euclid(2);
    let y = banner.1 as i64 / 4 - logo.1 as i64 / 2;
    (x, y)
}

/// 在渐变背景上按 logo 自身 alpha 贴图，结果完全不透明。
pub fn compose_banner(size: (u32, u32), logo: &RgbaImage) -> RgbImage {
    let gradient = linear_gradient(size, GRADIENT_START, GRADIENT_END);
    let mut canvas = RgbaImage::from_fn(size.0, size.1, |x, y| {
        let Rgb([r, g, b]) = *gradient.get_pixel(x, y);
        Rgba([r, g, b, 255])
    });

    let (x, y) = logo_position(size, logo.dimensions());
    imageops::overlay(&mut canvas, logo, x, y);

    RgbImage::from_fn(size.0, size.1, |x, y| {
        let Rgba([r, g, b, _]) = *canvas.get_pixel(x, y);
        Rgb([r, g, b])
    })
}

/// 同样的构图放在全透明画布上（用于透明变体）。
pub fn compose_transparent_banner(size: (u32, u32), logo: &RgbaImage) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(size.0, size.1, Rgba([0, 0, 0, 0]));
    let (x, y) = logo_position(size, logo.dimensions());
    imageops::overlay(&mut canvas, logo, x, y);
    canvas
}

/// 以指定质量写出 JPEG。
pub fn save_jpeg(image: &RgbImage, path: &Path, quality: u8) -> Result<(), IconError> {
    let mut buffer = Vec::new();
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .encode_image(image)
        .map_err(|e| IconError::Encode(format!("JPEG 编码失败：{}", e)))?;

    std::fs::write(path, &buffer)
        .map_err(|e| IconError::FileSystem(format!("无法写入 {}：{}", path.display(), e)))
}
