//! # 矢量轮廓模块（Safari pinned tab）
//!
//! ## 设计思路
//!
//! 源图缩到 64×64 工作画布内，转灰度后按固定阈值二值化，再把墨迹区域转成 SVG。
//! 不逐像素输出方块，而是按行扫描出水平游程，相邻行上完全相同的游程合并为一个矩形。
//!
//! ## 兜底策略
//!
//! - 扫描途中取不到像素：整张画布输出一个黑色矩形（`FullCanvas`）
//! - 其他任何失败：输出固定的 64×64 占位文档，中心一个 40×40 方块（`Placeholder`）
//!
//! 因此 `render` 永远返回一份合法的 SVG 文档。

use std::fmt::Write as _;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbaImage};

use super::IconError;
use super::pipeline::resize_to_fit;

/// 二值化阈值：亮度不超过该值的像素视为墨迹。
pub const BINARIZE_THRESHOLD: u8 = 200;

/// 工作画布边长。
pub const WORKING_SIZE: (u32, u32) = (64, 64);

const INK: u8 = 0;
const PAPER: u8 = 255;

const PLACEHOLDER_SVG: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="64px" height="64px" viewBox="0 0 64 64" version="1.1" xmlns="http://www.w3.org/2000/svg">
  <rect x="12" y="12" width="40" height="40" fill="#000000" />
</svg>
"##;

/// 轮廓文档是按哪条路径生成的。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SilhouetteKind {
    /// 正常逐行扫描合并。
    Traced,
    /// 扫描中途取像素失败，整块填充。
    FullCanvas,
    /// 整体失败后的固定占位图。
    Placeholder,
}

#[derive(Debug, Clone)]
pub struct Silhouette {
    pub svg: String,
    pub kind: SilhouetteKind,
}

/// 轮廓中的一个实心矩形（工作画布坐标）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// 二值化：亮度 `> threshold` 为白纸，其余为墨迹。
pub fn binarize(gray: &GrayImage, threshold: u8) -> GrayImage {
    let mut binary = gray.clone();
    for pixel in binary.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > threshold { PAPER } else { INK };
    }
    binary
}

/// 按声明的宽高扫描二值图，返回合并后的墨迹矩形（按 y、x 排序）。
///
/// 声明尺寸超出实际缓冲时返回 `None`。
pub fn trace_rects(binary: &GrayImage, width: u32, height: u32) -> Option<Vec<InkRect>> {
    let mut finished = Vec::new();
    let mut open: Vec<InkRect> = Vec::new();

    for y in 0..height {
        let runs = row_runs(binary, y, width)?;
        let mut next_open = Vec::with_capacity(runs.len());

        for (x, run_width) in runs {
            match open.iter().position(|r| r.x == x && r.width == run_width) {
                Some(index) => {
                    let mut rect = open.swap_remove(index);
                    rect.height += 1;
                    next_open.push(rect);
                }
                None => next_open.push(InkRect {
                    x,
                    y,
                    width: run_width,
                    height: 1,
                }),
            }
        }

        finished.append(&mut open);
        open = next_open;
    }
    finished.append(&mut open);

    finished.sort_unstable_by_key(|r| (r.y, r.x));
    Some(finished)
}

/// 一行中连续墨迹的 `(起点, 长度)`。
fn row_runs(binary: &GrayImage, y: u32, width: u32) -> Option<Vec<(u32, u32)>> {
    let mut runs = Vec::new();
    let mut start: Option<u32> = None;

    for x in 0..width {
        let Luma([value]) = *binary.get_pixel_checked(x, y)?;
        match (value == INK, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push((s, x - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, width - s));
    }

    Some(runs)
}

fn svg_header(out: &mut String, width: u32, height: u32) {
    let _ = writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    let _ = writeln!(
        out,
        r#"<svg width="{w}px" height="{h}px" viewBox="0 0 {w} {h}" version="1.1" xmlns="http://www.w3.org/2000/svg">"#,
        w = width,
        h = height
    );
}

/// 把二值图转为 SVG；扫描失败时退化为整块填充。
pub fn trace_document(binary: &GrayImage, width: u32, height: u32) -> Silhouette {
    let mut svg = String::new();
    svg_header(&mut svg, width, height);

    match trace_rects(binary, width, height) {
        Some(rects) => {
            svg.push_str("  <g fill=\"#000000\">\n");
            for r in rects {
                let _ = writeln!(
                    svg,
                    r#"    <rect x="{}" y="{}" width="{}" height="{}" />"#,
                    r.x, r.y, r.width, r.height
                );
            }
            svg.push_str("  </g>\n</svg>\n");
            Silhouette {
                svg,
                kind: SilhouetteKind::Traced,
            }
        }
        None => {
            log::warn!(
                "⚠️ 轮廓扫描越界（声明 {}x{}，实际 {}x{}），改用整块填充",
                width,
                height,
                binary.width(),
                binary.height()
            );
            let _ = writeln!(
                svg,
                r##"  <rect x="0" y="0" width="{}" height="{}" fill="#000000" />"##,
                width, height
            );
            svg.push_str("</svg>\n");
            Silhouette {
                svg,
                kind: SilhouetteKind::FullCanvas,
            }
        }
    }
}

pub fn placeholder() -> Silhouette {
    Silhouette {
        svg: PLACEHOLDER_SVG.to_string(),
        kind: SilhouetteKind::Placeholder,
    }
}

fn try_render(source: &RgbaImage, filter: FilterType) -> Result<Silhouette, IconError> {
    let small = resize_to_fit(source, WORKING_SIZE, filter)?;
    let (width, height) = small.dimensions();
    log::debug!("轮廓工作尺寸：{}x{}", width, height);

    let binary = binarize(&imageops::grayscale(&small), BINARIZE_THRESHOLD);
    Ok(trace_document(&binary, width, height))
}

/// 从源图生成轮廓文档，任何失败都落到占位图。
pub fn render(source: &RgbaImage, filter: FilterType) -> Silhouette {
    match try_render(source, filter) {
        Ok(silhouette) => silhouette,
        Err(err) => {
            log::warn!("⚠️ 轮廓生成失败，使用占位图：{}", err);
            placeholder()
        }
    }
}

/// 生成并写出轮廓；写入失败时再尝试写一次占位图。
pub fn write(source: &RgbaImage, path: &Path, filter: FilterType) -> Result<SilhouetteKind, IconError> {
    let silhouette = render(source, filter);
    match std::fs::write(path, &silhouette.svg) {
        Ok(()) => Ok(silhouette.kind),
        Err(err) => {
            log::warn!("⚠️ 写入轮廓失败，尝试写入占位图：{}", err);
            std::fs::write(path, PLACEHOLDER_SVG)
                .map(|()| SilhouetteKind::Placeholder)
                .map_err(|e| {
                    IconError::FileSystem(format!("无法写入占位轮廓 {}：{}", path.display(), e))
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn binary_from_rows(rows: &[&str]) -> GrayImage {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        GrayImage::from_fn(width, height, |x, y| {
            let ink = rows[y as usize].as_bytes()[x as usize] == b'#';
            Luma([if ink { INK } else { PAPER }])
        })
    }

    fn assert_well_formed(svg: &str) {
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<svg "));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<svg").count(), 1);
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count());
    }

    #[test]
    fn binarize_treats_threshold_as_ink() {
        let gray = GrayImage::from_raw(3, 1, vec![200, 201, 0]).expect("buffer");
        let binary = binarize(&gray, BINARIZE_THRESHOLD);
        assert_eq!(binary.into_raw(), vec![INK, PAPER, INK]);
    }

    #[test]
    fn trace_rects_merges_identical_runs_vertically() {
        let binary = binary_from_rows(&[
            "##..#",
            "##..#",
            "##...",
            ".....",
        ]);

        let rects = trace_rects(&binary, 5, 4).expect("in bounds");

        assert_eq!(
            rects,
            vec![
                InkRect { x: 0, y: 0, width: 2, height: 3 },
                InkRect { x: 4, y: 0, width: 1, height: 2 },
            ]
        );
    }

    #[test]
    fn trace_rects_splits_changing_runs() {
        let binary = binary_from_rows(&["###", ".##"]);

        let rects = trace_rects(&binary, 3, 2).expect("in bounds");

        assert_eq!(
            rects,
            vec![
                InkRect { x: 0, y: 0, width: 3, height: 1 },
                InkRect { x: 1, y: 1, width: 2, height: 1 },
            ]
        );
    }

    #[test]
    fn trace_rects_covers_every_ink_pixel_exactly_once() {
        let binary = binary_from_rows(&[
            "#.#.#.",
            "######",
            ".#..#.",
            "##..##",
        ]);
        let rects = trace_rects(&binary, 6, 4).expect("in bounds");

        let mut coverage = vec![0u8; 24];
        for r in &rects {
            for y in r.y..r.y + r.height {
                for x in r.x..r.x + r.width {
                    coverage[(y * 6 + x) as usize] += 1;
                }
            }
        }
        for (i, pixel) in binary.pixels().enumerate() {
            let expected = u8::from(pixel.0[0] == INK);
            assert_eq!(coverage[i], expected, "pixel {}", i);
        }
    }

    #[test]
    fn trace_rects_reports_out_of_bounds_scan() {
        let binary = binary_from_rows(&["##"]);
        assert!(trace_rects(&binary, 4, 4).is_none());
    }

    #[test]
    fn trace_document_falls_back_to_full_canvas() {
        let binary = binary_from_rows(&["##"]);

        let silhouette = trace_document(&binary, 64, 48);

        assert_eq!(silhouette.kind, SilhouetteKind::FullCanvas);
        assert!(silhouette.svg.contains(r#"viewBox="0 0 64 48""#));
        assert!(silhouette.svg.contains(r#"<rect x="0" y="0" width="64" height="48""#));
        assert_well_formed(&silhouette.svg);
    }

    #[test]
    fn render_uses_working_canvas_dimensions() {
        let mut source = RgbaImage::from_pixel(400, 300, Rgba([255, 255, 255, 255]));
        for y in 100..200 {
            for x in 100..300 {
                source.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }

        let silhouette = render(&source, FilterType::Triangle);

        assert_eq!(silhouette.kind, SilhouetteKind::Traced);
        assert!(silhouette.svg.contains(r#"width="64px" height="48px" viewBox="0 0 64 48""#));
        assert!(silhouette.svg.contains("<rect "));
        assert_well_formed(&silhouette.svg);
    }

    #[test]
    fn render_white_source_has_no_ink() {
        let source = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        let silhouette = render(&source, FilterType::Triangle);
        assert_eq!(silhouette.kind, SilhouetteKind::Traced);
        assert!(!silhouette.svg.contains("<rect "));
        assert_well_formed(&silhouette.svg);
    }

    #[test]
    fn render_empty_source_uses_placeholder() {
        let silhouette = render(&RgbaImage::new(0, 0), FilterType::Triangle);

        assert_eq!(silhouette.kind, SilhouetteKind::Placeholder);
        assert!(silhouette.svg.contains(r#"<rect x="12" y="12" width="40" height="40""#));
        assert_well_formed(&silhouette.svg);
    }

    #[test]
    fn write_produces_file_for_empty_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("safari-pinned-tab.svg");

        let kind = write(&RgbaImage::new(0, 0), &path, FilterType::Triangle).expect("write");

        assert_eq!(kind, SilhouetteKind::Placeholder);
        let svg = std::fs::read_to_string(&path).expect("read back");
        assert_well_formed(&svg);
    }
}
