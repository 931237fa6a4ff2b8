//! # 缩放与合成流水线模块
//!
//! ## 设计思路
//!
//! 所有产物共用三种像素操作：
//! 1. 等比缩放到目标框内（结果永远不超出目标框）
//! 2. 居中贴到指定尺寸的画布上
//! 3. 按亮度阈值把近白背景变成全透明
//!
//! ## 实现思路
//!
//! 缩放优先走 `fast_image_resize`，失败时回退 `image::imageops::resize`，两者输出尺寸一致。

use fast_image_resize as fr;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use super::IconError;

/// 计算等比缩放后的尺寸。
///
/// `scale = min(W / w, H / h)`，结果向下取整，且每一维至少 1 像素。
pub fn fit_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_width, src_height) = source;
    let (target_width, target_height) = target;
    if src_width == 0 || src_height == 0 {
        return (0, 0);
    }

    let width_ratio = target_width as f64 / src_width as f64;
    let height_ratio = target_height as f64 / src_height as f64;
    let scale = width_ratio.min(height_ratio);

    let width = ((src_width as f64 * scale).floor() as u32).clamp(1, target_width.max(1));
    let height = ((src_height as f64 * scale).floor() as u32).clamp(1, target_height.max(1));
    (width, height)
}

/// 居中偏移：`((W - w) / 2, (H - h) / 2)`，整数除法。
///
/// 差值为奇数时多出的一像素留在右侧/下侧。
pub fn center_offset(canvas: (u32, u32), content: (u32, u32)) -> (u32, u32) {
    (
        canvas.0.saturating_sub(content.0) / 2,
        canvas.1.saturating_sub(content.1) / 2,
    )
}

/// 等比缩放，使图像恰好落在目标框内。
pub fn resize_to_fit(
    image: &RgbaImage,
    target: (u32, u32),
    filter: FilterType,
) -> Result<RgbaImage, IconError> {
    let (target_width, target_height) = fit_dimensions(image.dimensions(), target);
    if target_width == 0 || target_height == 0 {
        return Err(IconError::ResourceLimit(format!(
            "无法缩放空图像：{}x{}",
            image.width(),
            image.height()
        )));
    }

    fast_resize(image, target_width, target_height, filter).or_else(|err| {
        log::warn!("⚠️ fast_image_resize 缩放失败，回退 imageops::resize：{}", err);
        Ok(imageops::resize(image, target_width, target_height, filter))
    })
}

/// 直接在两块 RGBA 缓冲之间缩放，源图只借用不复制。
fn fast_resize(
    image: &RgbaImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RgbaImage, IconError> {
    let src = fr::images::ImageRef::new(
        image.width(),
        image.height(),
        image.as_raw(),
        fr::PixelType::U8x4,
    )
    .map_err(|e| IconError::Decode(format!("源图缓冲不可用：{}", e)))?;

    let mut resized = RgbaImage::new(width, height);
    {
        let mut dst =
            fr::images::Image::from_slice_u8(width, height, &mut *resized, fr::PixelType::U8x4)
                .map_err(|e| IconError::Decode(format!("目标缓冲不可用：{}", e)))?;

        let options = fr::ResizeOptions::new().resize_alg(resize_alg(filter));
        fr::Resizer::new()
            .resize(&src, &mut dst, &options)
            .map_err(|e| IconError::Decode(format!("缩放到 {}x{} 失败：{}", width, height, e)))?;
    }

    Ok(resized)
}

/// `image` 滤镜到 `fast_image_resize` 算法的映射；`Nearest` 走真正的最近邻。
fn resize_alg(filter: FilterType) -> fr::ResizeAlg {
    let convolution = match filter {
        FilterType::Nearest => return fr::ResizeAlg::Nearest,
        FilterType::Triangle => fr::FilterType::Bilinear,
        FilterType::CatmullRom => fr::FilterType::CatmullRom,
        FilterType::Gaussian => fr::FilterType::Mitchell,
        FilterType::Lanczos3 => fr::FilterType::Lanczos3,
    };
    fr::ResizeAlg::Convolution(convolution)
}

/// 把内容居中贴到全透明画布上，按内容自身 alpha 混合。
pub fn center_on_canvas(content: &RgbaImage, canvas_size: (u32, u32)) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(canvas_size.0, canvas_size.1, Rgba([0, 0, 0, 0]));
    let (x, y) = center_offset(canvas_size, content.dimensions());
    imageops::overlay(&mut canvas, content, x as i64, y as i64);
    canvas
}

/// 背景判定：R/G/B 三通道都严格大于阈值。
pub fn is_background(pixel: &Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r > threshold && g > threshold && b > threshold
}

/// 背景像素替换为全透明白色，其余像素原样保留。
///
/// 结果再次应用同一阈值不会变化。
pub fn remove_background(image: &RgbaImage, threshold: u8) -> RgbaImage {
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        if is_background(pixel, threshold) {
            *pixel = Rgba([255, 255, 255, 0]);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn fit_dimensions_landscape_into_square() {
        assert_eq!(fit_dimensions((400, 300), (180, 180)), (180, 135));
        assert_eq!(fit_dimensions((400, 300), (16, 16)), (16, 12));
    }

    #[test]
    fn fit_dimensions_portrait_into_wide_box() {
        assert_eq!(fit_dimensions((100, 400), (1200, 200)), (50, 200));
    }

    #[test]
    fn fit_dimensions_upscales_small_source() {
        assert_eq!(fit_dimensions((10, 10), (512, 512)), (512, 512));
    }

    #[test]
    fn fit_dimensions_never_collapses_to_zero() {
        assert_eq!(fit_dimensions((1000, 1), (16, 16)), (16, 1));
    }

    #[test]
    fn center_offset_truncates_odd_padding() {
        assert_eq!(center_offset((180, 180), (180, 135)), (0, 22));
        assert_eq!(center_offset((16, 16), (16, 12)), (0, 2));
    }

    #[test]
    fn resize_to_fit_rejects_empty_image() {
        let empty = RgbaImage::new(0, 0);
        assert!(matches!(
            resize_to_fit(&empty, (16, 16), FilterType::Lanczos3),
            Err(IconError::ResourceLimit(_))
        ));
    }

    #[test]
    fn resize_to_fit_keeps_solid_color() {
        let source = RgbaImage::from_pixel(40, 30, Rgba([200, 10, 10, 255]));
        let resized = resize_to_fit(&source, (16, 16), FilterType::Lanczos3).expect("resize");
        assert_eq!(resized.dimensions(), (16, 12));
        let [r, g, b, a] = resized.get_pixel(8, 6).0;
        assert!(r.abs_diff(200) <= 2 && g.abs_diff(10) <= 2 && b.abs_diff(10) <= 2);
        assert!(a >= 253);
    }

    #[test]
    fn speed_profile_uses_nearest_neighbour() {
        assert!(matches!(resize_alg(FilterType::Nearest), fr::ResizeAlg::Nearest));
        assert!(matches!(
            resize_alg(FilterType::Lanczos3),
            fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3)
        ));
    }

    #[test]
    fn nearest_resize_keeps_hard_edges() {
        let source = RgbaImage::from_fn(4, 4, |x, _| {
            if x < 2 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });

        let resized = resize_to_fit(&source, (2, 2), FilterType::Nearest).expect("resize");

        assert_eq!(resized.dimensions(), (2, 2));
        for pixel in resized.pixels() {
            assert!(pixel.0 == [0, 0, 0, 255] || pixel.0 == [255, 255, 255, 255]);
        }
        assert_ne!(resized.get_pixel(0, 0), resized.get_pixel(1, 0));
    }

    #[test]
    fn center_on_canvas_leaves_padding_transparent() {
        let content = RgbaImage::from_pixel(180, 135, Rgba([1, 2, 3, 255]));
        let canvas = center_on_canvas(&content, (180, 180));

        assert_eq!(canvas.dimensions(), (180, 180));
        assert_eq!(canvas.get_pixel(0, 21).0[3], 0);
        assert_eq!(canvas.get_pixel(0, 22).0, [1, 2, 3, 255]);
        assert_eq!(canvas.get_pixel(179, 156).0, [1, 2, 3, 255]);
        assert_eq!(canvas.get_pixel(179, 157).0[3], 0);
    }

    #[test]
    fn remove_background_only_clears_pixels_above_threshold() {
        let mut image = RgbaImage::from_pixel(3, 1, Rgba([250, 250, 250, 255]));
        image.put_pixel(1, 0, Rgba([250, 240, 250, 255]));
        image.put_pixel(2, 0, Rgba([0, 0, 0, 255]));

        let cleared = remove_background(&image, 240);

        assert_eq!(cleared.get_pixel(0, 0).0, [255, 255, 255, 0]);
        assert_eq!(cleared.get_pixel(1, 0).0, [250, 240, 250, 255]);
        assert_eq!(cleared.get_pixel(2, 0).0, [0, 0, 0, 255]);
    }

    proptest! {
        #[test]
        fn fit_dimensions_stays_inside_target(
            w in 1u32..4000,
            h in 1u32..4000,
            tw in 1u32..1300,
            th in 1u32..1300,
        ) {
            let (rw, rh) = fit_dimensions((w, h), (tw, th));
            prop_assert!(rw >= 1 && rh >= 1);
            prop_assert!(rw <= tw && rh <= th);
            // 至少一维贴边（取整误差 1 像素内）
            prop_assert!(tw - rw <= 1 || th - rh <= 1 || rw == 1 || rh == 1);
        }

        #[test]
        fn center_offset_plus_content_fits_canvas(
            cw in 1u32..1300,
            ch in 1u32..1300,
            fw in 0u32..1300,
            fh in 0u32..1300,
        ) {
            let rw = fw.min(cw);
            let rh = fh.min(ch);
            let (x, y) = center_offset((cw, ch), (rw, rh));
            prop_assert!(x + rw <= cw);
            prop_assert!(y + rh <= ch);
            prop_assert_eq!(x, (cw - rw) / 2);
            prop_assert_eq!(y, (ch - rh) / 2);
        }

        #[test]
        fn remove_background_is_idempotent(
            pixels in proptest::collection::vec(any::<[u8; 4]>(), 1..64),
            threshold in any::<u8>(),
        ) {
            let width = pixels.len() as u32;
            let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
            let image = RgbaImage::from_raw(width, 1, raw).expect("buffer length matches");

            let once = remove_background(&image, threshold);
            let twice = remove_background(&once, threshold);
            prop_assert_eq!(once, twice);
        }
    }
}
