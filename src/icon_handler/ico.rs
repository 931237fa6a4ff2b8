//! # 多分辨率图标容器模块
//!
//! `favicon.ico` 内嵌 16 / 32 / 48 三帧。每帧是源图等比缩放后的原始结果（不补画布），
//! 以 PNG 形式存入容器。

use image::ExtendedColorType;
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::FilterType;
use image::RgbaImage;

use super::IconError;
use super::pipeline::resize_to_fit;

/// 按给定尺寸依次缩放源图，并编码成一个 ICO 容器。
pub fn encode_container(
    source: &RgbaImage,
    sizes: &[(u32, u32)],
    filter: FilterType,
) -> Result<Vec<u8>, IconError> {
    let resized = sizes
        .iter()
        .map(|&size| resize_to_fit(source, size, filter))
        .collect::<Result<Vec<_>, _>>()?;

    let frames = resized
        .iter()
        .map(|frame| {
            IcoFrame::as_png(
                frame.as_raw(),
                frame.width(),
                frame.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|e| {
                IconError::Encode(format!(
                    "ICO 帧编码失败（{}x{}）：{}",
                    frame.width(),
                    frame.height(),
                    e
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut buffer = Vec::new();
    IcoEncoder::new(&mut buffer)
        .encode_images(&frames)
        .map_err(|e| IconError::Encode(format!("ICO 容器编码失败：{}", e)))?;

    Ok(buffer)
}
