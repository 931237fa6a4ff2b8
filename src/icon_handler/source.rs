//! # 目标规格与中间模型
//!
//! ## 设计思路
//!
//! 将“输出目标表”和“流水线中间结果”解耦：
//! - `TargetSpec` 表示一个命名输出及其像素尺寸
//! - `ICON_TARGETS` 等常量是固定目标表
//! - `LoadedSource` 表示已加载、已归一化为 RGBA 的源图

use image::RgbaImage;

/// 命名输出目标：文件名 + 像素尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSpec {
    pub file_name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl TargetSpec {
    pub const fn new(file_name: &'static str, width: u32, height: u32) -> Self {
        Self {
            file_name,
            width,
            height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// 六个固定尺寸的 PNG 图标，居中放在透明画布上。
pub const ICON_TARGETS: [TargetSpec; 6] = [
    TargetSpec::new("favicon-16x16.png", 16, 16),
    TargetSpec::new("favicon-32x32.png", 32, 32),
    TargetSpec::new("apple-touch-icon.png", 180, 180),
    TargetSpec::new("android-chrome-192x192.png", 192, 192),
    TargetSpec::new("android-chrome-512x512.png", 512, 512),
    TargetSpec::new("mstile-150x150.png", 150, 150),
];

/// 多分辨率图标容器。
pub const ICO_FILE_NAME: &str = "favicon.ico";
pub const ICO_FRAME_SIZES: [(u32, u32); 3] = [(16, 16), (32, 32), (48, 48)];

/// 社交预览图。
pub const BANNER_TARGET: TargetSpec = TargetSpec::new("og-image.jpg", 1200, 630);
pub const BANNER_TRANSPARENT_FILE_NAME: &str = "og-image-transparent.png";

/// Safari 固定标签页矢量轮廓（工作分辨率 64×64）。
pub const SILHOUETTE_TARGET: TargetSpec = TargetSpec::new("safari-pinned-tab.svg", 64, 64);

/// 透明变体的文件名后缀（插在扩展名之前）。
pub const TRANSPARENT_SUFFIX: &str = "-transparent";

/// 加载阶段输出：归一化后的 RGBA 源图。
///
/// 加载后不再修改，所有产物都从它派生副本。
pub struct LoadedSource {
    pub image: RgbaImage,
    /// 原始文件名主干（不含扩展名），用于透明母版命名。
    pub file_stem: String,
    /// 原始扩展名（不含点），可能为空。
    pub extension: Option<String>,
}

impl LoadedSource {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_targets_have_unique_png_names() {
        let mut names: Vec<_> = ICON_TARGETS.iter().map(|t| t.file_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ICON_TARGETS.len());
        assert!(names.iter().all(|n| n.ends_with(".png")));
    }

    #[test]
    fn apple_touch_icon_is_180_square() {
        let apple = ICON_TARGETS
            .iter()
            .find(|t| t.file_name == "apple-touch-icon.png")
            .expect("apple-touch-icon target should exist");
        assert_eq!(apple.size(), (180, 180));
    }
}
