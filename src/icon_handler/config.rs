//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `GeneratorConfig`，保证运行时行为可观测、可调整、可测试。
//! 其中缩放档位（quality / balanced / speed）作为高层语义，映射到底层滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供与命令行默认值一致的配置。
//! - `ResizeQuality` 负责档位字符串解析与反向输出。
//! - `apply_resize_quality` 将档位转换为具体滤镜。

use std::path::PathBuf;

use image::imageops::FilterType;

use super::IconError;

/// 默认背景去除亮度阈值。
pub const DEFAULT_THRESHOLD: u8 = 240;

/// 社交预览图 JPEG 质量。
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// 源图像素上限，与 Pillow 抛出 `DecompressionBombError` 的界限一致（2 × 89_478_485）。
pub const DEFAULT_MAX_SOURCE_PIXELS: u64 = 178_956_970;

/// 图标生成配置。
///
/// 字段覆盖了输出位置、透明变体、源图像素上限与编码参数。
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// 输出目录，不存在时自动创建。
    pub output_dir: PathBuf,
    /// 是否额外生成去背景的透明变体。
    pub transparent: bool,
    /// 背景判定阈值：R/G/B 三通道都大于该值即视为背景。
    pub threshold: u8,
    /// 缩放滤镜策略。
    pub resize_filter: FilterType,
    /// `og-image.jpg` 的 JPEG 质量（1~100）。
    pub jpeg_quality: u8,
    /// 源图像素上限（`width * height`），只用来拒绝解压炸弹。
    pub max_source_pixels: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            transparent: false,
            threshold: DEFAULT_THRESHOLD,
            resize_filter: FilterType::Lanczos3,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_source_pixels: DEFAULT_MAX_SOURCE_PIXELS,
        }
    }
}

/// 缩放质量档位（面向用户语义）。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与速度平衡
/// - `Speed`：优先速度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeQuality {
    Quality,
    Balanced,
    Speed,
}

impl ResizeQuality {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use site_icons::icon_handler::ResizeQuality;
    ///
    /// let q = ResizeQuality::parse("Balanced")?;
    /// assert_eq!(q.as_str(), "balanced");
    /// # Ok::<(), site_icons::icon_handler::IconError>(())
    /// ```
    pub fn parse(value: &str) -> Result<Self, IconError> {
        match value.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(IconError::InvalidFormat(format!(
                "未知缩放档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl GeneratorConfig {
    /// 应用指定缩放档位到实际滤镜。
    pub fn apply_resize_quality(&mut self, quality: ResizeQuality) {
        self.resize_filter = match quality {
            ResizeQuality::Quality => FilterType::Lanczos3,
            ResizeQuality::Balanced => FilterType::Triangle,
            ResizeQuality::Speed => FilterType::Nearest,
        };
    }

    /// 校验组合参数是否可用。
    ///
    /// 阈值本身是 `u8`，天然落在 0~255，这里只检查 JPEG 质量与像素上限。
    pub fn validate(&self) -> Result<(), IconError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(IconError::InvalidFormat(format!(
                "jpeg_quality 必须在 1~100 之间，当前为 {}",
                self.jpeg_quality
            )));
        }
        if self.max_source_pixels == 0 {
            return Err(IconError::InvalidFormat("max_source_pixels 不能为 0".to_string()));
        }
        Ok(())
    }
}
