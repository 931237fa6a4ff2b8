//! # 命令入口（薄封装）
//!
//! 只做入参适配与错误上转：准备输出目录、构建生成器、执行生成。

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::storage::ensure_output_dir;

use super::{GenerationReport, GeneratorConfig, IconGenerator, ResizeQuality};

/// 一次生成请求的参数。
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub logo_path: PathBuf,
    pub output_dir: PathBuf,
    pub transparent: bool,
    pub threshold: u8,
    pub quality: ResizeQuality,
}

/// 从源图生成整套站点图标。
///
/// 源图无法加载或输出目录不可用时返回 `Err`；单个产物失败记录在报告中。
pub fn generate_icons(request: &GenerateRequest) -> Result<GenerationReport, AppError> {
    let output_dir = ensure_output_dir(&request.output_dir)?;

    let mut config = GeneratorConfig {
        output_dir,
        transparent: request.transparent,
        threshold: request.threshold,
        ..GeneratorConfig::default()
    };
    config.apply_resize_quality(request.quality);
    log::debug!(
        "缩放档位：{}（filter={:?}），透明变体：{}，阈值：{}",
        request.quality.as_str(),
        config.resize_filter,
        config.transparent,
        config.threshold
    );

    let generator =
        IconGenerator::new(config).map_err(|e| AppError::InvalidArgument(e.to_string()))?;

    Ok(generator.generate(&request.logo_path)?)
}

/// 便捷入口：使用默认缩放档位。
pub fn generate_icons_with_defaults(
    logo_path: &Path,
    output_dir: &Path,
    transparent: bool,
    threshold: u8,
) -> Result<GenerationReport, AppError> {
    generate_icons(&GenerateRequest {
        logo_path: logo_path.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        transparent,
        threshold,
        quality: ResizeQuality::Quality,
    })
}
