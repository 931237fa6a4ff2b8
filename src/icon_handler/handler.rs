//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconGenerator` 只负责流程编排，处理链路固定为：
//! 1. 加载源图并归一化为 RGBA（唯一的致命阶段）
//! 2. 可选：输出源图透明母版
//! 3. 六个固定尺寸图标（可选透明变体）
//! 4. `favicon.ico` 多分辨率容器
//! 5. `og-image.jpg` 社交预览图（可选透明变体）
//! 6. `safari-pinned-tab.svg` 矢量轮廓
//!
//! ## 实现思路
//!
//! - 第 2~6 步每个产物独立捕获错误并写入 `GenerationReport`，一个失败不影响其余产物。
//! - 每个产物只尝试一次，不重试。
//! - 记录 `load/icons/ico/banner/svg/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use image::{ImageFormat, RgbaImage};

use super::banner::{compose_banner, compose_transparent_banner, logo_box, save_jpeg};
use super::ico;
use super::pipeline::{center_on_canvas, remove_background, resize_to_fit};
use super::report::GenerationReport;
use super::silhouette::{self, SilhouetteKind};
use super::source::{
    LoadedSource, BANNER_TARGET, BANNER_TRANSPARENT_FILE_NAME, ICON_TARGETS, ICO_FILE_NAME,
    ICO_FRAME_SIZES, SILHOUETTE_TARGET,
};
use super::{GeneratorConfig, IconError};
use crate::storage::{transparent_master_name, transparent_name};

/// 图标生成器。
///
/// 持有一份不可变配置，单线程顺序执行，不跨步骤共享资源。
pub struct IconGenerator {
    pub(super) config: GeneratorConfig,
}

impl IconGenerator {
    /// 根据配置创建生成器，非法配置直接拒绝。
    ///
    /// # 示例
    /// ```rust
    /// use site_icons::icon_handler::{GeneratorConfig, IconGenerator};
    ///
    /// let generator = IconGenerator::new(GeneratorConfig::default())?;
    /// assert_eq!(generator.config().threshold, 240);
    /// # Ok::<(), site_icons::icon_handler::IconError>(())
    /// ```
    pub fn new(config: GeneratorConfig) -> Result<Self, IconError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// 处理主入口：从源图生成全部产物。
    ///
    /// 只有源图加载失败时返回 `Err`，此时不会写出任何文件。
    pub fn generate(&self, logo_path: &Path) -> Result<GenerationReport, IconError> {
        let total_start = Instant::now();
        log::info!("🎨 开始生成图标 - 源图: {}", logo_path.display());

        let load_start = Instant::now();
        let source = self.load_source(logo_path).inspect_err(|err| {
            log::error!("❌ 源图加载失败，终止本次生成：{}", err);
        })?;
        let load_ms = load_start.elapsed().as_millis();
        let (source_width, source_height) = source.dimensions();
        log::debug!("源图 RGBA 尺寸：{}x{}", source_width, source_height);

        let mut report = GenerationReport::new(self.config.transparent, self.config.threshold);

        if self.config.transparent {
            self.write_transparent_master(&source, &mut report);
        }

        let icons_start = Instant::now();
        self.write_fixed_icons(&source.image, &mut report);
        let icons_ms = icons_start.elapsed().as_millis();

        let ico_start = Instant::now();
        self.write_ico(&source.image, &mut report);
        let ico_ms = ico_start.elapsed().as_millis();

        let banner_start = Instant::now();
        self.write_banner(&source.image, &mut report);
        let banner_ms = banner_start.elapsed().as_millis();

        let svg_start = Instant::now();
        self.write_silhouette(&source.image, &mut report);
        let svg_ms = svg_start.elapsed().as_millis();

        log::info!(
            "⏱️ 图标生成耗时 - load: {}ms, icons: {}ms, ico: {}ms, banner: {}ms, svg: {}ms, total: {}ms（失败 {} 个）",
            load_ms,
            icons_ms,
            ico_ms,
            banner_ms,
            svg_ms,
            total_start.elapsed().as_millis(),
            report.failures().count()
        );

        Ok(report)
    }

    fn write_transparent_master(&self, source: &LoadedSource, report: &mut GenerationReport) {
        let name = transparent_master_name(&source.file_stem, source.extension.as_deref());
        let path = self.config.output_dir.join(name);
        let masked = remove_background(&source.image, self.config.threshold);
        report.record(&path, save_inferred(&masked, &path));
    }

    fn write_fixed_icons(&self, source: &RgbaImage, report: &mut GenerationReport) {
        for target in ICON_TARGETS.iter() {
            let path = self.config.output_dir.join(target.file_name);

            let resized = match resize_to_fit(source, target.size(), self.config.resize_filter) {
                Ok(resized) => resized,
                Err(err) => {
                    report.record(&path, Err(err));
                    continue;
                }
            };

            let icon = center_on_canvas(&resized, target.size());
            report.record(&path, save_png(&icon, &path));

            if self.config.transparent {
                let transparent_path = self
                    .config
                    .output_dir
                    .join(transparent_name(target.file_name));
                let masked = remove_background(&resized, self.config.threshold);
                let icon = center_on_canvas(&masked, target.size());
                report.record(&transparent_path, save_png(&icon, &transparent_path));
            }
        }
    }

    fn write_ico(&self, source: &RgbaImage, report: &mut GenerationReport) {
        let path = self.config.output_dir.join(ICO_FILE_NAME);
        let result = ico::encode_container(source, &ICO_FRAME_SIZES, self.config.resize_filter)
            .and_then(|bytes| {
                std::fs::write(&path, &bytes).map_err(|e| {
                    IconError::FileSystem(format!("无法写入 {}：{}", path.display(), e))
                })
            });
        report.record(&path, result);
    }

    fn write_banner(&self, source: &RgbaImage, report: &mut GenerationReport) {
        let size = BANNER_TARGET.size();
        let path = self.config.output_dir.join(BANNER_TARGET.file_name);

        let logo = match resize_to_fit(source, logo_box(size), self.config.resize_filter) {
            Ok(logo) => logo,
            Err(err) => {
                report.record(&path, Err(err));
                return;
            }
        };

        let og_image = compose_banner(size, &logo);
        let written = save_jpeg(&og_image, &path, self.config.jpeg_quality);
        let banner_ok = written.is_ok();
        report.record(&path, written);

        if self.config.transparent && banner_ok {
            let transparent_path = self.config.output_dir.join(BANNER_TRANSPARENT_FILE_NAME);
            let masked = remove_background(&logo, self.config.threshold);
            let transparent = compose_transparent_banner(size, &masked);
            report.record(&transparent_path, save_png(&transparent, &transparent_path));
        }

        log::debug!("社交预览图 logo 尺寸：{}x{}", logo.width(), logo.height());
    }

    fn write_silhouette(&self, source: &RgbaImage, report: &mut GenerationReport) {
        let path = self.config.output_dir.join(SILHOUETTE_TARGET.file_name);
        match silhouette::write(source, &path, self.config.resize_filter) {
            Ok(SilhouetteKind::Traced) => report.record(&path, Ok(())),
            Ok(SilhouetteKind::FullCanvas) => {
                report.record_degraded(&path, "pixel scan failed, filled the whole canvas")
            }
            Ok(SilhouetteKind::Placeholder) => {
                report.record_degraded(&path, "silhouette failed, wrote placeholder square")
            }
            Err(err) => report.record(&path, Err(err)),
        }
    }
}

fn map_save_error(path: &Path, err: image::ImageError) -> IconError {
    match err {
        image::ImageError::IoError(e) => {
            IconError::FileSystem(format!("无法写入 {}：{}", path.display(), e))
        }
        other => IconError::Encode(format!("编码 {} 失败：{}", path.display(), other)),
    }
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<(), IconError> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| map_save_error(path, e))
}

/// 按扩展名推断格式保存（透明母版沿用源图格式）。
///
/// JPEG 没有 alpha 通道，直接拒绝，不落盘任何半成品。
fn save_inferred(image: &RgbaImage, path: &Path) -> Result<(), IconError> {
    if let Ok(ImageFormat::Jpeg) = ImageFormat::from_path(path) {
        return Err(IconError::Encode(format!(
            "{} 是 JPEG，无法保存透明通道",
            path.display()
        )));
    }
    image.save(path).map_err(|e| map_save_error(path, e))
}
