//! # 图标生成模块（icon_handler）
//!
//! ## 设计思路
//!
//! 该模块将“源图加载校验 → 缩放合成 → 各类产物编码落盘 → 汇总报告”
//! 按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `commands`：入参适配 + 输出目录准备（薄封装）
//! - `handler`：编排整条流水线，逐产物隔离错误
//! - `loader`：本地文件加载与安全校验
//! - `pipeline`：等比缩放、居中、去背景
//! - `banner` / `ico` / `silhouette`：三类特殊产物
//! - `config/error/source/report`：配置、错误、目标表、结果
//!
//! ## 新同事快速上手
//!
//! ```text
//! main.rs（命令行解析）
//!    ↓
//! commands.rs（输出目录 + 配置）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（存在性 / 体积 / 签名 / 像素上限 → RGBA）
//!    ├─ pipeline.rs（缩放 + 居中 + 去背景）
//!    ├─ ico.rs（16/32/48 三帧容器）
//!    ├─ banner.rs（渐变 + logo → JPEG）
//!    └─ silhouette.rs（二值化 → 合并矩形 → SVG，带两级兜底）
//!    ↓
//! GenerationReport → main 打印结束语
//! ```

pub mod banner;
pub mod commands;
mod config;
mod error;
mod handler;
pub mod ico;
mod loader;
pub mod pipeline;
mod report;
pub mod silhouette;
mod source;

pub use commands::{generate_icons, generate_icons_with_defaults, GenerateRequest};
pub use config::{
    GeneratorConfig, ResizeQuality, DEFAULT_JPEG_QUALITY, DEFAULT_MAX_SOURCE_PIXELS, DEFAULT_THRESHOLD,
};
pub use error::IconError;
pub use handler::IconGenerator;
pub use report::{ArtifactOutcome, ArtifactStatus, GenerationReport};
pub use source::{
    LoadedSource, TargetSpec, BANNER_TARGET, BANNER_TRANSPARENT_FILE_NAME, ICON_TARGETS,
    ICO_FILE_NAME, ICO_FRAME_SIZES, SILHOUETTE_TARGET, TRANSPARENT_SUFFIX,
};
