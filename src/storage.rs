//! 输出目录与文件命名模块
//!
//! # 设计思路
//!
//! 统一管理生成产物的落盘位置与命名规则，目录不存在时自动创建，
//! 透明变体的命名规则也集中在这里，避免各生成步骤各自拼接。
//!
//! # 实现思路
//!
//! - 目录不存在时 `create_dir_all`，已存在的同名文件直接覆盖，不做版本管理。
//! - 所有可能失败的操作均返回 `Result`，不使用 `expect()` / `unwrap()`。

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::icon_handler::TRANSPARENT_SUFFIX;

/// 确保输出目录存在并返回其路径。
///
/// # 返回
/// - `Ok(PathBuf)` — 可写入的输出目录
/// - `Err(AppError::Storage)` — 路径被普通文件占用或无法创建
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf, AppError> {
    if dir.as_os_str().is_empty() {
        return Ok(PathBuf::from("."));
    }

    if dir.exists() {
        if !dir.is_dir() {
            return Err(AppError::Storage(format!(
                "输出路径 '{}' 不是目录",
                dir.display()
            )));
        }
        return Ok(dir.to_path_buf());
    }

    fs::create_dir_all(dir).map_err(|e| {
        AppError::Storage(format!("创建输出目录 '{}' 失败: {}", dir.display(), e))
    })?;
    Ok(dir.to_path_buf())
}

/// 在扩展名前插入后缀：`favicon-16x16.png` → `favicon-16x16-transparent.png`。
pub fn with_suffix(file_name: &str, suffix: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{}{}.{}", stem, suffix, ext),
        _ => format!("{}{}", file_name, suffix),
    }
}

/// 产物的透明变体文件名。
pub fn transparent_name(file_name: &str) -> String {
    with_suffix(file_name, TRANSPARENT_SUFFIX)
}

/// 源图透明母版的文件名：沿用原扩展名，没有扩展名时使用 `png`。
pub fn transparent_master_name(stem: &str, extension: Option<&str>) -> String {
    format!(
        "{}{}.{}",
        stem,
        TRANSPARENT_SUFFIX,
        extension.unwrap_or("png")
    )
}
