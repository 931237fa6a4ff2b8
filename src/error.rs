//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError` 枚举，作为命令入口与 `main` 之间唯一的错误类型。
//! 只有“整次运行无法继续”的错误会以 `AppError` 的形式出现：
//! 源图无法加载、输出目录不可用、参数非法。单个产物的失败只进生成报告。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `IconError` 提供 `From` 转换，无需手动 map。

use crate::icon_handler::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标生成链路中的致命错误（主要是源图加载）
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 输出目录不可用
    #[error("输出目录不可用: {0}")]
    Storage(String),

    /// 命令行参数非法
    #[error("参数错误: {0}")]
    InvalidArgument(String),
}
