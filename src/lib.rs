//! # 站点图标生成工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  main.rs   命令行解析 (clap) + 日志初始化 (env_logger)    │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↓ GenerateRequest
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↓                                                  │
//! │  ┌─ error ────────── AppError (致命错误)                  │
//! │  │                                                       │
//! │  ├─ storage ──────── 输出目录 + 透明变体命名              │
//! │  │                                                       │
//! │  └─ icon_handler ─── 源图 → PNG / ICO / JPEG / SVG        │
//! │      ├─ pipeline       等比缩放·居中·去背景               │
//! │      ├─ banner         渐变社交预览图                     │
//! │      ├─ ico            多分辨率容器                       │
//! │      └─ silhouette     矢量轮廓（两级兜底）               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，只承载整次运行无法继续的错误 |
//! | [`icon_handler`] | 加载源图并生成全部产物，单个产物失败互不影响 |
//! | [`storage`] | 输出目录的创建与产物命名 |

pub mod error;
pub mod icon_handler;
pub mod storage;
