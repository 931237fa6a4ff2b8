//! # 站点图标生成工具 — 命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与结束语输出。
//! 生成逻辑详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use site_icons::icon_handler::{self, GenerateRequest, ResizeQuality, DEFAULT_THRESHOLD};

/// Generate website icon files from a source image
#[derive(Debug, Parser)]
#[command(name = "site-icons", version)]
struct Cli {
    /// Path to the source logo file
    #[arg(value_name = "LOGO")]
    logo_path: PathBuf,

    /// Directory to save generated icons
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Create additional versions with transparent backgrounds
    #[arg(short, long)]
    transparent: bool,

    /// Brightness threshold for background removal (0-255)
    #[arg(long, value_name = "N", default_value_t = DEFAULT_THRESHOLD)]
    threshold: u8,

    /// Resize quality profile: quality, balanced or speed
    #[arg(long, value_name = "PROFILE", default_value = "quality", value_parser = parse_quality)]
    quality: ResizeQuality,
}

fn parse_quality(value: &str) -> Result<ResizeQuality, String> {
    ResizeQuality::parse(value).map_err(String::from)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    println!("Generating icons from {}...", cli.logo_path.display());

    let request = GenerateRequest {
        logo_path: cli.logo_path,
        output_dir: cli.output_dir,
        transparent: cli.transparent,
        threshold: cli.threshold,
        quality: cli.quality,
    };

    match icon_handler::generate_icons(&request) {
        Ok(report) => {
            for line in report.summary_lines() {
                println!("{}", line);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("图标生成失败: {err}");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
