//! # 生成报告
//!
//! 每个产物一条记录，失败的产物只记录错误文本，不影响其他产物。
//! `summary_lines` 给命令行输出结束语。

use std::path::{Path, PathBuf};

use super::IconError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactStatus {
    Written,
    /// 写出的是兜底内容（目前只有矢量轮廓会这样）。
    Degraded(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ArtifactOutcome {
    pub file_name: String,
    pub path: PathBuf,
    pub status: ArtifactStatus,
}

impl ArtifactOutcome {
    pub fn is_written(&self) -> bool {
        !matches!(self.status, ArtifactStatus::Failed(_))
    }
}

/// 一次运行的全部结果。
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub outcomes: Vec<ArtifactOutcome>,
    pub transparent: bool,
    pub threshold: u8,
}

impl GenerationReport {
    pub fn new(transparent: bool, threshold: u8) -> Self {
        Self {
            outcomes: Vec::new(),
            transparent,
            threshold,
        }
    }

    /// 记录单个产物的结果，并输出对应日志。
    pub fn record(&mut self, path: &Path, result: Result<(), IconError>) {
        let status = match result {
            Ok(()) => {
                log::info!("✅ 已生成：{}", path.display());
                ArtifactStatus::Written
            }
            Err(err) => {
                log::warn!("❌ 生成 {} 失败：{}", path.display(), err);
                ArtifactStatus::Failed(err.into())
            }
        };
        self.push(path, status);
    }

    pub fn record_degraded(&mut self, path: &Path, note: impl Into<String>) {
        let note = note.into();
        log::warn!("⚠️ 已生成兜底内容：{}（{}）", path.display(), note);
        self.push(path, ArtifactStatus::Degraded(note));
    }

    fn push(&mut self, path: &Path, status: ArtifactStatus) {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.outcomes.push(ArtifactOutcome {
            file_name,
            path: path.to_path_buf(),
            status,
        });
    }

    pub fn outcome(&self, file_name: &str) -> Option<&ArtifactOutcome> {
        self.outcomes.iter().find(|o| o.file_name == file_name)
    }

    pub fn written(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| o.is_written())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, ArtifactStatus::Failed(_)))
    }

    /// 结束时展示给用户的文字。
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for outcome in &self.outcomes {
            match &outcome.status {
                ArtifactStatus::Written => {
                    lines.push(format!("Generated: {}", outcome.path.display()))
                }
                ArtifactStatus::Degraded(note) => lines.push(format!(
                    "Generated (fallback): {} - {}",
                    outcome.path.display(),
                    note
                )),
                ArtifactStatus::Failed(err) => {
                    lines.push(format!("Error generating {}: {}", outcome.file_name, err))
                }
            }
        }

        if self.outcome("safari-pinned-tab.svg").is_some_and(|o| o.is_written()) {
            lines.push("Note: The SVG may need manual refinement for better results.".to_string());
        }

        lines.push(String::new());
        lines.push("Icon generation complete!".to_string());

        if self.transparent {
            lines.push(String::new());
            lines.push("Generated transparent versions with background removed.".to_string());
            lines.push(format!(
                "Threshold used for background removal: {}",
                self.threshold
            ));
            lines.push(
                "You may need to adjust the threshold for optimal results with different images."
                    .to_string(),
            );
        }

        lines.push(String::new());
        lines.push("Note: favicon.ico is included but for best results, consider using".to_string());
        lines.push(
            "a dedicated favicon generator such as https://realfavicongenerator.net/ for production."
                .to_string(),
        );

        lines
    }
}
