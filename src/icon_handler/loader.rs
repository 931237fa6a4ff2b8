//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 源图是整次运行唯一的致命依赖：读不到、解不开都直接失败，不产出任何文件。
//! 能否解码以解码器为准，签名探测只用来提前拦下“明确不是图片”的文件。
//!
//! ## 实现思路
//!
//! 1. 路径必须是已存在的普通文件
//! 2. `infer` 识别出非图片类型（压缩包、文档……）时拒绝；识别不出则交给解码器
//! 3. 格式先按文件内容猜测，猜不出时沿用扩展名（TGA 等没有魔数的格式靠这一步）
//! 4. 只读 header 尺寸，超过像素上限（解压炸弹）时拒绝
//! 5. 完整解码并归一化为 RGBA，保证后续透明处理总是合法

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::{GenericImageView, ImageReader};

use super::source::LoadedSource;
use super::{IconError, IconGenerator};

impl IconGenerator {
    /// 从本地路径加载源图并归一化为 RGBA。
    pub fn load_source(&self, path: &Path) -> Result<LoadedSource, IconError> {
        log::info!("📁 开始读取源图 - 路径: {}", path.display());

        if !path.is_file() {
            return Err(IconError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        Self::reject_known_non_image(path)?;

        let (header_width, header_height) = Self::open_reader(path)?
            .into_dimensions()
            .map_err(|e| IconError::Decode(format!("无法读取图片尺寸：{}", e)))?;
        self.check_pixel_budget(header_width, header_height)?;

        let mut reader = Self::open_reader(path)?;
        reader.no_limits();
        let decoded = reader
            .decode()
            .map_err(|e| IconError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(IconError::Decode(format!("图片尺寸无效：{}x{}", width, height)));
        }

        let file_stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "logo".to_string());
        let extension = path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .filter(|s| !s.is_empty());

        log::info!("✅ 源图解码成功 - 尺寸: {}x{}", width, height);

        Ok(LoadedSource {
            image: decoded.to_rgba8(),
            file_stem,
            extension,
        })
    }

    /// 打开文件并确定格式：内容可识别时按内容，否则保留扩展名推断的结果。
    fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, IconError> {
        ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| IconError::FileSystem(format!("无法打开图片文件：{}", e)))
    }

    fn reject_known_non_image(path: &Path) -> Result<(), IconError> {
        let kind = infer::get_from_path(path)
            .map_err(|e| IconError::FileSystem(format!("无法读取文件签名：{}", e)))?;

        match kind {
            Some(kind) if kind.matcher_type() != infer::MatcherType::Image => {
                Err(IconError::InvalidFormat(format!(
                    "文件签名不是图片类型：{}",
                    kind.mime_type()
                )))
            }
            Some(kind) => {
                log::debug!("源图签名：{}", kind.mime_type());
                Ok(())
            }
            None => {
                log::debug!("未识别源图签名，交给解码器按扩展名判断");
                Ok(())
            }
        }
    }

    fn check_pixel_budget(&self, width: u32, height: u32) -> Result<(), IconError> {
        let pixels = u64::from(width) * u64::from(height);
        if pixels > self.config.max_source_pixels {
            return Err(IconError::ResourceLimit(format!(
                "图片像素过大：{}x{} = {} 像素（上限 {}）",
                width, height, pixels, self.config.max_source_pixels
            )));
        }
        Ok(())
    }
}
