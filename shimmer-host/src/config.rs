//! # Config 模块
//!
//! 预览配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (shimmer.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shimmer_core::{DisplayMetrics, Rgba, ShimmerConfig};
use thiserror::Error;

use crate::skeleton::LayoutKind;

/// 表面边长上限（像素）
const MAX_SURFACE_SIZE: u32 = 8192;

/// 预览配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// 扫光参数
    #[serde(default)]
    pub shimmer: ShimmerConfig,

    /// 表面配置
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,
}

/// 表面配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// 宽度（像素）
    #[serde(default = "default_surface_width")]
    pub width: u32,

    /// 高度（像素）
    #[serde(default = "default_surface_height")]
    pub height: u32,

    /// 屏幕密度（dp → px 倍率）
    #[serde(default = "default_density")]
    pub density: f32,

    /// 背景色，默认透明
    #[serde(default = "default_background")]
    pub background: Rgba,

    /// 占位块颜色
    #[serde(default = "default_block_color")]
    pub block_color: Rgba,

    /// 占位布局
    #[serde(default)]
    pub layout: LayoutKind,
}

/// 输出配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 帧输出目录
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// 帧率
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// 帧数
    #[serde(default = "default_frames")]
    pub frames: u32,
}

// 默认值函数
fn default_surface_width() -> u32 {
    300
}

fn default_surface_height() -> u32 {
    100
}

fn default_density() -> f32 {
    1.0
}

fn default_background() -> Rgba {
    Rgba::TRANSPARENT
}

fn default_block_color() -> Rgba {
    Rgba::from_argb(0xFFE0_E0E0)
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("frames")
}

fn default_fps() -> u32 {
    60
}

fn default_frames() -> u32 {
    // 默认参数下恰好一个周期（1200ms @ 60fps）
    72
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
            density: default_density(),
            background: default_background(),
            block_color: default_block_color(),
            layout: LayoutKind::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            fps: default_fps(),
            frames: default_frames(),
        }
    }
}

impl PreviewConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并输出警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!(?path, "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    tracing::info!(?path, "配置文件加载成功");
                    config
                }
                Err(e) => {
                    tracing::warn!(error = %e, "配置文件解析失败，使用默认配置");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, "配置文件读取失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// 屏幕度量
    pub fn metrics(&self) -> DisplayMetrics {
        DisplayMetrics::new(self.surface.density)
    }

    /// 每帧时长（秒）
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.output.fps.max(1) as f32
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        let surface = &self.surface;
        if surface.width == 0 || surface.height == 0 {
            return Err(ConfigError::ValidationFailed(
                "表面宽高必须大于 0".to_string(),
            ));
        }
        if surface.width > MAX_SURFACE_SIZE || surface.height > MAX_SURFACE_SIZE {
            return Err(ConfigError::ValidationFailed(format!(
                "表面宽高不能超过 {MAX_SURFACE_SIZE}"
            )));
        }
        if !(surface.density.is_finite() && surface.density > 0.0) {
            return Err(ConfigError::ValidationFailed(
                "屏幕密度必须为正数".to_string(),
            ));
        }

        if !self.shimmer.band_width_dp.is_finite() {
            return Err(ConfigError::ValidationFailed(
                "光带宽度必须为有限值".to_string(),
            ));
        }

        if self.output.fps == 0 || self.output.fps > 240 {
            return Err(ConfigError::ValidationFailed(
                "帧率必须在 1 - 240 之间".to_string(),
            ));
        }
        if self.output.frames == 0 {
            return Err(ConfigError::ValidationFailed(
                "帧数必须大于 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
