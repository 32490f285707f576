//! # Shimmer Host
//!
//! 无窗口宿主：为 `shimmer-core` 提供像素表面、骨架占位内容和帧循环。
//!
//! ## 模块结构
//!
//! - [`config`]：预览配置（JSON）
//! - [`raster`]：RGBA 像素画布与合成
//! - [`skeleton`]：占位布局
//! - [`view`]：宿主容器，转发生命周期事件
//! - [`preview`]：帧序列与绘制轨迹输出

pub mod config;
pub mod error;
pub mod preview;
pub mod raster;
pub mod skeleton;
pub mod view;

pub use config::{ConfigError, OutputConfig, PreviewConfig, SurfaceConfig};
pub use error::PreviewError;
pub use preview::{FrameRecord, frame_file_name, render_frames, trace, write_trace};
pub use raster::PixelCanvas;
pub use skeleton::{LayoutKind, SkeletonBlock, SkeletonLayout};
pub use view::ShimmerView;
