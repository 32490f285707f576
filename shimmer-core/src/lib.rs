//! # Shimmer Core
//!
//! 骨架屏扫光效果的核心引擎。
//!
//! ## 架构概述
//!
//! `shimmer-core` 是纯逻辑核心，不依赖任何窗口、IO 或渲染后端。
//! 宿主容器把生命周期事件和绘制周期转发给引擎，引擎决定是否动画、
//! 计算几何，并对宿主提供的画布发出一条绘制指令：
//!
//! ```text
//! Host                                  ShimmerEngine
//!   │── on_attach / on_detach ─────────────►│
//!   │── on_visibility_changed(visible) ────►│
//!   │── advance(dt) ───────────────────────►│ clock tick
//!   │◄─────────────────── request_redraw() ─│
//!   │── on_draw_pass(canvas, w, h) ────────►│ geometry
//!   │◄──────────── canvas.draw_rect(paint) ─│
//! ```
//!
//! ## 模块结构
//!
//! - [`config`]：属性解析与默认值
//! - [`color`]：RGBA 颜色与内置调色板
//! - [`clock`]：重复计时器（`Clock` trait 与帧驱动实现）
//! - [`geometry`]：仿射矩阵与扫光几何
//! - [`gradient`]：五段光带渐变
//! - [`render`]：画布、画笔与宿主回调
//! - [`engine`]：状态机与绘制逻辑
//! - [`error`]：错误类型

pub mod clock;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gradient;
pub mod render;

// 重导出核心类型
pub use clock::{Clock, ClockState, CycleSpec, EasingFunction, FrameClock};
pub use color::{Rgba, palette};
pub use config::{AttrValue, AttributeSet, Dimension, DisplayMetrics, ShimmerConfig};
pub use engine::{ShimmerEngine, ShimmerState};
pub use error::ColorParseError;
pub use geometry::{Affine, Rect, SweepGeometry, Vec2};
pub use gradient::{GradientStop, LinearGradient};
pub use render::{
    BlendMode, Canvas, DeviceShader, DrawCommand, RecordingCanvas, ShimmerHost, ShimmerPaint,
};
