//! # Geometry 模块
//!
//! 扫光几何：向量、矩形、仿射矩阵，以及扫光范围/偏移计算。
//!
//! 所有变换每帧从基本浮点数重新计算，不在帧之间保留可变矩阵对象。

mod affine;
mod sweep;

pub use affine::Affine;
pub use sweep::{SweepGeometry, lerp, sweep_offset, sweep_range};

use serde::Serialize;

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 轴对齐矩形
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// 创建矩形
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// 从原点开始、覆盖整个表面的矩形
    pub const fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// 中心点
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// 是否为空（零面积或非法尺寸）
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}
