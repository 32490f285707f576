//! # Render 模块
//!
//! 引擎与宿主之间的渲染契约。
//!
//! ## 核心概念
//!
//! - [`Canvas`]：宿主提供的绘制表面，引擎每个绘制周期最多调用一次 `draw_rect`
//! - [`ShimmerPaint`]：光带渐变 + 局部变换 + 混合模式
//! - [`ShimmerHost`]：引擎向宿主发出的重绘请求
//! - [`RecordingCanvas`]：记录绘制指令的画布，用于测试与轨迹输出

use serde::Serialize;

use crate::color::Rgba;
use crate::geometry::{Affine, Rect, Vec2};
use crate::gradient::LinearGradient;

/// 混合模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// 普通覆盖
    SrcOver,
    /// 只作用于目标已有像素，保持目标 alpha
    SrcAtop,
}

/// 光带画笔
#[derive(Debug, Clone, Copy)]
pub struct ShimmerPaint<'a> {
    /// 渐变（渐变空间）
    pub gradient: &'a LinearGradient,
    /// 渐变空间 → 设备空间
    pub local_matrix: Affine,
    /// 混合模式
    pub blend: BlendMode,
}

impl<'a> ShimmerPaint<'a> {
    /// 创建使用 source-atop 混合的画笔
    pub fn new(gradient: &'a LinearGradient, local_matrix: Affine) -> Self {
        Self {
            gradient,
            local_matrix,
            blend: BlendMode::SrcAtop,
        }
    }

    /// 预先求逆，得到设备空间着色器
    ///
    /// 矩阵奇异或非有限时返回 `None`，此时不应绘制任何内容。
    pub fn device_shader(&self) -> Option<DeviceShader<'a>> {
        self.local_matrix.invert().map(|inverse| DeviceShader {
            gradient: self.gradient,
            inverse,
        })
    }
}

/// 设备空间着色器
#[derive(Debug, Clone, Copy)]
pub struct DeviceShader<'a> {
    gradient: &'a LinearGradient,
    inverse: Affine,
}

impl DeviceShader<'_> {
    /// 设备坐标 `(x, y)` 处的颜色
    pub fn color_at(&self, x: f32, y: f32) -> Rgba {
        let local = self.inverse.map_point(Vec2::new(x, y));
        self.gradient.color_at(local.x)
    }
}

/// 绘制表面
pub trait Canvas {
    /// 用画笔填充矩形
    fn draw_rect(&mut self, rect: Rect, paint: &ShimmerPaint<'_>);
}

/// 宿主回调
///
/// 计时器每次 tick 都会请求一次重绘。
pub trait ShimmerHost {
    /// 请求重绘
    fn request_redraw(&mut self);
}

impl<F: FnMut()> ShimmerHost for F {
    fn request_redraw(&mut self) {
        self()
    }
}

/// 一条已记录的绘制指令
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    /// 填充区域
    pub rect: Rect,
    /// 光带宽度
    pub band_width: f32,
    /// 局部矩阵 `[a, b, c, d, tx, ty]`
    pub matrix: [f32; 6],
    /// 混合模式
    pub blend: BlendMode,
}

impl DrawCommand {
    /// 局部矩阵的水平平移分量
    pub fn translate_x(&self) -> f32 {
        self.matrix[4]
    }
}

/// 记录绘制指令的画布
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    /// 创建空画布
    pub fn new() -> Self {
        Self::default()
    }

    /// 已记录的指令
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// 取出并清空已记录的指令
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// 指令数量
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// 是否没有指令
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rect(&mut self, rect: Rect, paint: &ShimmerPaint<'_>) {
        self.commands.push(DrawCommand {
            rect,
            band_width: paint.gradient.width(),
            matrix: paint.local_matrix.to_array(),
            blend: paint.blend,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::palette;

    fn gradient() -> LinearGradient {
        LinearGradient::shimmer(
            50.0,
            palette::SHIMMER_START,
            palette::SHIMMER_CENTER,
            palette::SHIMMER_END,
        )
    }

    #[test]
    fn test_device_shader_follows_translation() {
        let g = gradient();
        let paint = ShimmerPaint::new(&g, Affine::translation(100.0, 0.0));
        let shader = paint.device_shader().unwrap();

        assert_eq!(shader.color_at(99.0, 5.0), Rgba::TRANSPARENT);
        assert_eq!(shader.color_at(125.0, 5.0), palette::SHIMMER_CENTER);
        assert_eq!(shader.color_at(151.0, 5.0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_singular_matrix_has_no_shader() {
        let g = gradient();
        let paint = ShimmerPaint::new(&g, Affine::translation(f32::INFINITY, 0.0));
        assert!(paint.device_shader().is_none());
    }

    #[test]
    fn test_recording_canvas() {
        let g = gradient();
        let mut canvas = RecordingCanvas::new();
        canvas.draw_rect(
            Rect::from_size(300.0, 100.0),
            &ShimmerPaint::new(&g, Affine::translation(42.0, 0.0)),
        );

        assert_eq!(canvas.len(), 1);
        let cmd = &canvas.commands()[0];
        assert_eq!(cmd.blend, BlendMode::SrcAtop);
        assert_eq!(cmd.band_width, 50.0);
        assert_eq!(cmd.translate_x(), 42.0);

        let taken = canvas.take();
        assert_eq!(taken.len(), 1);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_closure_as_host() {
        let mut count = 0;
        {
            let mut host = || count += 1;
            host.request_redraw();
            host.request_redraw();
        }
        assert_eq!(count, 2);
    }
}
