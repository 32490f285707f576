//! # Raster 模块
//!
//! 基于 `image::RgbaImage` 的像素画布。
//!
//! 宿主先用 [`PixelCanvas::fill_rect`] 画出自身内容，引擎随后通过
//! [`Canvas::draw_rect`] 把光带合成上去。像素以非预乘 RGBA8 存储，
//! 采样点取像素中心。

use std::ops::Range;

use image::{Rgba as Pixel, RgbaImage};
use shimmer_core::{BlendMode, Canvas, Rect, Rgba, ShimmerPaint};

/// 像素画布
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    image: RgbaImage,
}

impl PixelCanvas {
    /// 创建全透明画布
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// 画布尺寸对应的矩形
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width() as f32, self.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// 读取像素；越界时返回 `None`
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|p| to_rgba(*p))
    }

    /// 用单色覆盖整个画布（不混合）
    pub fn clear(&mut self, color: Rgba) {
        let pixel = to_pixel(color);
        for p in self.image.pixels_mut() {
            *p = pixel;
        }
    }

    /// 以 source-over 方式填充纯色矩形
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if color.a == 0 {
            return;
        }
        let (xs, ys) = self.pixel_bounds(rect);
        for y in ys {
            for x in xs.clone() {
                let dst = self.image.get_pixel_mut(x, y);
                *dst = to_pixel(src_over(color, to_rgba(*dst)));
            }
        }
    }

    /// 矩形覆盖的像素范围（已裁剪到画布内）
    fn pixel_bounds(&self, rect: Rect) -> (Range<u32>, Range<u32>) {
        (
            pixel_span(rect.x, rect.width, self.width()),
            pixel_span(rect.y, rect.height, self.height()),
        )
    }
}

impl Canvas for PixelCanvas {
    fn draw_rect(&mut self, rect: Rect, paint: &ShimmerPaint<'_>) {
        let Some(shader) = paint.device_shader() else {
            tracing::warn!("光带矩阵不可逆，跳过绘制");
            return;
        };

        let (xs, ys) = self.pixel_bounds(rect);
        for y in ys {
            for x in xs.clone() {
                let src = shader.color_at(x as f32 + 0.5, y as f32 + 0.5);
                let dst = self.image.get_pixel_mut(x, y);
                let out = match paint.blend {
                    BlendMode::SrcAtop => src_atop(src, to_rgba(*dst)),
                    BlendMode::SrcOver => src_over(src, to_rgba(*dst)),
                };
                *dst = to_pixel(out);
            }
        }
    }
}

// ========== 合成 ==========

/// source-atop：保持目标 alpha，只在目标已有内容处着色
///
/// `color = src·αs + dst·(1 − αs)`，`α = αd`
pub fn src_atop(src: Rgba, dst: Rgba) -> Rgba {
    if dst.a == 0 || src.a == 0 {
        return dst;
    }
    let sa = src.alpha();
    Rgba::new(
        mix(src.r, dst.r, sa),
        mix(src.g, dst.g, sa),
        mix(src.b, dst.b, sa),
        dst.a,
    )
}

/// source-over（非预乘）
pub fn src_over(src: Rgba, dst: Rgba) -> Rgba {
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }

    let sa = src.alpha();
    let da = dst.alpha() * (1.0 - sa);
    let out_a = sa + da;
    let channel = |s: u8, d: u8| ((s as f32 * sa + d as f32 * da) / out_a).round() as u8;

    Rgba::new(
        channel(src.r, dst.r),
        channel(src.g, dst.g),
        channel(src.b, dst.b),
        (out_a * 255.0).round() as u8,
    )
}

fn mix(src: u8, dst: u8, src_alpha: f32) -> u8 {
    (src as f32 * src_alpha + dst as f32 * (1.0 - src_alpha)).round() as u8
}

fn pixel_span(start: f32, len: f32, limit: u32) -> Range<u32> {
    // NaN 经 `as u32` 饱和为 0，得到空范围
    let lo = start.max(0.0).floor() as u32;
    let hi = (start + len).min(limit as f32).ceil().max(0.0) as u32;
    lo.min(limit)..hi.min(limit)
}

fn to_pixel(c: Rgba) -> Pixel<u8> {
    Pixel([c.r, c.g, c.b, c.a])
}

fn to_rgba(p: Pixel<u8>) -> Rgba {
    let [r, g, b, a] = p.0;
    Rgba::new(r, g, b, a)
}
