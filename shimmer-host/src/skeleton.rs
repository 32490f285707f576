//! # Skeleton 模块
//!
//! 骨架屏占位内容。宿主在每个绘制周期先画出这些占位块，
//! 光带随后只会落在这些块上（source-atop）。

use serde::{Deserialize, Serialize};
use shimmer_core::{Rect, Rgba};

use crate::raster::PixelCanvas;

/// 占位布局类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// 头像 + 三行文字
    #[default]
    Card,
    /// 三行列表项
    List,
    /// 整块填充
    Solid,
}

/// 一个占位块
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonBlock {
    pub rect: Rect,
    pub color: Rgba,
}

/// 占位布局
#[derive(Debug, Clone, PartialEq)]
pub struct SkeletonLayout {
    blocks: Vec<SkeletonBlock>,
}

impl SkeletonLayout {
    /// 按类型生成适配表面尺寸的布局
    pub fn build(kind: LayoutKind, width: f32, height: f32, color: Rgba) -> Self {
        let rects = match kind {
            LayoutKind::Card => card(width, height),
            LayoutKind::List => list(width, height),
            LayoutKind::Solid => vec![Rect::from_size(width, height)],
        };
        Self {
            blocks: rects
                .into_iter()
                .filter(|r| !r.is_empty())
                .map(|rect| SkeletonBlock { rect, color })
                .collect(),
        }
    }

    pub fn blocks(&self) -> &[SkeletonBlock] {
        &self.blocks
    }

    /// 绘制到画布
    pub fn paint(&self, canvas: &mut PixelCanvas) {
        for block in &self.blocks {
            canvas.fill_rect(block.rect, block.color);
        }
    }
}

fn card(width: f32, height: f32) -> Vec<Rect> {
    let pad = width.min(height) * 0.1;
    let avatar = (height - 2.0 * pad).min(width * 0.3).max(0.0);
    let text_x = pad * 2.0 + avatar;
    let text_w = (width - text_x - pad).max(0.0);
    let line_h = avatar * 0.2;

    let mut rects = vec![Rect::new(pad, pad, avatar, avatar)];
    for (i, scale) in [1.0, 0.8, 0.6].into_iter().enumerate() {
        let y = pad + avatar * 0.4 * i as f32;
        rects.push(Rect::new(text_x, y, text_w * scale, line_h));
    }
    rects
}

fn list(width: f32, height: f32) -> Vec<Rect> {
    let row_h = height / 3.0;
    let pad = row_h * 0.15;
    let icon = row_h - 2.0 * pad;
    let line_x = pad * 2.0 + icon;
    let line_h = icon * 0.4;

    (0..3)
        .flat_map(|i| {
            let top = row_h * i as f32 + pad;
            [
                Rect::new(pad, top, icon, icon),
                Rect::new(line_x, top + (icon - line_h) / 2.0, width - line_x - pad, line_h),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK: Rgba = Rgba::new(224, 224, 224, 255);

    fn inside(r: &Rect, width: f32, height: f32) -> bool {
        r.x >= 0.0 && r.y >= 0.0 && r.x + r.width <= width + 1e-3 && r.y + r.height <= height + 1e-3
    }

    #[test]
    fn test_layouts_fit_surface() {
        for kind in [LayoutKind::Card, LayoutKind::List, LayoutKind::Solid] {
            let layout = SkeletonLayout::build(kind, 300.0, 100.0, BLOCK);
            assert!(!layout.blocks().is_empty(), "{kind:?}");
            for block in layout.blocks() {
                assert!(inside(&block.rect, 300.0, 100.0), "{kind:?}: {:?}", block.rect);
            }
        }
    }

    #[test]
    fn test_card_shape() {
        let layout = SkeletonLayout::build(LayoutKind::Card, 300.0, 100.0, BLOCK);
        assert_eq!(layout.blocks().len(), 4);
        // 头像为正方形
        let avatar = layout.blocks()[0].rect;
        assert_eq!(avatar.width, avatar.height);
    }

    #[test]
    fn test_zero_surface_has_no_blocks() {
        let layout = SkeletonLayout::build(LayoutKind::Card, 0.0, 0.0, BLOCK);
        assert!(layout.blocks().is_empty());
    }

    #[test]
    fn test_paint() {
        let mut canvas = PixelCanvas::new(30, 10);
        SkeletonLayout::build(LayoutKind::Solid, 30.0, 10.0, BLOCK).paint(&mut canvas);
        assert_eq!(canvas.pixel(29, 9), Some(BLOCK));
    }
}
