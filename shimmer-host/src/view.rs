//! # View 模块
//!
//! 宿主容器：持有像素表面、占位内容和扫光引擎，
//! 把生命周期事件转发给引擎，并在帧循环中按需重绘。

use image::RgbaImage;
use shimmer_core::{Rgba, ShimmerEngine, ShimmerState};

use crate::config::PreviewConfig;
use crate::raster::PixelCanvas;
use crate::skeleton::SkeletonLayout;

/// 扫光容器
#[derive(Debug)]
pub struct ShimmerView {
    engine: ShimmerEngine,
    canvas: PixelCanvas,
    layout: SkeletonLayout,
    background: Rgba,
    /// 是否需要重绘
    dirty: bool,
    /// 上一次重绘是否画出了光带
    band_drawn: bool,
}

impl ShimmerView {
    /// 按配置创建容器（尚未附加）
    pub fn new(config: &PreviewConfig) -> Self {
        let surface = &config.surface;
        let (width, height) = (surface.width as f32, surface.height as f32);

        Self {
            engine: ShimmerEngine::new(&config.shimmer, &config.metrics()),
            canvas: PixelCanvas::new(surface.width, surface.height),
            layout: SkeletonLayout::build(surface.layout, width, height, surface.block_color),
            background: surface.background,
            dirty: true,
            band_drawn: false,
        }
    }

    // ========== 生命周期 ==========

    /// 附加到窗口
    pub fn attach(&mut self) {
        if self.engine.is_attached() {
            return;
        }
        self.engine.on_attach();
        self.dirty = true;
    }

    /// 从窗口分离
    pub fn detach(&mut self) {
        if self.engine.is_attached() {
            self.engine.on_detach();
        }
    }

    /// 设置可见性
    pub fn set_visible(&mut self, visible: bool) {
        if self.engine.is_visible() == visible {
            return;
        }
        self.engine.on_visibility_changed(visible);
        if visible {
            self.dirty = true;
        }
    }

    // ========== 控制 ==========

    pub fn start_shimmer(&mut self) {
        self.engine.start_shimmer();
        self.dirty = true;
    }

    pub fn stop_shimmer(&mut self) {
        self.engine.stop_shimmer();
        self.dirty = true;
    }

    pub fn set_band_width(&mut self, px: i32) {
        self.engine.set_band_width(px);
        self.dirty = true;
    }

    // ========== 帧循环 ==========

    /// 推进一帧
    ///
    /// 计时器 tick 会把容器标记为脏；已附加、可见且脏时重绘。
    ///
    /// # 返回
    /// 本帧重绘后的图像；未重绘时为 `None`
    pub fn frame(&mut self, dt: f32) -> Option<&RgbaImage> {
        let mut dirty = self.dirty;
        self.engine.advance(dt, &mut || dirty = true);
        self.dirty = dirty;

        if !(self.dirty && self.is_attached() && self.is_visible()) {
            return None;
        }
        self.dirty = false;
        self.repaint();
        Some(self.canvas.image())
    }

    /// 先画自身内容，再让引擎合成光带
    fn repaint(&mut self) {
        self.canvas.clear(self.background);
        self.layout.paint(&mut self.canvas);

        let (width, height) = (self.canvas.width() as f32, self.canvas.height() as f32);
        self.band_drawn = self.engine.on_draw_pass(&mut self.canvas, width, height);
    }

    // ========== 查询 ==========

    pub fn engine(&self) -> &ShimmerEngine {
        &self.engine
    }

    pub fn state(&self) -> ShimmerState {
        self.engine.state()
    }

    pub fn image(&self) -> &RgbaImage {
        self.canvas.image()
    }

    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }

    pub fn layout(&self) -> &SkeletonLayout {
        &self.layout
    }

    pub fn is_attached(&self) -> bool {
        self.engine.is_attached()
    }

    pub fn is_visible(&self) -> bool {
        self.engine.is_visible()
    }

    /// 上一次重绘是否画出了光带
    pub fn band_drawn(&self) -> bool {
        self.band_drawn
    }
}
