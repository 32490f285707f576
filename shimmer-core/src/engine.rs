//! # Engine 模块
//!
//! 扫光引擎：持有动画状态，驱动计时器，并在宿主的绘制周期中输出光带。
//!
//! ## 状态机
//!
//! ```text
//!            attach (autoStart && band > 0 && visible)
//!   Idle ─────────────────────────────────────────────► Running
//!    ▲  ▲                                                │   ▲
//!    │  │ stop_shimmer                           hidden  │   │ visible
//!    │  └────────────────────────────────────────────────┤   │
//!    │                                                   ▼   │
//!    └──────────────────── detach ────────────────────  Paused
//! ```
//!
//! - detach 会销毁计时器，下次 attach 从头开始
//! - stop_shimmer 只取消计时器，不销毁；之后的可见性变化不会重新启动
//! - 隐藏状态下 attach 时，自动开始推迟到第一次变为可见
//! - 计时器 tick 只请求重绘，几何计算全部发生在 [`ShimmerEngine::on_draw_pass`]

use serde::Serialize;

use crate::clock::{Clock, CycleSpec, FrameClock};
use crate::color::Rgba;
use crate::config::{DisplayMetrics, ShimmerConfig};
use crate::geometry::{Rect, SweepGeometry};
use crate::gradient::LinearGradient;
use crate::render::{Canvas, ShimmerHost, ShimmerPaint};

/// 引擎状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShimmerState {
    /// 没有计时器，或计时器未开始
    Idle,
    /// 计时器运行中
    Running,
    /// 计时器已暂停，相位冻结
    Paused,
}

/// 扫光引擎
///
/// 泛型参数 `C` 是计时器实现，默认使用帧驱动的 [`FrameClock`]。
#[derive(Debug)]
pub struct ShimmerEngine<C: Clock = FrameClock> {
    /// 倾斜角度（度，顺时针为正）
    tilt_degree: i32,
    /// 渐变颜色：起始、中心、结束
    colors: [Rgba; 3],
    /// 光带宽度（像素），非正时不绘制
    band_width: i32,
    /// 光带渐变，宽度为正时才存在
    gradient: Option<LinearGradient>,
    /// 周期参数
    cycle: CycleSpec,
    /// 是否自动开始
    auto_start: bool,
    /// 计时器，首次 attach 时创建，detach 时销毁
    clock: Option<C>,
    /// 上一次绘制时记录的相位
    last_phase: f32,
    /// 表面是否可见
    visible: bool,
    /// 表面是否已附加
    attached: bool,
    /// 隐藏状态下 attach 推迟的自动开始
    pending_start: bool,
}

impl<C: Clock> ShimmerEngine<C> {
    /// 按配置创建引擎
    pub fn new(config: &ShimmerConfig, metrics: &DisplayMetrics) -> Self {
        let mut engine = Self {
            tilt_degree: config.tilt_angle,
            colors: [config.start_color, config.center_color, config.end_color],
            band_width: 0,
            gradient: None,
            cycle: config.cycle(),
            auto_start: config.auto_start,
            clock: None,
            last_phase: 0.0,
            visible: true,
            attached: false,
            pending_start: false,
        };
        engine.set_band_width(config.band_width_px(metrics));
        engine
    }

    // ========== 查询 ==========

    /// 当前状态
    pub fn state(&self) -> ShimmerState {
        match &self.clock {
            Some(clock) if clock.is_paused() => ShimmerState::Paused,
            Some(clock) if clock.is_started() => ShimmerState::Running,
            _ => ShimmerState::Idle,
        }
    }

    /// 计时器是否已开始（暂停中也算）
    pub fn is_shimmer_started(&self) -> bool {
        self.clock.as_ref().is_some_and(|clock| clock.is_started())
    }

    /// 当前相位；没有计时器时为 `None`
    pub fn phase(&self) -> Option<f32> {
        self.clock.as_ref().map(|clock| clock.phase())
    }

    /// 相位上界
    pub fn max_phase(&self) -> f32 {
        self.cycle.max_phase()
    }

    /// 光带宽度（像素）
    pub fn band_width(&self) -> i32 {
        self.band_width
    }

    /// 是否自动开始
    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    /// 表面是否已附加
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// 表面是否可见
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// 计时器
    pub fn clock(&self) -> Option<&C> {
        self.clock.as_ref()
    }

    /// 计时器（可变）
    pub fn clock_mut(&mut self) -> Option<&mut C> {
        self.clock.as_mut()
    }

    // ========== 控制 ==========

    /// 设置光带宽度并重建渐变，下一次绘制生效
    ///
    /// 非正值被忽略。
    pub fn set_band_width(&mut self, px: i32) {
        if px <= 0 {
            return;
        }
        let [start, center, end] = self.colors;
        self.band_width = px;
        self.gradient = Some(LinearGradient::shimmer(px as f32, start, center, end));
    }

    /// 开始扫光
    ///
    /// 没有计时器时创建计时器；暂停中则继续；已在运行时不做任何事。
    pub fn start_shimmer(&mut self) {
        self.auto_start = true;
        let cycle = self.cycle;
        let clock = self.clock.get_or_insert_with(|| C::from_cycle(cycle));

        if clock.is_paused() {
            clock.resume();
            tracing::debug!(phase = clock.phase(), "shimmer 继续");
        } else if !clock.is_started() {
            clock.start();
            tracing::debug!(tilt = self.tilt_degree, band_width = self.band_width, "shimmer 开始");
        }
    }

    /// 停止扫光
    ///
    /// 取消计时器但保留它，`is_shimmer_started()` 随之变为 `false`。
    pub fn stop_shimmer(&mut self) {
        self.pending_start = false;
        if let Some(clock) = self.clock.as_mut()
            && clock.is_started()
        {
            clock.cancel();
            tracing::debug!("shimmer 停止");
        }
    }

    fn should_auto_start(&self) -> bool {
        self.auto_start && self.band_width > 0
    }

    // ========== 生命周期 ==========

    /// 表面已附加
    pub fn on_attach(&mut self) {
        self.attached = true;
        if self.clock.is_none() {
            self.clock = Some(C::from_cycle(self.cycle));
            self.last_phase = 0.0;
        }
        if !self.should_auto_start() {
            return;
        }
        if self.visible {
            self.start_shimmer();
        } else {
            self.pending_start = true;
        }
    }

    /// 表面已分离
    ///
    /// 计时器被取消并销毁，之后的 tick 不会再触达它。
    pub fn on_detach(&mut self) {
        self.attached = false;
        self.pending_start = false;
        if let Some(mut clock) = self.clock.take() {
            clock.cancel();
            tracing::debug!("shimmer 计时器已销毁");
        }
        self.last_phase = 0.0;
    }

    /// 表面可见性变化
    ///
    /// 只在已附加时生效：隐藏暂停，显示继续。
    /// 已停止的计时器不会因为重新可见而启动。
    pub fn on_visibility_changed(&mut self, visible: bool) {
        self.visible = visible;
        if !self.attached {
            return;
        }

        if visible && self.pending_start {
            self.pending_start = false;
            self.start_shimmer();
            return;
        }

        let Some(clock) = self.clock.as_mut() else {
            return;
        };
        if visible {
            if clock.is_paused() {
                clock.resume();
                tracing::debug!(phase = clock.phase(), "表面可见，shimmer 继续");
            }
        } else if clock.is_started() && !clock.is_paused() {
            clock.pause();
            tracing::debug!(phase = clock.phase(), "表面隐藏，shimmer 暂停");
        }
    }

    // ========== 帧驱动 ==========

    /// 推进计时器
    ///
    /// 计时器运行时每次调用产生一次 tick，并向宿主请求重绘。
    ///
    /// # 返回
    /// 是否请求了重绘
    pub fn advance(&mut self, dt: f32, host: &mut impl ShimmerHost) -> bool {
        let Some(clock) = self.clock.as_mut() else {
            return false;
        };
        if clock.advance(dt) {
            host.request_redraw();
            true
        } else {
            false
        }
    }

    /// 绘制周期（宿主已绘制完自身内容之后调用）
    ///
    /// # 返回
    /// 是否向画布发出了绘制指令
    pub fn on_draw_pass(&mut self, canvas: &mut impl Canvas, width: f32, height: f32) -> bool {
        if self.band_width <= 0 || self.state() != ShimmerState::Running {
            return false;
        }
        let (Some(clock), Some(gradient)) = (self.clock.as_ref(), self.gradient.as_ref()) else {
            return false;
        };

        let phase = clock.phase();
        // 间隔期：光带已完全离开表面
        if self.last_phase > 1.0 && phase > 1.0 {
            return false;
        }
        self.last_phase = phase;

        let surface = Rect::from_size(width, height);
        let geometry =
            SweepGeometry::compute(surface, self.band_width as f32, self.tilt_degree, phase);
        canvas.draw_rect(surface, &ShimmerPaint::new(gradient, geometry.transform));
        true
    }
}
