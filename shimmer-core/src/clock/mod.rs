//! # Clock 模块
//!
//! 驱动扫光相位的重复计时器。
//!
//! ## 核心设计理念
//!
//! 计时器只负责 **时间轴**：
//! - 在一个周期（`cycle_duration + repeat_delay`）内把相位从 0 推进到
//!   `1 + repeat_delay / cycle_duration`，然后回绕到 0，无限重复
//! - 不计算任何几何，不知道渲染表面的存在
//!
//! 引擎通过 [`Clock`] trait 使用计时器，因此测试可以注入任意实现，
//! 而不需要真实的帧循环。

mod easing;
mod frame_clock;

pub use easing::EasingFunction;
pub use frame_clock::{ClockState, FrameClock};

/// 最短周期时长（毫秒），避免除零
const MIN_CYCLE_DURATION_MS: u32 = 1;

/// 周期参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleSpec {
    /// 扫光本身的时长（毫秒）
    pub cycle_duration_ms: u32,
    /// 两次扫光之间的间隔（毫秒）
    pub repeat_delay_ms: u32,
    /// 周期内时间比例的缓动
    pub easing: EasingFunction,
}

impl CycleSpec {
    /// 创建周期参数
    ///
    /// 非正的时长按 1ms 处理，负的间隔按 0 处理。
    pub fn new(cycle_duration_ms: i32, repeat_delay_ms: i32) -> Self {
        Self {
            cycle_duration_ms: (cycle_duration_ms.max(0) as u32).max(MIN_CYCLE_DURATION_MS),
            repeat_delay_ms: repeat_delay_ms.max(0) as u32,
            easing: EasingFunction::Linear,
        }
    }

    /// 设置缓动函数
    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 完整周期（秒）
    pub fn period_secs(&self) -> f32 {
        (self.cycle_duration_ms + self.repeat_delay_ms) as f32 / 1000.0
    }

    /// 相位上界 `1 + repeat_delay / cycle_duration`
    pub fn max_phase(&self) -> f32 {
        1.0 + self.repeat_delay_ms as f32 / self.cycle_duration_ms as f32
    }
}

impl Default for CycleSpec {
    fn default() -> Self {
        Self::new(1200, 0)
    }
}

/// 重复计时器接口
///
/// 语义与值动画器一致：
/// - `start` 从相位 0 开始（已开始时由调用方决定是否调用）
/// - `pause` / `resume` 冻结、继续相位，不重置
/// - `cancel` 停止计时，但计时器对象仍然存在，可再次 `start`
pub trait Clock {
    /// 按周期参数创建计时器（未开始）
    fn from_cycle(spec: CycleSpec) -> Self
    where
        Self: Sized;

    /// 从相位 0 开始计时
    fn start(&mut self);

    /// 暂停，冻结相位
    fn pause(&mut self);

    /// 从暂停处继续
    fn resume(&mut self);

    /// 取消计时
    fn cancel(&mut self);

    /// 是否已开始（暂停中也算已开始）
    fn is_started(&self) -> bool;

    /// 是否处于暂停
    fn is_paused(&self) -> bool;

    /// 当前相位，范围 `[0, max_phase)`
    fn phase(&self) -> f32;

    /// 推进时间
    ///
    /// # 返回
    /// - `true`: 产生了一次 tick（计时器正在运行）
    /// - `false`: 计时器未运行，时间被忽略
    fn advance(&mut self, dt: f32) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_phase() {
        assert_eq!(CycleSpec::new(1200, 0).max_phase(), 1.0);
        assert!((CycleSpec::new(1200, 300).max_phase() - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_period() {
        assert!((CycleSpec::new(1200, 300).period_secs() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_values() {
        let spec = CycleSpec::new(0, -50);
        assert_eq!(spec.cycle_duration_ms, 1);
        assert_eq!(spec.repeat_delay_ms, 0);
        assert_eq!(spec.max_phase(), 1.0);
    }
}
