//! # FrameClock 模块
//!
//! 由宿主帧循环驱动的默认计时器实现。
//!
//! 宿主每帧调用 `advance(dt)`，计时器累加经过时间并在周期末回绕。

use super::{Clock, CycleSpec};

/// 计时器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClockState {
    /// 未开始或已取消
    #[default]
    Stopped,
    /// 正在计时
    Running,
    /// 已暂停
    Paused,
}

impl ClockState {
    /// 是否已开始（运行或暂停）
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

/// 帧驱动计时器
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// 周期参数
    spec: CycleSpec,
    /// 当前状态
    state: ClockState,
    /// 当前周期内已经过的时间（秒）
    elapsed: f32,
    /// 当前相位（已应用缓动）
    phase: f32,
}

impl FrameClock {
    /// 当前状态
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// 周期参数
    pub fn spec(&self) -> &CycleSpec {
        &self.spec
    }

    /// 根据经过时间重新计算相位
    fn update_phase(&mut self) {
        let period = self.spec.period_secs();
        let fraction = if period > 0.0 {
            self.elapsed / period
        } else {
            0.0
        };
        self.phase = self.spec.easing.apply(fraction) * self.spec.max_phase();
    }
}

impl Clock for FrameClock {
    fn from_cycle(spec: CycleSpec) -> Self {
        Self {
            spec,
            state: ClockState::Stopped,
            elapsed: 0.0,
            phase: 0.0,
        }
    }

    fn start(&mut self) {
        self.state = ClockState::Running;
        self.elapsed = 0.0;
        self.phase = 0.0;
    }

    fn pause(&mut self) {
        if self.state == ClockState::Running {
            self.state = ClockState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == ClockState::Paused {
            self.state = ClockState::Running;
        }
    }

    fn cancel(&mut self) {
        self.state = ClockState::Stopped;
    }

    fn is_started(&self) -> bool {
        self.state.is_started()
    }

    fn is_paused(&self) -> bool {
        self.state == ClockState::Paused
    }

    fn phase(&self) -> f32 {
        self.phase
    }

    fn advance(&mut self, dt: f32) -> bool {
        if self.state != ClockState::Running {
            return false;
        }

        let period = self.spec.period_secs();
        self.elapsed += dt.max(0.0);
        if period > 0.0 {
            // 单帧跨越多个周期时也只保留余数
            self.elapsed %= period;
        }
        self.update_phase();
        true
    }
}
