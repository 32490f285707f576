//! # Easing 模块
//!
//! 缓动函数，作用于一个周期内的时间比例。

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// 线性（匀速）
    #[default]
    Linear,
    /// 正弦缓入缓出（先加速后减速）
    EaseInOutSine,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear() {
        let easing = EasingFunction::Linear;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
    }

    #[test]
    fn test_ease_in_out_sine_endpoints() {
        let easing = EasingFunction::EaseInOutSine;
        assert!(easing.apply(0.0).abs() < 1e-6);
        assert!((easing.apply(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out_sine_accelerates_then_decelerates() {
        let easing = EasingFunction::EaseInOutSine;
        // 前半段慢于线性，后半段快于线性
        assert!(easing.apply(0.25) < 0.25);
        assert!(easing.apply(0.75) > 0.75);
    }

    #[test]
    fn test_only_linear_and_sine_deserialize() {
        let sine: EasingFunction = serde_json::from_str("\"ease_in_out_sine\"").unwrap();
        assert_eq!(sine, EasingFunction::EaseInOutSine);
        assert!(serde_json::from_str::<EasingFunction>("\"ease_in\"").is_err());
    }

    #[test]
    fn test_ease_in_out_sine_midpoint() {
        let mid = EasingFunction::EaseInOutSine.apply(0.5);
        assert!((mid - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_clamp() {
        let easing = EasingFunction::Linear;
        // 超出范围应该被限制
        assert_eq!(easing.apply(-0.5), 0.0);
        assert_eq!(easing.apply(1.5), 1.0);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&EasingFunction::EaseInOutSine).unwrap();
        assert_eq!(json, "\"ease_in_out_sine\"");
    }
}
