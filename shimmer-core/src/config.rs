//! # Config 模块
//!
//! 扫光参数解析：把宿主提供的属性集合解析为完整的 [`ShimmerConfig`]。
//!
//! ## 解析规则
//!
//! 1. 属性存在且类型正确 → 使用属性值
//! 2. 属性缺失 → 默认值
//! 3. 属性类型不符 → 默认值，并输出警告
//!
//! 值本身是否合理（如负的时长）不在这里判断，由引擎按退化规则处理。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::clock::{CycleSpec, EasingFunction};
use crate::color::{Rgba, palette};

/// 属性名称（宿主标记语言中的名字）
pub mod attr {
    /// 倾斜角度（整数，顺时针为正）
    pub const ANGLE: &str = "shimmer_angle";
    /// 渐变起始色
    pub const START_COLOR: &str = "shimmer_start_color";
    /// 渐变中心色
    pub const CENTER_COLOR: &str = "shimmer_center_color";
    /// 渐变结束色
    pub const END_COLOR: &str = "shimmer_end_color";
    /// 光带宽度（尺寸）
    pub const WIDTH: &str = "shimmer_width";
    /// 扫光时长（毫秒）
    pub const ANIMATION_DURATION: &str = "shimmer_animation_duration";
    /// 重复间隔（毫秒）
    pub const REPEAT_DELAY: &str = "shimmer_repeat_delay";
    /// 是否自动开始
    pub const AUTO_START: &str = "shimmer_auto_start";
}

/// 默认参数
pub mod defaults {
    /// 倾斜角度（度）
    pub const TILT_ANGLE: i32 = 20;
    /// 光带宽度（dp）
    pub const BAND_WIDTH_DP: f32 = 50.0;
    /// 扫光时长（毫秒）
    pub const CYCLE_DURATION_MS: i32 = 1200;
    /// 重复间隔（毫秒）
    pub const REPEAT_DELAY_MS: i32 = 0;
    /// 是否自动开始
    pub const AUTO_START: bool = true;
}

/// 屏幕密度信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    /// 每 dp 对应的像素数
    pub density: f32,
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}

impl DisplayMetrics {
    /// 创建密度信息
    pub fn new(density: f32) -> Self {
        Self { density }
    }

    /// dp → 像素（四舍五入）
    pub fn dp_to_px(&self, dp: f32) -> i32 {
        (dp * self.density).round() as i32
    }

    /// 像素 → dp
    pub fn px_to_dp(&self, px: f32) -> f32 {
        if self.density > 0.0 {
            px / self.density
        } else {
            px
        }
    }
}

/// 尺寸值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// 与密度无关的像素
    Dp(f32),
    /// 设备像素
    Px(f32),
}

impl Dimension {
    /// 转换为 dp
    pub fn to_dp(self, metrics: &DisplayMetrics) -> f32 {
        match self {
            Dimension::Dp(dp) => dp,
            Dimension::Px(px) => metrics.px_to_dp(px),
        }
    }
}

/// 属性值
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// 整数
    Int(i32),
    /// 布尔
    Bool(bool),
    /// 颜色
    Color(Rgba),
    /// 尺寸
    Dimension(Dimension),
}

impl AttrValue {
    /// 类型名（用于日志）
    fn kind(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::Bool(_) => "bool",
            AttrValue::Color(_) => "color",
            AttrValue::Dimension(_) => "dimension",
        }
    }
}

/// 属性集合
///
/// 宿主从标记/样式中读出的原始键值对。未知键被忽略。
#[derive(Debug, Clone, Default)]
pub struct AttributeSet {
    values: HashMap<String, AttrValue>,
}

impl AttributeSet {
    /// 创建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 链式插入
    pub fn with(mut self, name: impl Into<String>, value: AttrValue) -> Self {
        self.insert(name, value);
        self
    }

    /// 插入属性
    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) {
        self.values.insert(name.into(), value);
    }

    /// 读取属性
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    fn int_or(&self, name: &str, default: i32) -> i32 {
        match self.get(name) {
            Some(AttrValue::Int(v)) => *v,
            other => fallback(name, other, default),
        }
    }

    fn bool_or(&self, name: &str, default: bool) -> bool {
        match self.get(name) {
            Some(AttrValue::Bool(v)) => *v,
            other => fallback(name, other, default),
        }
    }

    fn color_or(&self, name: &str, default: Rgba) -> Rgba {
        match self.get(name) {
            Some(AttrValue::Color(v)) => *v,
            other => fallback(name, other, default),
        }
    }

    fn dp_or(&self, name: &str, metrics: &DisplayMetrics, default: f32) -> f32 {
        match self.get(name) {
            Some(AttrValue::Dimension(d)) => d.to_dp(metrics),
            other => fallback(name, other, default),
        }
    }
}

/// 属性缺失或类型不符时回退到默认值
fn fallback<T>(name: &str, found: Option<&AttrValue>, default: T) -> T {
    if let Some(value) = found {
        tracing::warn!(attr = name, kind = value.kind(), "属性类型不符，使用默认值");
    }
    default
}

/// 扫光配置
///
/// 完整填充的扁平参数结构，可直接从 JSON 反序列化（缺失字段取默认值）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShimmerConfig {
    /// 倾斜角度（度，顺时针为正）
    #[serde(default = "default_tilt_angle")]
    pub tilt_angle: i32,

    /// 渐变起始色
    #[serde(default = "default_start_color")]
    pub start_color: Rgba,

    /// 渐变中心色
    #[serde(default = "default_center_color")]
    pub center_color: Rgba,

    /// 渐变结束色
    #[serde(default = "default_end_color")]
    pub end_color: Rgba,

    /// 光带宽度（dp）
    #[serde(default = "default_band_width_dp")]
    pub band_width_dp: f32,

    /// 扫光时长（毫秒）
    #[serde(default = "default_cycle_duration_ms")]
    pub cycle_duration_ms: i32,

    /// 重复间隔（毫秒）
    #[serde(default = "default_repeat_delay_ms")]
    pub repeat_delay_ms: i32,

    /// 附加到表面时是否自动开始
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,

    /// 周期内的缓动（默认线性）
    #[serde(default)]
    pub easing: EasingFunction,
}

// 默认值函数
fn default_tilt_angle() -> i32 {
    defaults::TILT_ANGLE
}

fn default_start_color() -> Rgba {
    palette::SHIMMER_START
}

fn default_center_color() -> Rgba {
    palette::SHIMMER_CENTER
}

fn default_end_color() -> Rgba {
    palette::SHIMMER_END
}

fn default_band_width_dp() -> f32 {
    defaults::BAND_WIDTH_DP
}

fn default_cycle_duration_ms() -> i32 {
    defaults::CYCLE_DURATION_MS
}

fn default_repeat_delay_ms() -> i32 {
    defaults::REPEAT_DELAY_MS
}

fn default_auto_start() -> bool {
    defaults::AUTO_START
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            tilt_angle: default_tilt_angle(),
            start_color: default_start_color(),
            center_color: default_center_color(),
            end_color: default_end_color(),
            band_width_dp: default_band_width_dp(),
            cycle_duration_ms: default_cycle_duration_ms(),
            repeat_delay_ms: default_repeat_delay_ms(),
            auto_start: default_auto_start(),
            easing: EasingFunction::default(),
        }
    }
}

impl ShimmerConfig {
    /// 从属性集合解析
    ///
    /// `attrs` 为 `None` 时返回全部默认值。
    pub fn from_attributes(attrs: Option<&AttributeSet>, metrics: &DisplayMetrics) -> Self {
        let Some(attrs) = attrs else {
            return Self::default();
        };

        Self {
            tilt_angle: attrs.int_or(attr::ANGLE, defaults::TILT_ANGLE),
            start_color: attrs.color_or(attr::START_COLOR, palette::SHIMMER_START),
            center_color: attrs.color_or(attr::CENTER_COLOR, palette::SHIMMER_CENTER),
            end_color: attrs.color_or(attr::END_COLOR, palette::SHIMMER_END),
            band_width_dp: attrs.dp_or(attr::WIDTH, metrics, defaults::BAND_WIDTH_DP),
            cycle_duration_ms: attrs.int_or(attr::ANIMATION_DURATION, defaults::CYCLE_DURATION_MS),
            repeat_delay_ms: attrs.int_or(attr::REPEAT_DELAY, defaults::REPEAT_DELAY_MS),
            auto_start: attrs.bool_or(attr::AUTO_START, defaults::AUTO_START),
            easing: EasingFunction::default(),
        }
    }

    /// 光带宽度（像素）
    pub fn band_width_px(&self, metrics: &DisplayMetrics) -> i32 {
        metrics.dp_to_px(self.band_width_dp)
    }

    /// 周期参数
    pub fn cycle(&self) -> CycleSpec {
        CycleSpec::new(self.cycle_duration_ms, self.repeat_delay_ms).with_easing(self.easing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShimmerConfig::from_attributes(None, &DisplayMetrics::default());
        assert_eq!(config.tilt_angle, 20);
        assert_eq!(config.band_width_dp, 50.0);
        assert_eq!(config.cycle_duration_ms, 1200);
        assert_eq!(config.repeat_delay_ms, 0);
        assert!(config.auto_start);
        assert_eq!(config.start_color, palette::SHIMMER_START);
        assert_eq!(config, ShimmerConfig::default());
    }

    #[test]
    fn test_band_width_scales_with_density() {
        let config = ShimmerConfig::default();
        assert_eq!(config.band_width_px(&DisplayMetrics::new(1.0)), 50);
        assert_eq!(config.band_width_px(&DisplayMetrics::new(2.75)), 138);
    }

    #[test]
    fn test_attributes_override() {
        let metrics = DisplayMetrics::new(2.0);
        let attrs = AttributeSet::new()
            .with(attr::ANGLE, AttrValue::Int(-15))
            .with(attr::CENTER_COLOR, AttrValue::Color(Rgba::new(1, 2, 3, 4)))
            .with(attr::WIDTH, AttrValue::Dimension(Dimension::Px(80.0)))
            .with(attr::ANIMATION_DURATION, AttrValue::Int(800))
            .with(attr::REPEAT_DELAY, AttrValue::Int(400))
            .with(attr::AUTO_START, AttrValue::Bool(false));

        let config = ShimmerConfig::from_attributes(Some(&attrs), &metrics);
        assert_eq!(config.tilt_angle, -15);
        assert_eq!(config.center_color, Rgba::new(1, 2, 3, 4));
        assert_eq!(config.start_color, palette::SHIMMER_START);
        assert_eq!(config.band_width_dp, 40.0);
        assert_eq!(config.band_width_px(&metrics), 80);
        assert_eq!(config.cycle_duration_ms, 800);
        assert_eq!(config.repeat_delay_ms, 400);
        assert!(!config.auto_start);
    }

    #[test]
    fn test_wrong_kind_falls_back() {
        let attrs = AttributeSet::new()
            .with(attr::ANGLE, AttrValue::Bool(true))
            .with(attr::WIDTH, AttrValue::Int(10))
            .with("shimmer_unknown", AttrValue::Int(1));

        let config = ShimmerConfig::from_attributes(Some(&attrs), &DisplayMetrics::default());
        assert_eq!(config.tilt_angle, defaults::TILT_ANGLE);
        assert_eq!(config.band_width_dp, defaults::BAND_WIDTH_DP);
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let json = r##"{ "tilt_angle": 30, "end_color": "#FF000000", "easing": "ease_in_out_sine" }"##;
        let config: ShimmerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tilt_angle, 30);
        assert_eq!(config.end_color, Rgba::new(0, 0, 0, 255));
        assert_eq!(config.cycle_duration_ms, defaults::CYCLE_DURATION_MS);
        assert_eq!(config.easing, EasingFunction::EaseInOutSine);
    }

    #[test]
    fn test_cycle_spec() {
        let config = ShimmerConfig {
            repeat_delay_ms: 300,
            ..ShimmerConfig::default()
        };
        assert!((config.cycle().max_phase() - 1.25).abs() < 1e-6);
    }
}
