//! # Gradient 模块
//!
//! 光带渐变：沿局部 x 轴从 0 到 `width` 的五段线性渐变。
//!
//! 停靠点位置固定为 `0, 0, 0.5, 1, 1`，颜色依次为
//! 透明、起始色、中心色、结束色、透明。两端重合的停靠点形成硬边，
//! 超出 `[0, width]` 的部分按边缘颜色（透明）延伸。

use crate::color::Rgba;

/// 固定的停靠点位置
pub const STOP_POSITIONS: [f32; 5] = [0.0, 0.0, 0.5, 1.0, 1.0];

/// 渐变停靠点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// 位置 (0.0 - 1.0)
    pub position: f32,
    /// 颜色
    pub color: Rgba,
}

/// 光带线性渐变
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    width: f32,
    stops: [GradientStop; 5],
}

impl LinearGradient {
    /// 创建光带渐变
    pub fn shimmer(width: f32, start: Rgba, center: Rgba, end: Rgba) -> Self {
        let colors = [Rgba::TRANSPARENT, start, center, end, Rgba::TRANSPARENT];
        let stops = std::array::from_fn(|i| GradientStop {
            position: STOP_POSITIONS[i],
            color: colors[i],
        });
        Self { width, stops }
    }

    /// 渐变宽度（像素）
    pub fn width(&self) -> f32 {
        self.width
    }

    /// 停靠点
    pub fn stops(&self) -> &[GradientStop; 5] {
        &self.stops
    }

    /// 在渐变空间中 `x` 处的颜色
    pub fn color_at(&self, x: f32) -> Rgba {
        if self.width.is_nan() || self.width <= 0.0 || !x.is_finite() {
            return Rgba::TRANSPARENT;
        }

        let t = x / self.width;
        if t < 0.0 {
            return self.stops[0].color;
        }
        if t > 1.0 {
            return self.stops[self.stops.len() - 1].color;
        }

        for pair in self.stops.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let span = to.position - from.position;
            if span > 0.0 && t >= from.position && t <= to.position {
                return from.color.lerp(to.color, (t - from.position) / span);
            }
        }

        Rgba::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: Rgba = Rgba::new(255, 0, 0, 100);
    const CENTER: Rgba = Rgba::new(0, 255, 0, 200);
    const END: Rgba = Rgba::new(0, 0, 255, 100);

    fn gradient() -> LinearGradient {
        LinearGradient::shimmer(50.0, START, CENTER, END)
    }

    #[test]
    fn test_stop_layout() {
        let g = gradient();
        let positions: Vec<f32> = g.stops().iter().map(|s| s.position).collect();
        assert_eq!(positions, STOP_POSITIONS);
        assert_eq!(g.stops()[0].color, Rgba::TRANSPARENT);
        assert_eq!(g.stops()[4].color, Rgba::TRANSPARENT);
    }

    #[test]
    fn test_outside_band_is_transparent() {
        let g = gradient();
        assert_eq!(g.color_at(-0.1), Rgba::TRANSPARENT);
        assert_eq!(g.color_at(50.1), Rgba::TRANSPARENT);
        assert_eq!(g.color_at(f32::NAN), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_band_colors() {
        let g = gradient();
        assert_eq!(g.color_at(0.0), START);
        assert_eq!(g.color_at(25.0), CENTER);
        assert_eq!(g.color_at(50.0), END);
    }

    #[test]
    fn test_interpolates_between_stops() {
        let g = gradient();
        let c = g.color_at(12.5);
        assert_eq!(c, START.lerp(CENTER, 0.5));
    }

    #[test]
    fn test_zero_width_is_transparent() {
        let g = LinearGradient::shimmer(0.0, START, CENTER, END);
        assert_eq!(g.color_at(0.0), Rgba::TRANSPARENT);
    }
}
