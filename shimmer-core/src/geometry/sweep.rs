//! # Sweep 模块
//!
//! 扫光范围与水平偏移计算。
//!
//! ```text
//!  |//  =  |/  +  //
//!  扫光范围 = 表面高度倾斜后增加的水平跨度 + 光带自身在该角度下的投影宽度
//! ```

use super::{Affine, Rect};

/// 线性插值
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

/// 扫光范围
///
/// `height * tan(|θ|) + band_width / cos(θ)`。
/// 倾斜方向只影响光带朝向，不影响需要扫过的跨度，因此正切项取绝对角度。
pub fn sweep_range(height: f32, band_width: f32, tilt_degree: i32) -> f32 {
    let radian = (tilt_degree as f32).to_radians();
    height * radian.abs().tan() + band_width / radian.cos()
}

/// 水平偏移：相位 0 时光带完全位于左侧外，相位 1 时完全位于右侧外
///
/// 使用原始相位，大于 1 的相位会把光带继续推出右边缘。
pub fn sweep_offset(surface_width: f32, sweep_range: f32, phase: f32) -> f32 {
    lerp(-sweep_range / 2.0, surface_width + sweep_range / 2.0, phase)
}

/// 一帧的扫光几何
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepGeometry {
    /// 扫光范围
    pub sweep_range: f32,
    /// 水平偏移
    pub dx: f32,
    /// 渐变的局部变换：绕表面中心旋转，再沿水平方向平移 `dx`
    pub transform: Affine,
}

impl SweepGeometry {
    /// 计算一帧的几何
    pub fn compute(surface: Rect, band_width: f32, tilt_degree: i32, phase: f32) -> Self {
        let sweep_range = sweep_range(surface.height, band_width, tilt_degree);
        let dx = sweep_offset(surface.width, sweep_range, phase);
        let transform =
            Affine::rotation_about(tilt_degree as f32, surface.center()).post_translate(dx, 0.0);

        Self {
            sweep_range,
            dx,
            transform,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;

    #[test]
    fn test_zero_tilt_range_is_band_width() {
        assert_eq!(sweep_range(100.0, 50.0, 0), 50.0);
    }

    #[test]
    fn test_range_grows_with_tilt() {
        let mut last = sweep_range(100.0, 50.0, 0);
        for tilt in 1..80 {
            let r = sweep_range(100.0, 50.0, tilt);
            assert!(r > last, "tilt {tilt}: {r} <= {last}");
            last = r;
        }
    }

    #[test]
    fn test_range_symmetric_in_tilt_sign() {
        let cw = sweep_range(100.0, 50.0, 20);
        let ccw = sweep_range(100.0, 50.0, -20);
        assert!((cw - ccw).abs() < 1e-4);
    }

    #[test]
    fn test_offset_endpoints() {
        let range = sweep_range(100.0, 50.0, 20);
        assert!((sweep_offset(300.0, range, 0.0) + range / 2.0).abs() < 1e-4);
        assert!((sweep_offset(300.0, range, 1.0) - (300.0 + range / 2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_offset_monotonic() {
        let range = sweep_range(100.0, 50.0, 20);
        let mut last = f32::NEG_INFINITY;
        for i in 0..=100 {
            let dx = sweep_offset(300.0, range, i as f32 / 100.0);
            assert!(dx >= last);
            last = dx;
        }
    }

    #[test]
    fn test_centered_scenario() {
        let g = SweepGeometry::compute(Rect::from_size(300.0, 100.0), 50.0, 0, 0.5);
        assert_eq!(g.sweep_range, 50.0);
        assert!((g.dx - 150.0).abs() < 1e-4);
        // 无倾斜时变换只剩平移
        let p = g.transform.map_point(Vec2::new(0.0, 0.0));
        assert!((p.x - 150.0).abs() < 1e-3);
        assert!(p.y.abs() < 1e-3);
    }

    #[test]
    fn test_zero_surface_does_not_panic() {
        let g = SweepGeometry::compute(Rect::from_size(0.0, 0.0), 50.0, 20, 0.3);
        assert!(g.sweep_range.is_finite());
        assert!(g.dx.is_finite());
    }
}
