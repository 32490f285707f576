//! # Affine 模块
//!
//! 2×3 仿射矩阵，坐标系为屏幕坐标（y 轴向下），正角度为顺时针。
//!
//! ```text
//! | a  c  tx |
//! | b  d  ty |
//! ```

use super::Vec2;

/// 二维仿射变换
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    /// 单位矩阵
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }

    /// 平移
    pub const fn translation(dx: f32, dy: f32) -> Self {
        Self {
            tx: dx,
            ty: dy,
            ..Self::identity()
        }
    }

    /// 绕 `pivot` 旋转 `degrees` 度
    pub fn rotation_about(degrees: f32, pivot: Vec2) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            tx: pivot.x - cos * pivot.x + sin * pivot.y,
            ty: pivot.y - sin * pivot.x - cos * pivot.y,
        }
    }

    /// 先应用 `self`，再应用 `next`
    pub fn then(&self, next: &Affine) -> Self {
        Self {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            tx: next.a * self.tx + next.c * self.ty + next.tx,
            ty: next.b * self.tx + next.d * self.ty + next.ty,
        }
    }

    /// 后置平移
    pub fn post_translate(&self, dx: f32, dy: f32) -> Self {
        self.then(&Self::translation(dx, dy))
    }

    /// 变换一个点
    pub fn map_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            self.a * p.x + self.c * p.y + self.tx,
            self.b * p.x + self.d * p.y + self.ty,
        )
    }

    /// 行列式
    pub fn determinant(&self) -> f32 {
        self.a * self.d - self.b * self.c
    }

    /// 所有分量是否有限
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|v| v.is_finite())
    }

    /// 逆矩阵；奇异或非有限时返回 `None`
    pub fn invert(&self) -> Option<Self> {
        let det = self.determinant();
        if !self.is_finite() || !det.is_finite() || det.abs() < f32::EPSILON {
            return None;
        }
        let inv = 1.0 / det;
        Some(Self {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            tx: (self.c * self.ty - self.d * self.tx) * inv,
            ty: (self.b * self.tx - self.a * self.ty) * inv,
        })
    }

    /// `[a, b, c, d, tx, ty]`
    pub fn to_array(&self) -> [f32; 6] {
        [self.a, self.b, self.c, self.d, self.tx, self.ty]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn test_rotation_keeps_pivot() {
        let pivot = Vec2::new(150.0, 50.0);
        let m = Affine::rotation_about(37.0, pivot);
        assert!(approx(m.map_point(pivot), pivot));
    }

    #[test]
    fn test_rotation_is_clockwise_on_screen() {
        // y 轴向下：x 轴正方向旋转 90° 后指向下方
        let m = Affine::rotation_about(90.0, Vec2::zero());
        assert!(approx(m.map_point(Vec2::new(1.0, 0.0)), Vec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_rotate_then_translate_order() {
        let m = Affine::rotation_about(90.0, Vec2::zero()).post_translate(10.0, 0.0);
        // 先旋转 (1,0)→(0,1)，再平移 → (10,1)
        assert!(approx(m.map_point(Vec2::new(1.0, 0.0)), Vec2::new(10.0, 1.0)));
    }

    #[test]
    fn test_invert_round_trip() {
        let m = Affine::rotation_about(20.0, Vec2::new(150.0, 50.0)).post_translate(-42.0, 0.0);
        let inv = m.invert().unwrap();
        let p = Vec2::new(12.0, 34.0);
        assert!(approx(inv.map_point(m.map_point(p)), p));
    }

    #[test]
    fn test_singular_not_invertible() {
        let m = Affine {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            tx: 1.0,
            ty: 1.0,
        };
        assert!(m.invert().is_none());

        let nan = Affine::translation(f32::NAN, 0.0);
        assert!(nan.invert().is_none());
    }
}
