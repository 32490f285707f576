//! # Color 模块
//!
//! RGBA 颜色类型与内置调色板。
//!
//! 字符串格式与宿主标记语言一致：`#AARRGGBB`，也接受 `#RRGGBB`（视为不透明）。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ColorParseError;

/// RGBA 颜色（非预乘 alpha，每通道 8 位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// 完全透明
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// 创建颜色
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// 从 `0xAARRGGBB` 整数创建
    pub const fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// 转换为 `0xAARRGGBB` 整数
    pub const fn to_argb(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// alpha 通道（0.0 - 1.0）
    pub fn alpha(self) -> f32 {
        self.a as f32 / 255.0
    }

    /// 逐通道线性插值
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(s.to_string()));
        }

        let value =
            u32::from_str_radix(hex, 16).map_err(|_| ColorParseError::InvalidHex(s.to_string()))?;

        if hex.len() == 6 {
            Ok(Self::from_argb(0xFF00_0000 | value))
        } else {
            Ok(Self::from_argb(value))
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.to_argb())
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// 内置调色板
///
/// 白色高光，两端较淡、中心较亮，适合叠加在浅灰骨架色块上。
pub mod palette {
    use super::Rgba;

    /// 渐变起始色
    pub const SHIMMER_START: Rgba = Rgba::from_argb(0x33FF_FFFF);
    /// 渐变中心色
    pub const SHIMMER_CENTER: Rgba = Rgba::from_argb(0x99FF_FFFF);
    /// 渐变结束色
    pub const SHIMMER_END: Rgba = Rgba::from_argb(0x33FF_FFFF);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_argb() {
        let c: Rgba = "#80FF0010".parse().unwrap();
        assert_eq!(c, Rgba::new(0xFF, 0x00, 0x10, 0x80));
    }

    #[test]
    fn test_parse_rgb_is_opaque() {
        let c: Rgba = "#336699".parse().unwrap();
        assert_eq!(c, Rgba::new(0x33, 0x66, 0x99, 0xFF));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "336699".parse::<Rgba>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#3366".parse::<Rgba>(),
            Err(ColorParseError::InvalidLength(_))
        ));
        assert!(matches!(
            "#GG6699".parse::<Rgba>(),
            Err(ColorParseError::InvalidHex(_))
        ));
        // 多字节字符不能绕过十六进制检查
        assert!(matches!(
            "#中文".parse::<Rgba>(),
            Err(ColorParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(palette::SHIMMER_CENTER.to_string(), "#99FFFFFF");
        assert_eq!(Rgba::TRANSPARENT.to_string(), "#00000000");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&palette::SHIMMER_START).unwrap();
        assert_eq!(json, "\"#33FFFFFF\"");

        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette::SHIMMER_START);

        assert!(serde_json::from_str::<Rgba>("\"red\"").is_err());
    }

    #[test]
    fn test_lerp() {
        let a = Rgba::new(0, 0, 0, 0);
        let b = Rgba::new(200, 100, 50, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgba::new(100, 50, 25, 128));
    }
}
