//! # Error 模块
//!
//! 定义 shimmer-core 中使用的错误类型。
//!
//! 动画与渲染路径没有可恢复的错误：非法几何参数只会退化为"无可见效果"。
//! 错误只出现在解析边界（颜色字符串等）。

use thiserror::Error;

/// 颜色解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// 缺少 `#` 前缀
    #[error("颜色 '{0}' 必须以 '#' 开头")]
    MissingHash(String),

    /// 长度无效
    #[error("颜色 '{0}' 长度无效，应为 #RRGGBB 或 #AARRGGBB")]
    InvalidLength(String),

    /// 非十六进制字符
    #[error("颜色 '{0}' 包含非十六进制字符")]
    InvalidHex(String),
}
