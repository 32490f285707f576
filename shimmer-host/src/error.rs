//! 宿主错误类型

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// 预览输出错误
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("无法写入 {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("帧编码失败 {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("轨迹序列化失败: {0}")]
    Trace(#[from] serde_json::Error),
}
