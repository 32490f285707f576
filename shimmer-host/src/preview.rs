//! # Preview 模块
//!
//! 离线预览：把帧序列写成 PNG，或把每帧的绘制指令输出为 JSON lines。

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use serde::Serialize;
use shimmer_core::{DrawCommand, RecordingCanvas, ShimmerEngine, ShimmerState};

use crate::config::PreviewConfig;
use crate::error::PreviewError;
use crate::view::ShimmerView;

/// 一帧的轨迹记录
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// 帧序号
    pub frame: u32,
    /// 引擎状态
    pub state: ShimmerState,
    /// 当前相位；没有计时器时为 `None`
    pub phase: Option<f32>,
    /// 本帧的绘制指令；未绘制时为 `None`
    pub draw: Option<DrawCommand>,
}

/// 第 `index` 帧的文件名
pub fn frame_file_name(index: u32) -> String {
    format!("frame_{index:04}.png")
}

/// 渲染帧序列到目录
///
/// 每帧先推进 `1 / fps` 秒再绘制。
///
/// # 返回
/// 写入的文件路径（按帧序）
pub fn render_frames(config: &PreviewConfig, dir: &Path) -> Result<Vec<PathBuf>, PreviewError> {
    config.validate()?;
    fs::create_dir_all(dir).map_err(|source| PreviewError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let dt = config.frame_dt();
    let mut view = ShimmerView::new(config);
    view.attach();

    let mut written = Vec::with_capacity(config.output.frames as usize);
    let mut repaints = 0;
    for index in 0..config.output.frames {
        if view.frame(dt).is_some() {
            repaints += 1;
        }

        let path = dir.join(frame_file_name(index));
        view.image()
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|source| PreviewError::Encode {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }

    view.detach();
    tracing::info!(frames = written.len(), repaints, ?dir, "帧序列已写入");
    Ok(written)
}

/// 生成绘制轨迹
///
/// 直接驱动引擎与记录画布，不做像素合成。
pub fn trace(config: &PreviewConfig) -> Vec<FrameRecord> {
    let surface = &config.surface;
    let (width, height) = (surface.width as f32, surface.height as f32);
    let dt = config.frame_dt();

    let mut engine: ShimmerEngine = ShimmerEngine::new(&config.shimmer, &config.metrics());
    engine.on_attach();

    let mut canvas = RecordingCanvas::new();
    let records = (0..config.output.frames)
        .map(|frame| {
            engine.advance(dt, &mut || {});
            let drawn = engine.on_draw_pass(&mut canvas, width, height);
            FrameRecord {
                frame,
                state: engine.state(),
                phase: engine.phase(),
                draw: if drawn { canvas.take().pop() } else { None },
            }
        })
        .collect();

    engine.on_detach();
    records
}

/// 把轨迹以 JSON lines 写出
///
/// # 返回
/// 写出的行数
pub fn write_trace(config: &PreviewConfig, out: &mut impl Write) -> Result<usize, PreviewError> {
    config.validate()?;

    let records = trace(config);
    for record in &records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out).map_err(|source| PreviewError::Io {
            path: PathBuf::from("<trace>"),
            source,
        })?;
    }
    Ok(records.len())
}
