//! # Shimmer Preview
//!
//! 扫光效果预览工具。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p shimmer-host -- init-config
//! cargo run -p shimmer-host -- render --output frames -n 72
//! cargo run -p shimmer-host -- trace -n 10 --config shimmer.json
//! cargo run -p shimmer-host -- -v render
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use shimmer_host::{PreviewConfig, render_frames, write_trace};
use tracing::Level;

#[derive(Parser)]
#[command(name = "shimmer-preview")]
#[command(about = "扫光效果预览工具 - 渲染帧序列或输出绘制轨迹")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 配置文件（默认：shimmer.json）
    #[arg(short, long, default_value = "shimmer.json", global = true)]
    config: PathBuf,

    /// 日志详细程度（-v: debug，-vv: trace）
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// 渲染 PNG 帧序列
    Render {
        /// 输出目录（覆盖配置文件）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 帧数（覆盖配置文件）
        #[arg(short = 'n', long)]
        frames: Option<u32>,
    },

    /// 以 JSON lines 输出每帧的绘制指令
    Trace {
        /// 帧数（覆盖配置文件）
        #[arg(short = 'n', long)]
        frames: Option<u32>,
    },

    /// 写出默认配置文件
    InitConfig {
        /// 覆盖已存在的文件
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("❌ {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Render { output, frames } => {
            let mut config = PreviewConfig::load(&cli.config);
            if let Some(frames) = frames {
                config.output.frames = frames;
            }
            let dir = output.unwrap_or_else(|| config.output.dir.clone());

            let written = render_frames(&config, &dir)
                .with_context(|| format!("渲染帧序列失败: {}", dir.display()))?;
            eprintln!("✅ 已写入 {} 帧到 {}", written.len(), dir.display());
        }
        Commands::Trace { frames } => {
            let mut config = PreviewConfig::load(&cli.config);
            if let Some(frames) = frames {
                config.output.frames = frames;
            }

            let mut stdout = std::io::stdout().lock();
            write_trace(&config, &mut stdout).context("输出绘制轨迹失败")?;
        }
        Commands::InitConfig { force } => {
            if cli.config.exists() && !force {
                anyhow::bail!(
                    "配置文件已存在: {}（使用 --force 覆盖）",
                    cli.config.display()
                );
            }
            PreviewConfig::default()
                .save(&cli.config)
                .with_context(|| format!("写入配置失败: {}", cli.config.display()))?;
            eprintln!("✅ 已写入默认配置: {}", cli.config.display());
        }
    }
    Ok(())
}
