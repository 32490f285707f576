//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 shimmer-core 覆盖率
//! - `cov-workspace`: 运行 workspace 覆盖率
//! - `preview-check`: 检查预览配置文件（JSON 语法、取值范围）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use shimmer_host::PreviewConfig;
use walkdir::WalkDir;

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    let status = cmd.status();
    match status {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "cov-core" => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "shimmer-core", "--all-features", "--html"]);
            run(
                "cargo llvm-cov -p shimmer-core --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "cov-workspace" => {
            ensure_cargo_llvm_cov_available()?;

            // workspace 覆盖率只用于趋势观察，排除 xtask 以免稀释信号
            let mut cov = Command::new("cargo");
            cov.args([
                "llvm-cov",
                "--workspace",
                "--exclude",
                "xtask",
                "--all-features",
                "--html",
            ]);
            run(
                "cargo llvm-cov --workspace --exclude xtask --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "preview-check" => {
            let path = args.next();
            preview_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-core        运行 shimmer-core 覆盖率报告
  cov-workspace   运行 workspace 覆盖率报告
  preview-check   检查预览配置文件

PREVIEW-CHECK:
  cargo xtask preview-check [path]

  不带参数：检查当前目录下的 shimmer.json
  带路径参数：检查指定文件，或目录下所有 .json 文件

  检查内容：
    - JSON 语法与字段类型
    - 表面尺寸、屏幕密度、帧率、帧数的取值范围

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-core      -> cargo xtask cov-core
  cargo cov-workspace -> cargo xtask cov-workspace
"#
    );
}

//=============================================================================
// preview-check 命令实现
//=============================================================================

/// 默认配置文件
const DEFAULT_CONFIG: &str = "shimmer.json";

/// 执行配置检查
fn preview_check(path: Option<&str>) -> anyhow::Result<()> {
    let path = PathBuf::from(path.unwrap_or(DEFAULT_CONFIG));
    let files = if path.is_file() {
        vec![path]
    } else if path.is_dir() {
        collect_config_files(&path)
    } else {
        anyhow::bail!("路径不存在: {}", path.display());
    };

    if files.is_empty() {
        eprintln!("未找到配置文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个配置文件...\n", files.len());

    let mut errors = 0;
    for file in &files {
        if let Err(e) = check_config_file(file) {
            eprintln!("[ERROR] {}: {e}", file.display());
            errors += 1;
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if errors > 0 {
        eprintln!("❌ {} 个文件有错误", errors);
        anyhow::bail!("配置检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有 JSON 文件
fn collect_config_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个配置文件
///
/// 与 `PreviewConfig::load` 不同，解析失败在这里是错误而不是回退到默认值。
fn check_config_file(file: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let config: PreviewConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(())
}
