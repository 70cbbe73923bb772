use anyhow::{Context, Result};
/// 日志工具模块
///
/// 提供日志初始化和批次横幅输出的辅助函数
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志
///
/// # 参数
/// - `verbose`: 为 true 时默认级别为 debug，否则为 info（`RUST_LOG` 优先）
/// - `log_file`: 可选的日志文件，追加写入，不带颜色
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{default_level},sqlx=warn")));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("无法打开日志文件: {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(model: &str, dry_run: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题解批量生成");
    info!("🤖 模型: {}", model);
    if dry_run {
        info!("🧪 DRY RUN 模式：不会写入数据库");
    }
    info!("{}", "=".repeat(60));
}

/// 记录单个题目开始处理
pub fn log_problem_start(prefix: &str, code: &str, name: &str) {
    info!("\n{}", "=".repeat(60));
    info!("{} 开始处理: {} - {}", prefix, code, name);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `processed`: 处理的题目数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `dry_run`: 是否为演练模式
pub fn print_final_stats(processed: usize, success: usize, failed: usize, dry_run: bool) {
    info!("\n{}", "=".repeat(60));
    info!("📊 SUMMARY");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("Processed: {}", processed);
    info!("✅ Success: {}", success);
    info!("❌ Failed: {}", failed);
    info!("{}", "=".repeat(60));
    if dry_run {
        info!("这是一次 dry run，没有保存任何修改。去掉 --dry-run 以真正创建题解。");
    } else {
        info!("生成的题解均已设为公开 (is_public=true)。");
    }
}
