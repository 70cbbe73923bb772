use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use editorial_generator::cli::{execute, Cli, Command};
use editorial_generator::config::Config;
use editorial_generator::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置，命令行参数优先
    let mut config = Config::from_env()?;
    if cli.database_url.is_some() {
        config.database_url = cli.database_url.clone();
    }
    if let Command::Generate(args) = &cli.command {
        args.apply_to(&mut config);
    }

    // 初始化日志
    logging::init(config.verbose_logging, config.log_file.as_deref())?;

    let result = execute(&cli.command, config).await;
    match &result {
        Ok(()) => info!("✓ 完成"),
        Err(e) => error!("❌ {:#}", e),
    }
    result
}
