//! 批量题目处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是生成命令的入口，负责资源准备和批量调度。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、连接数据库、解析管理员 profile
//! 2. **题目查询**：单题模式或分页模式
//! 3. **串行处理**：一道题完整处理完再开始下一道
//! 4. **全局统计**：汇总成功 / 失败数量
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个题目的细节
//! - **失败隔离**：单题失败只计数，不中断批次

use anyhow::Result;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::config::Config;
use crate::infrastructure::init_db;
use crate::services::{find_target_problems, resolve_admin_profile, LlmService, TargetSelection};
use crate::utils::logging::{log_problem_start, log_startup, print_final_stats};
use crate::workflow::{ProblemCtx, ProblemFlow, ProblemOutcome};

/// 批处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub success: usize,
    pub failed: usize,
}

impl BatchStats {
    fn record(&mut self, outcome: &ProblemOutcome) {
        self.processed += 1;
        if outcome.is_success() {
            self.success += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    db: DatabaseConnection,
    flow: ProblemFlow,
}

impl App {
    /// 初始化应用
    ///
    /// 配置错误（缺少 API 密钥、数据库地址、严格模式下找不到管理员）
    /// 都在处理任何题目之前返回
    pub async fn initialize(config: Config) -> Result<Self> {
        let llm_service = LlmService::from_config(&config)?;
        let db = init_db(config.require_database_url()?).await?;
        Self::with_connection(config, db, llm_service).await
    }

    /// 使用已有的数据库连接和 LLM 服务初始化
    pub async fn with_connection(
        config: Config,
        db: DatabaseConnection,
        llm_service: LlmService,
    ) -> Result<Self> {
        log_startup(llm_service.model_name(), config.dry_run);

        let admin = resolve_admin_profile(&db, &config.admin_username, config.strict_admin).await?;
        match &admin {
            Some(a) => info!("👤 管理员: {} (profile #{})", a.username, a.profile_id),
            None => warn!("⚠️ 找不到任何带 profile 的用户，题解只署名代码作者"),
        }

        let flow = ProblemFlow::new(db.clone(), &config, llm_service, admin);

        Ok(Self { config, db, flow })
    }

    /// 运行批处理
    ///
    /// 单题模式下题目不存在或已有题解直接返回错误；
    /// 分页模式下没有待处理题目时返回全零统计
    pub async fn run(&self, selection: &TargetSelection) -> Result<BatchStats> {
        let problems = find_target_problems(&self.db, selection).await?;

        if problems.is_empty() {
            warn!("⚠️ 没有需要生成题解的题目，程序结束");
            return Ok(BatchStats::default());
        }

        let total = problems.len();
        info!("✓ 找到 {} 道待处理的题目", total);

        let mut stats = BatchStats::default();
        for (i, problem) in problems.iter().enumerate() {
            let ctx = ProblemCtx::new(i + 1, total, &problem.code);
            log_problem_start(&ctx.to_string(), &problem.code, &problem.name);

            let outcome = self.flow.run(problem, &ctx).await;
            stats.record(&outcome);
        }

        print_final_stats(
            stats.processed,
            stats.success,
            stats.failed,
            self.config.dry_run,
        );

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_record() {
        let mut stats = BatchStats::default();
        stats.record(&ProblemOutcome::Persisted { solution_id: 1 });
        stats.record(&ProblemOutcome::DryRun);
        stats.record(&ProblemOutcome::Rejected(vec![]));
        stats.record(&ProblemOutcome::Failed("db".to_string()));
        assert_eq!(
            stats,
            BatchStats {
                processed: 4,
                success: 2,
                failed: 2,
            }
        );
    }
}
