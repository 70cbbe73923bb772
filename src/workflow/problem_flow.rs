//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 选取 AC 代码
//! 2. 校验（不通过则 Rejected，不调用 LLM）
//! 3. 构建 prompt → LLM 生成结构化内容（带重试）
//! 4. 渲染 Markdown → 事务写入

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::entity::problem;
use crate::models::SelectedSolution;
use crate::services::prompt_builder::{build_prompt, format_solutions};
use crate::services::renderer::render_markdown;
use crate::services::validator::validate_generation;
use crate::services::{
    editorial_exists, AdminProfile, EditorialWriter, LlmService, SaveOutcome, SolutionSelector,
};
use crate::workflow::problem_ctx::ProblemCtx;

/// 单个题目的最终状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemOutcome {
    /// 已写入数据库
    Persisted { solution_id: i32 },
    /// dry run 完成，未写入
    DryRun,
    /// 校验不通过
    Rejected(Vec<String>),
    /// 生成或写入过程中出错
    Failed(String),
}

impl ProblemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Persisted { .. } | Self::DryRun)
    }
}

/// 题目处理流程
///
/// - 编排 选取 → 校验 → 生成 → 写入
/// - 任何一步出错都只影响当前题目
/// - 只依赖业务能力（services）
pub struct ProblemFlow {
    db: DatabaseConnection,
    selector: SolutionSelector,
    llm_service: LlmService,
    writer: EditorialWriter,
    max_source_chars: usize,
    dry_run: bool,
    verbose_logging: bool,
}

impl ProblemFlow {
    pub fn new(
        db: DatabaseConnection,
        config: &Config,
        llm_service: LlmService,
        admin: Option<AdminProfile>,
    ) -> Self {
        Self {
            selector: SolutionSelector::new(config.solutions_per_problem),
            writer: EditorialWriter::new(db.clone(), admin),
            db,
            llm_service,
            max_source_chars: config.max_source_chars,
            dry_run: config.dry_run,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 处理一道题，错误被转换为 [`ProblemOutcome::Failed`]
    pub async fn run(&self, problem: &problem::Model, ctx: &ProblemCtx) -> ProblemOutcome {
        match self.try_run(problem, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} ❌ 处理失败: {:#}", ctx, e);
                ProblemOutcome::Failed(format!("{:#}", e))
            }
        }
    }

    async fn try_run(&self, problem: &problem::Model, ctx: &ProblemCtx) -> Result<ProblemOutcome> {
        // ========== 1. 选取 AC 代码 ==========
        let solutions = self.selector.select(&self.db, problem).await?;
        info!("{} 找到 {} 份 AC 代码", ctx, solutions.len());
        self.log_solutions(ctx, &solutions);

        // ========== 2. 校验 ==========
        let exists = editorial_exists(&self.db, problem.id).await?;
        let errors = validate_generation(Some(problem), exists, &solutions);
        if !errors.is_empty() {
            warn!("{} ⚠️ 校验未通过:", ctx);
            for e in &errors {
                warn!("{}   - {}", ctx, e);
            }
            return Ok(ProblemOutcome::Rejected(errors));
        }

        // ========== 3. 生成 ==========
        let formatted = format_solutions(&solutions, self.max_source_chars);
        let prompt = build_prompt(problem, &formatted);
        info!("{} 🤖 正在调用 LLM 生成题解...", ctx);
        let editorial = self
            .llm_service
            .generate(&prompt)
            .await
            .with_context(|| format!("为 {} 生成题解失败", problem.code))?;

        // ========== 4. 渲染并写入 ==========
        let content = render_markdown(&editorial, problem);
        let outcome = self
            .writer
            .save(
                problem,
                &content,
                editorial.approaches.len(),
                &solutions,
                self.dry_run,
            )
            .await?;

        Ok(match outcome {
            SaveOutcome::Created { solution_id } => ProblemOutcome::Persisted { solution_id },
            SaveOutcome::DryRun => ProblemOutcome::DryRun,
        })
    }

    // ========== 日志辅助方法 ==========

    fn log_solutions(&self, ctx: &ProblemCtx, solutions: &[SelectedSolution]) {
        for (i, sol) in solutions.iter().enumerate() {
            info!(
                "{}   {}. {} by {} (提交 #{})",
                ctx,
                i + 1,
                sol.language_label(),
                sol.author_label(),
                sol.submission_id
            );
            if self.verbose_logging {
                let len = sol.source.as_deref().map_or(0, |s| s.chars().count());
                info!("{}      源代码长度: {} 字符", ctx, len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_outcomes() {
        assert!(ProblemOutcome::Persisted { solution_id: 1 }.is_success());
        assert!(ProblemOutcome::DryRun.is_success());
        assert!(!ProblemOutcome::Rejected(vec!["x".to_string()]).is_success());
        assert!(!ProblemOutcome::Failed("x".to_string()).is_success());
    }
}
