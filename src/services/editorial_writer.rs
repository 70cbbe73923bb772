//! 题解写入服务 - 业务能力层
//!
//! 只负责"把渲染好的题解落库"能力：
//! 删除旧题解、插入新题解、写入作者，三步在同一个事务里完成。

use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select, Set, TransactionTrait,
};
use tracing::{debug, error, info, warn};

use crate::entity::{problem, profile, solution, solution_author, user};
use crate::error::{AppResult, ConfigError};
use crate::models::SelectedSolution;

/// dry run 时预览的字符数
const PREVIEW_CHARS: usize = 500;

/// 作为第一作者的管理员
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminProfile {
    pub profile_id: i32,
    pub username: String,
}

/// 写入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 已写入，附新题解 id
    Created { solution_id: i32 },
    /// dry run，未写入
    DryRun,
}

/// 查找管理员 profile
///
/// 依次尝试：指定用户名 → 任一超级用户 → 第一个用户。每一步都要求该用户有 profile。
/// `strict` 为 true 时只接受指定用户名，找不到即返回配置错误。
pub async fn resolve_admin_profile<C: ConnectionTrait>(
    db: &C,
    admin_username: &str,
    strict: bool,
) -> AppResult<Option<AdminProfile>> {
    let named = first_with_profile(
        db,
        user::Entity::find().filter(user::Column::Username.eq(admin_username)),
    )
    .await?;
    if named.is_some() {
        return Ok(named);
    }

    if strict {
        return Err(ConfigError::AdminNotFound {
            username: admin_username.to_string(),
        }
        .into());
    }

    warn!("⚠️ 找不到管理员账号 '{}'，回退到超级用户", admin_username);
    let superuser = first_with_profile(
        db,
        user::Entity::find().filter(user::Column::IsSuperuser.eq(true)),
    )
    .await?;
    if superuser.is_some() {
        return Ok(superuser);
    }

    warn!("⚠️ 没有带 profile 的超级用户，回退到第一个用户");
    first_with_profile(db, user::Entity::find()).await
}

/// 在 `query` 中取 id 最小、且有 profile 的用户
async fn first_with_profile<C: ConnectionTrait>(
    db: &C,
    query: Select<user::Entity>,
) -> AppResult<Option<AdminProfile>> {
    let found = query
        .find_also_related(profile::Entity)
        .filter(profile::Column::Id.is_not_null())
        .order_by_asc(user::Column::Id)
        .one(db)
        .await?;

    Ok(found.and_then(|(u, p)| {
        p.map(|p| AdminProfile {
            profile_id: p.id,
            username: u.username,
        })
    }))
}

/// 署名顺序：管理员在前，然后是代码作者（按出现顺序去重）
///
/// 返回 (profile id, 用于日志的用户名)
pub fn collect_authors<'a>(
    admin: Option<&'a AdminProfile>,
    solutions: &'a [SelectedSolution],
) -> Vec<(i32, &'a str)> {
    let mut authors: Vec<(i32, &'a str)> = Vec::with_capacity(solutions.len() + 1);
    if let Some(admin) = admin {
        authors.push((admin.profile_id, admin.username.as_str()));
    }
    for sol in solutions {
        if !authors.iter().any(|(id, _)| *id == sol.author.profile_id) {
            authors.push((sol.author.profile_id, sol.author_label()));
        }
    }
    authors
}

/// 题解写入服务
///
/// 职责：
/// - dry run 时只打印预览
/// - 否则在一个事务内替换该题的题解，失败时整体回滚
pub struct EditorialWriter {
    db: DatabaseConnection,
    admin: Option<AdminProfile>,
}

impl EditorialWriter {
    pub fn new(db: DatabaseConnection, admin: Option<AdminProfile>) -> Self {
        Self { db, admin }
    }

    /// 保存题解
    ///
    /// # 参数
    /// - `problem`: 题目
    /// - `content`: 渲染好的 Markdown
    /// - `approach_count`: 解法数量（仅用于日志）
    /// - `solutions`: 参考代码，作者会被署名
    /// - `dry_run`: 为 true 时不写库
    pub async fn save(
        &self,
        problem: &problem::Model,
        content: &str,
        approach_count: usize,
        solutions: &[SelectedSolution],
        dry_run: bool,
    ) -> AppResult<SaveOutcome> {
        if dry_run {
            info!("[DRY RUN] 将为 {} 创建题解", problem.code);
            let preview: String = content.chars().take(PREVIEW_CHARS).collect();
            info!("内容预览:\n{}...", preview);
            return Ok(SaveOutcome::DryRun);
        }

        let authors = collect_authors(self.admin.as_ref(), solutions);
        let profile_ids: Vec<i32> = authors.iter().map(|(id, _)| *id).collect();

        match replace_editorial(&self.db, problem.id, content, &profile_ids).await {
            Ok(solution_id) => {
                info!("✓ 已为 {} 创建题解 (ID: {})", problem.code, solution_id);
                let names: Vec<&str> = authors.iter().map(|(_, name)| *name).collect();
                info!("  - 作者: {}", names.join(", "));
                info!("  - 状态: 公开");
                info!(
                    "  - 内容: {} 字符, {} 种解法",
                    content.chars().count(),
                    approach_count
                );
                Ok(SaveOutcome::Created { solution_id })
            }
            Err(e) => {
                error!("✗ 保存 {} 的题解失败: {}", problem.code, e);
                Err(e.into())
            }
        }
    }
}

/// 在一个事务里替换题目的题解，返回新题解 id
///
/// 任一步失败都会回滚：旧题解和作者保持原样，不会留下没有作者的新题解
pub async fn replace_editorial<C: TransactionTrait>(
    db: &C,
    problem_id: i32,
    content: &str,
    authors: &[i32],
) -> Result<i32, DbErr> {
    let txn = db.begin().await?;

    let result = async {
        solution_author::Entity::delete_many()
            .filter(
                solution_author::Column::SolutionId.in_subquery(
                    Query::select()
                        .column(solution::Column::Id)
                        .from(solution::Entity)
                        .and_where(solution::Column::ProblemId.eq(problem_id))
                        .to_owned(),
                ),
            )
            .exec(&txn)
            .await?;

        let deleted = solution::Entity::delete_many()
            .filter(solution::Column::ProblemId.eq(problem_id))
            .exec(&txn)
            .await?;
        if deleted.rows_affected > 0 {
            debug!("删除旧题解 {} 条 (problem_id={})", deleted.rows_affected, problem_id);
        }

        let created = solution::ActiveModel {
            problem_id: Set(problem_id),
            content: Set(content.to_string()),
            is_public: Set(true),
            publish_on: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for profile_id in authors {
            solution_author::ActiveModel {
                solution_id: Set(created.id),
                profile_id: Set(*profile_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        Ok::<i32, DbErr>(created.id)
    }
    .await;

    match result {
        Ok(solution_id) => {
            txn.commit().await?;
            Ok(solution_id)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!("事务回滚失败: {}", rollback_err);
            }
            Err(e)
        }
    }
}
