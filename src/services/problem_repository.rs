//! 题目查询 - 业务能力层
//!
//! 只负责"找出要处理哪些题目"，不关心后续流程

use sea_orm::sea_query::Query;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::debug;

use crate::entity::{problem, solution};
use crate::error::{AppResult, BusinessError};

/// 待处理题目的选取方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSelection {
    /// 按题号处理单个题目
    Single(String),
    /// 分页处理尚无题解的公开题目
    Page { limit: u64, offset: u64 },
}

/// 按选取方式查询待处理题目
///
/// 单题模式下题目不存在、未公开或已有题解都会返回错误；
/// 分页模式按主键升序返回，可能为空。
pub async fn find_target_problems<C: ConnectionTrait>(
    db: &C,
    selection: &TargetSelection,
) -> AppResult<Vec<problem::Model>> {
    match selection {
        TargetSelection::Single(code) => {
            let found = problem::Entity::find()
                .filter(problem::Column::IsPublic.eq(true))
                .filter(problem::Column::Code.eq(code.as_str()))
                .one(db)
                .await?
                .ok_or_else(|| BusinessError::ProblemNotFound { code: code.clone() })?;

            if editorial_exists(db, found.id).await? {
                return Err(BusinessError::EditorialExists { code: code.clone() }.into());
            }

            Ok(vec![found])
        }
        TargetSelection::Page { limit, offset } => {
            debug!("查询无题解的公开题目: limit={}, offset={}", limit, offset);
            let problems = problem::Entity::find()
                .filter(problem::Column::IsPublic.eq(true))
                .filter(
                    problem::Column::Id.not_in_subquery(
                        Query::select()
                            .column(solution::Column::ProblemId)
                            .from(solution::Entity)
                            .to_owned(),
                    ),
                )
                .order_by_asc(problem::Column::Id)
                .offset(*offset)
                .limit(*limit)
                .all(db)
                .await?;
            Ok(problems)
        }
    }
}

/// 题目是否已有题解
pub async fn editorial_exists<C: ConnectionTrait>(db: &C, problem_id: i32) -> AppResult<bool> {
    let count = solution::Entity::find()
        .filter(solution::Column::ProblemId.eq(problem_id))
        .count(db)
        .await?;
    Ok(count > 0)
}
