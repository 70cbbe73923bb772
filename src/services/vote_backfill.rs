//! 评论票数回填 - 业务能力层
//!
//! 一次性迁移：根据 judge_commentvote 重新计算 judge_comment 的
//! upvotes / downvotes 冗余列。没有投票的评论写 0。

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, Statement};
use tracing::info;

const BACKFILL_SQL: &str = "\
UPDATE judge_comment SET \
upvotes = COALESCE((SELECT COUNT(id) FROM judge_commentvote \
WHERE judge_commentvote.comment_id = judge_comment.id AND score = 1), 0), \
downvotes = COALESCE((SELECT COUNT(id) FROM judge_commentvote \
WHERE judge_commentvote.comment_id = judge_comment.id AND score = -1), 0)";

/// 回填所有评论的票数，返回更新的行数
pub async fn backfill_comment_votes<C: ConnectionTrait>(db: &C) -> Result<u64> {
    let backend = db.get_database_backend();
    let result = db
        .execute(Statement::from_string(backend, BACKFILL_SQL))
        .await
        .context("回填评论票数失败")?;

    let rows = result.rows_affected();
    info!("✓ 已回填 {} 条评论的票数", rows);
    Ok(rows)
}
