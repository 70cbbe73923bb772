//! 数据库连接 - 基础设施层

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
};
use tracing::info;

use crate::entity::{
    comment, comment_vote, language, problem, profile, solution, solution_author, submission,
    submission_source, user,
};

/// 连接数据库
///
/// 批处理严格串行，连接池保持很小即可
pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    opt.max_connections(4)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// 按实体定义建表
///
/// 生产库由 Web 应用的迁移维护，这里只用于本地沙盒和测试
pub async fn create_schema<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    create_table(db, user::Entity).await?;
    create_table(db, profile::Entity).await?;
    create_table(db, problem::Entity).await?;
    create_table(db, language::Entity).await?;
    create_table(db, submission::Entity).await?;
    create_table(db, submission_source::Entity).await?;
    create_table(db, solution::Entity).await?;
    create_table(db, solution_author::Entity).await?;
    create_table(db, comment::Entity).await?;
    create_table(db, comment_vote::Entity).await?;
    info!("✓ 数据表创建完成");
    Ok(())
}

async fn create_table<C, E>(db: &C, entity: E) -> Result<(), DbErr>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}
