use sea_orm::entity::prelude::*;

/// 判题结果：通过
pub const RESULT_ACCEPTED: &str = "AC";
/// 提交状态：判题完成
pub const STATUS_DONE: &str = "D";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "judge_submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// 指向 judge_profile
    pub user_id: i32,
    pub problem_id: i32,
    pub language_id: i32,

    /// AC / WA / TLE ...，判题前为 NULL
    pub result: Option<String>,
    /// QU / P / G / D ...
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::UserId",
        to = "super::profile::Column::Id"
    )]
    Profile,
    #[sea_orm(
        belongs_to = "super::problem::Entity",
        from = "Column::ProblemId",
        to = "super::problem::Column::Id"
    )]
    Problem,
    #[sea_orm(
        belongs_to = "super::language::Entity",
        from = "Column::LanguageId",
        to = "super::language::Column::Id"
    )]
    Language,
    #[sea_orm(has_one = "super::submission_source::Entity")]
    Source,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profile.def()
    }
}

impl Related<super::problem::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Problem.def()
    }
}

impl Related<super::language::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Language.def()
    }
}

impl Related<super::submission_source::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Source.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
