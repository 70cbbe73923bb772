use sea_orm::entity::prelude::*;

/// 评论，只声明冗余计数列
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "judge_comment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub upvotes: i32,
    pub downvotes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment_vote::Entity")]
    Votes,
}

impl Related<super::comment_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
