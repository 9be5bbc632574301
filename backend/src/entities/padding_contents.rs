use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An advertisement or PSA to run in a block. When it actually airs is up to
/// the scheduler.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "padding_contents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub recording_id: Uuid,
    pub block_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::recordings::Entity",
        from = "Column::RecordingId",
        to = "super::recordings::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Recording,
    #[sea_orm(
        belongs_to = "super::scheduled_blocks::Entity",
        from = "Column::BlockId",
        to = "super::scheduled_blocks::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Block,
    #[sea_orm(has_many = "super::network_paddings::Entity")]
    NetworkPaddings,
}

impl Related<super::recordings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recording.def()
    }
}

impl Related<super::scheduled_blocks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Block.def()
    }
}

impl Related<super::network_paddings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NetworkPaddings.def()
    }
}

impl Related<super::networks::Entity> for Entity {
    fn to() -> RelationDef {
        super::network_paddings::Relation::Network.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::network_paddings::Relation::PaddingContent.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
