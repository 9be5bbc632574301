use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "network_paddings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub network_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub padding_content_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::networks::Entity",
        from = "Column::NetworkId",
        to = "super::networks::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Network,
    #[sea_orm(
        belongs_to = "super::padding_contents::Entity",
        from = "Column::PaddingContentId",
        to = "super::padding_contents::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PaddingContent,
}

impl Related<super::networks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Network.def()
    }
}

impl Related<super::padding_contents::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PaddingContent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
