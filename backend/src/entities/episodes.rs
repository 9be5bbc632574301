use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// A particular episode of a program, or other broadcast audio.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub program_id: Uuid,
    pub recording_id: Option<Uuid>,
    pub created_time: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::programs::Entity",
        from = "Column::ProgramId",
        to = "super::programs::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Program,
    #[sea_orm(
        belongs_to = "super::recordings::Entity",
        from = "Column::RecordingId",
        to = "super::recordings::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Recording,
}

impl Related<super::programs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl Related<super::recordings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recording.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.created_time.is_not_set() {
            self.created_time = Set(chrono::Utc::now());
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_program, setup_db};
    use sea_orm::ActiveModelTrait;

    #[tokio::test]
    async fn insert_stamps_created_time() {
        let db = setup_db().await;
        let program = insert_program(&db, "Farmers Hour").await;
        let before = chrono::Utc::now();

        let recording = super::super::recordings::ActiveModel {
            id: Set(Uuid::new_v4()),
            url: Set(Some("https://cdn.example.org/farmers-hour.mp3".into())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        assert!(recording.created_time >= before);

        let episode = ActiveModel {
            id: Set(Uuid::new_v4()),
            program_id: Set(program.id),
            recording_id: Set(Some(recording.id)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        assert!(episode.created_time >= before);

        let linked = episode
            .find_related(super::super::recordings::Entity)
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(linked.id, recording.id);
    }
}
