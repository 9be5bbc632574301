use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An SMS passing through one of the platform's numbers.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub message_uuid: Option<String>,
    pub send_time: Option<DateTimeUtc>,
    pub text: Option<String>,
    pub from_phone_number_id: Option<Uuid>,
    pub to_phone_number_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::phone_numbers::Entity",
        from = "Column::FromPhoneNumberId",
        to = "super::phone_numbers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    FromPhoneNumber,
    #[sea_orm(
        belongs_to = "super::phone_numbers::Entity",
        from = "Column::ToPhoneNumberId",
        to = "super::phone_numbers::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ToPhoneNumber,
}

impl ActiveModelBehavior for ActiveModel {}

pub struct FromPhoneNumberLink;

impl Linked for FromPhoneNumberLink {
    type FromEntity = Entity;
    type ToEntity = super::phone_numbers::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::FromPhoneNumber.def()]
    }
}

pub struct ToPhoneNumberLink;

impl Linked for ToPhoneNumberLink {
    type FromEntity = Entity;
    type ToEntity = super::phone_numbers::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![Relation::ToPhoneNumber.def()]
    }
}

impl Model {
    pub async fn from_phone_number<C>(&self, db: &C) -> Result<Option<super::phone_numbers::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_linked(FromPhoneNumberLink).one(db).await
    }

    pub async fn to_phone_number<C>(&self, db: &C) -> Result<Option<super::phone_numbers::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        self.find_linked(ToPhoneNumberLink).one(db).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{insert_phone, setup_db};
    use sea_orm::{ActiveModelTrait, Set};

    #[tokio::test]
    async fn both_ends_resolve() {
        let db = setup_db().await;
        let listener = insert_phone(&db, "772000003").await;
        let station = insert_phone(&db, "772000004").await;

        let message = ActiveModel {
            id: Set(Uuid::new_v4()),
            send_time: Set(Some(chrono::Utc::now())),
            text: Set(Some("Greetings to Mukono".into())),
            from_phone_number_id: Set(Some(listener.id)),
            to_phone_number_id: Set(Some(station.id)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        let from = message.from_phone_number(&db).await.unwrap().unwrap();
        let to = message.to_phone_number(&db).await.unwrap().unwrap();
        assert_eq!(from.id, listener.id);
        assert_eq!(to.id, station.id);
    }
}
