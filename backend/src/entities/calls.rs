use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Identifier assigned by the telephony provider.
    pub call_uuid: Option<String>,
    pub start_time: Option<DateTimeUtc>,
    pub end_time: Option<DateTimeUtc>,
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
    pub fn duration(&self) -> Option<chrono::Duration> {
        Some(self.end_time? - self.start_time?)
    }

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
    use chrono::TimeZone;
    use sea_orm::{ActiveModelTrait, Set};

    #[tokio::test]
    async fn both_ends_resolve() {
        let db = setup_db().await;
        let caller = insert_phone(&db, "772000001").await;
        let station = insert_phone(&db, "772000002").await;
        let start = chrono::Utc.with_ymd_and_hms(2024, 6, 3, 6, 40, 0).unwrap();

        let call = ActiveModel {
            id: Set(Uuid::new_v4()),
            start_time: Set(Some(start)),
            end_time: Set(Some(start + chrono::Duration::seconds(95))),
            from_phone_number_id: Set(Some(caller.id)),
            to_phone_number_id: Set(Some(station.id)),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();

        assert_eq!(call.from_phone_number(&db).await.unwrap(), Some(caller));
        assert_eq!(call.to_phone_number(&db).await.unwrap(), Some(station));
        assert_eq!(call.duration(), Some(chrono::Duration::seconds(95)));

        let unanswered = ActiveModel {
            id: Set(Uuid::new_v4()),
            from_phone_number_id: Set(Some(call.from_phone_number_id.unwrap())),
            ..Default::default()
        }
        .insert(&db)
        .await
        .unwrap();
        assert_eq!(unanswered.to_phone_number(&db).await.unwrap(), None);
        assert_eq!(unanswered.duration(), None);
    }
}
